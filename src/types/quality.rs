// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

/// The quality of a recall, on the SM-2 scale:
///
/// - 5: perfect response
/// - 4: correct after hesitation
/// - 3: correct with difficulty
/// - 2: incorrect but recognized
/// - 1: incorrect, vaguely familiar
/// - 0: complete blackout
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Fallible<Self> {
        if value > Self::MAX {
            return fail(format!(
                "quality must be between 0 and {}, got {value}",
                Self::MAX
            ));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether the recall counts as correct (quality 3 or better).
    pub fn is_correct(self) -> bool {
        self.0 >= 3
    }
}

impl TryFrom<u8> for Quality {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Quality::new(value)
    }
}

impl From<Quality> for u8 {
    fn from(value: Quality) -> Self {
        value.0
    }
}

impl Display for Quality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range() {
        for q in 0..=5 {
            assert!(Quality::new(q).is_ok());
        }
        assert!(Quality::new(6).is_err());
        assert!(Quality::new(255).is_err());
    }

    #[test]
    fn test_is_correct() -> Fallible<()> {
        assert!(!Quality::new(2)?.is_correct());
        assert!(Quality::new(3)?.is_correct());
        Ok(())
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        let result: Result<Quality, _> = serde_json::from_str("7");
        assert!(result.is_err());
    }
}
