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
use crate::error::fail;
use crate::types::quality::Quality;

/// Minimum ease factor for the `Permanent` tier.
const PERMANENT_MIN_EASE: f64 = 2.0;

/// Minimum quality of the latest review for the `Permanent` tier.
const PERMANENT_MIN_QUALITY: u8 = 4;

/// A coarse classification of how well a word is retained.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MasteryLevel {
    /// New, or reset by a failed review.
    New = 0,
    Learning = 1,
    Familiar = 2,
    Known = 3,
    Mastered = 4,
    /// Mastered with a high ease factor and a strong latest review.
    Permanent = 5,
}

impl MasteryLevel {
    pub const ALL: [MasteryLevel; 6] = [
        MasteryLevel::New,
        MasteryLevel::Learning,
        MasteryLevel::Familiar,
        MasteryLevel::Known,
        MasteryLevel::Mastered,
        MasteryLevel::Permanent,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            MasteryLevel::New => "New",
            MasteryLevel::Learning => "Learning",
            MasteryLevel::Familiar => "Familiar",
            MasteryLevel::Known => "Known",
            MasteryLevel::Mastered => "Mastered",
            MasteryLevel::Permanent => "Permanent",
        }
    }

    /// Words at this level or above count as mastered.
    pub fn is_mastered(self) -> bool {
        self >= MasteryLevel::Mastered
    }

    /// The range of repetition counts this tier can be reached with.
    pub fn repetition_band(self) -> (u32, u32) {
        match self {
            MasteryLevel::New => (0, 0),
            MasteryLevel::Learning => (1, 2),
            MasteryLevel::Familiar => (3, 4),
            MasteryLevel::Known => (5, 7),
            MasteryLevel::Mastered | MasteryLevel::Permanent => (8, u32::MAX),
        }
    }
}

/// Classifies a word from its post-review state. The cases are checked in
/// order and the first match wins.
pub fn classify_mastery(repetitions: u32, ease_factor: f64, last_quality: Quality) -> MasteryLevel {
    match repetitions {
        0 => MasteryLevel::New,
        1..=2 => MasteryLevel::Learning,
        3..=4 => MasteryLevel::Familiar,
        5..=7 => MasteryLevel::Known,
        _ if ease_factor >= PERMANENT_MIN_EASE
            && last_quality.value() >= PERMANENT_MIN_QUALITY =>
        {
            MasteryLevel::Permanent
        }
        _ => MasteryLevel::Mastered,
    }
}

impl TryFrom<u8> for MasteryLevel {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match MasteryLevel::ALL.get(value as usize) {
            Some(level) => Ok(*level),
            None => fail(format!("invalid mastery level: {value}")),
        }
    }
}

impl From<MasteryLevel> for u8 {
    fn from(value: MasteryLevel) -> Self {
        value.as_u8()
    }
}

impl Display for MasteryLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
