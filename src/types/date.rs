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

use chrono::Days;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::error::ErrorReport;
use crate::error::Fallible;

const FORMAT: &str = "%Y-%m-%d";

/// A calendar date with no time-of-day component.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Date(NaiveDate);

impl Date {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    #[cfg(test)]
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// The date `days` days after this one. Saturates at the end of the
    /// representable calendar.
    pub fn add_days(self, days: u32) -> Self {
        Self(
            self.0
                .checked_add_days(Days::new(days as u64))
                .unwrap_or(NaiveDate::MAX),
        )
    }

    /// The signed number of days from `earlier` to `self`.
    pub fn days_since(self, earlier: Date) -> i64 {
        (self.0 - earlier.0).num_days()
    }

    /// Parses `YYYY-MM-DD`. A full ISO-8601 timestamp is accepted as well;
    /// only its date part is kept.
    pub fn parse(s: &str) -> Fallible<Self> {
        let head = s.get(..10).unwrap_or(s);
        let date = NaiveDate::parse_from_str(head, FORMAT)
            .map_err(|_| ErrorReport::new(format!("invalid date: {s}")))?;
        Ok(Self(date))
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        Date::parse(&string).map_err(|e| serde::de::Error::custom(e.message().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_add_days_crosses_month() {
        assert_eq!(date(2025, 1, 30).add_days(3), date(2025, 2, 2));
    }

    #[test]
    fn test_days_since() {
        assert_eq!(date(2025, 3, 10).days_since(date(2025, 3, 5)), 5);
        assert_eq!(date(2025, 3, 5).days_since(date(2025, 3, 10)), -5);
    }

    #[test]
    fn test_parse_accepts_timestamps() -> Fallible<()> {
        assert_eq!(Date::parse("2025-03-01")?, date(2025, 3, 1));
        assert_eq!(Date::parse("2025-03-01T23:59:59.999")?, date(2025, 3, 1));
        assert!(Date::parse("03/01/2025").is_err());
        Ok(())
    }

    #[test]
    fn test_display() {
        assert_eq!(date(2025, 3, 1).to_string(), "2025-03-01");
    }
}
