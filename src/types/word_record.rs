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

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::scheduler::MAX_EASE_FACTOR;
use crate::scheduler::MIN_EASE_FACTOR;
use crate::scheduler::Schedule;
use crate::types::date::Date;
use crate::types::mastery::MasteryLevel;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

/// The scheduling state of a single vocabulary word.
///
/// Only `word` and `level` are fixed by the caller. Everything else starts
/// from the defaults in [`WordRecord::new`] and changes only through
/// [`WordRecord::apply`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    /// The word as it was entered.
    word: String,
    /// Difficulty tier assigned when the word was introduced.
    level: u32,
    #[serde(rename = "introduced_date")]
    introduced_at: Timestamp,
    mastery_level: MasteryLevel,
    ease_factor: f64,
    interval_days: u32,
    repetitions: u32,
    #[serde(rename = "next_review")]
    next_review_at: Date,
    #[serde(default)]
    review_history: Vec<ReviewEntry>,
    #[serde(default)]
    correct_streak: u32,
    #[serde(rename = "last_review", default, skip_serializing_if = "Option::is_none")]
    last_review_at: Option<Timestamp>,
}

/// One entry in a word's review history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewEntry {
    #[serde(rename = "date")]
    pub reviewed_at: Timestamp,
    pub quality: Quality,
}

impl WordRecord {
    pub fn new(word: &str, level: u32, now: Timestamp) -> Self {
        Self {
            word: word.to_string(),
            level,
            introduced_at: now,
            mastery_level: MasteryLevel::New,
            ease_factor: MAX_EASE_FACTOR,
            interval_days: 1,
            repetitions: 0,
            next_review_at: now.local_date(),
            review_history: Vec::new(),
            correct_streak: 0,
            last_review_at: None,
        }
    }

    /// Builds a record in an arbitrary scheduling state.
    #[cfg(test)]
    pub fn with_state(
        word: &str,
        repetitions: u32,
        interval_days: u32,
        ease_factor: f64,
        next_review_at: Date,
    ) -> Self {
        let now = Timestamp::now();
        let mastery_level = match repetitions {
            0 => MasteryLevel::New,
            1..=2 => MasteryLevel::Learning,
            3..=4 => MasteryLevel::Familiar,
            5..=7 => MasteryLevel::Known,
            _ => MasteryLevel::Mastered,
        };
        Self {
            word: word.to_string(),
            level: 1,
            introduced_at: now,
            mastery_level,
            ease_factor,
            interval_days,
            repetitions,
            next_review_at,
            review_history: Vec::new(),
            correct_streak: 0,
            last_review_at: None,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    #[cfg(test)]
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn mastery_level(&self) -> MasteryLevel {
        self.mastery_level
    }

    pub fn ease_factor(&self) -> f64 {
        self.ease_factor
    }

    pub fn interval_days(&self) -> u32 {
        self.interval_days
    }

    pub fn repetitions(&self) -> u32 {
        self.repetitions
    }

    pub fn next_review_at(&self) -> Date {
        self.next_review_at
    }

    pub fn review_history(&self) -> &[ReviewEntry] {
        &self.review_history
    }

    #[cfg(test)]
    pub fn correct_streak(&self) -> u32 {
        self.correct_streak
    }

    pub fn last_review_at(&self) -> Option<Timestamp> {
        self.last_review_at
    }

    pub fn is_due(&self, today: Date) -> bool {
        self.next_review_at <= today
    }

    /// Applies the outcome of a review: the new schedule, the streak, and
    /// the history entry. The schedule comes from the update rule, which
    /// keeps the record valid.
    pub fn apply(&mut self, schedule: Schedule, quality: Quality, now: Timestamp) {
        self.ease_factor = schedule.ease_factor;
        self.interval_days = schedule.interval_days;
        self.repetitions = schedule.repetitions;
        self.mastery_level = schedule.mastery_level;
        self.next_review_at = schedule.next_review_at;
        self.correct_streak = if quality.is_correct() {
            self.correct_streak.saturating_add(1)
        } else {
            0
        };
        self.review_history.push(ReviewEntry {
            reviewed_at: now,
            quality,
        });
        self.last_review_at = Some(now);
        debug_assert!(self.validate().is_ok());
    }

    /// Checks the record's invariants.
    pub fn validate(&self) -> Fallible<()> {
        if !(MIN_EASE_FACTOR..=MAX_EASE_FACTOR).contains(&self.ease_factor) {
            return fail(format!(
                "word '{}': ease factor {} outside [{MIN_EASE_FACTOR}, {MAX_EASE_FACTOR}]",
                self.word, self.ease_factor
            ));
        }
        if self.interval_days < 1 {
            return fail(format!("word '{}': interval must be at least 1 day", self.word));
        }
        let (lo, hi) = self.mastery_level.repetition_band();
        if self.repetitions < lo || self.repetitions > hi {
            return fail(format!(
                "word '{}': mastery level {} inconsistent with {} repetitions",
                self.word,
                self.mastery_level.as_u8(),
                self.repetitions
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler;

    #[test]
    fn test_new_defaults() -> Fallible<()> {
        let now = Timestamp::now();
        let record = WordRecord::new("Apple", 2, now);
        assert_eq!(record.word(), "Apple");
        assert_eq!(record.level(), 2);
        assert_eq!(record.ease_factor(), 2.5);
        assert_eq!(record.interval_days(), 1);
        assert_eq!(record.repetitions(), 0);
        assert_eq!(record.mastery_level(), MasteryLevel::New);
        assert_eq!(record.next_review_at(), now.local_date());
        assert!(record.is_due(now.local_date()));
        assert!(record.review_history().is_empty());
        assert!(record.last_review_at().is_none());
        record.validate()
    }

    #[test]
    fn test_validate_rejects_bad_ease() {
        let today = Timestamp::now().local_date();
        let record = WordRecord::with_state("x", 0, 1, 3.0, today);
        assert!(record.validate().is_err());
        let record = WordRecord::with_state("x", 0, 1, 1.2, today);
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let today = Timestamp::now().local_date();
        let record = WordRecord::with_state("x", 0, 0, 2.5, today);
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_counters_saturate() {
        let today = Timestamp::now().local_date();
        let mut record = WordRecord::with_state("x", u32::MAX, 1, 2.5, today);
        record.correct_streak = u32::MAX;
        let record = scheduler::review(&record, Quality::new(4).unwrap(), Timestamp::now());
        assert_eq!(record.repetitions(), u32::MAX);
        assert_eq!(record.correct_streak(), u32::MAX);
        assert_eq!(record.mastery_level(), MasteryLevel::Permanent);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_deserialize_naive_timestamps() -> Fallible<()> {
        let json = r#"{
            "word": "Apple",
            "level": 1,
            "introduced_date": "2025-01-01T09:00:00.000001",
            "mastery_level": 1,
            "ease_factor": 2.6,
            "interval_days": 1,
            "repetitions": 1,
            "next_review": "2025-01-02T09:00:00.000001",
            "review_history": [{"date": "2025-01-01T09:00:00", "quality": 5}],
            "correct_streak": 1,
            "last_review": "2025-01-01T09:00:00"
        }"#;
        let record: WordRecord = serde_json::from_str(json)?;
        assert_eq!(record.repetitions(), 1);
        assert_eq!(record.next_review_at().to_string(), "2025-01-02");
        assert_eq!(record.review_history().len(), 1);
        // 2.6 is outside the allowed range.
        assert!(record.validate().is_err());
        Ok(())
    }

    #[test]
    fn test_deserialize_without_history() -> Fallible<()> {
        let json = r#"{
            "word": "pear",
            "level": 1,
            "introduced_date": "2025-01-01T09:00:00+00:00",
            "mastery_level": 0,
            "ease_factor": 2.5,
            "interval_days": 1,
            "repetitions": 0,
            "next_review": "2025-01-01"
        }"#;
        let record: WordRecord = serde_json::from_str(json)?;
        assert!(record.review_history().is_empty());
        assert_eq!(record.correct_streak(), 0);
        assert!(record.last_review_at().is_none());
        record.validate()
    }
}
