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

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::scheduler;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;
use crate::types::word_record::WordRecord;

/// Normalizes a word or learner name into a lookup key.
pub fn normalize_key(s: &str) -> String {
    s.trim().to_lowercase()
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearnerType {
    #[default]
    Child,
    Adult,
}

impl Display for LearnerType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LearnerType::Child => write!(f, "child"),
            LearnerType::Adult => write!(f, "adult"),
        }
    }
}

/// Rollup counters. The first three are derived from the vocabulary and
/// recomputed after every change to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileStats {
    pub words_learned: usize,
    pub words_mastered: usize,
    pub total_reviews: usize,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    pub estimated_vocab_size: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    #[serde(rename = "date")]
    pub assessed_at: Timestamp,
    pub level: u32,
    pub estimated_vocab_size: u32,
}

/// Initial profile settings.
#[derive(Clone, Debug)]
pub struct ProfileOptions {
    pub age: u32,
    pub level: u32,
    pub learner_type: LearnerType,
    pub mother_tongue: Option<String>,
    pub interests: Option<String>,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            age: 10,
            level: 1,
            learner_type: LearnerType::Child,
            mother_tongue: None,
            interests: None,
        }
    }
}

/// A learner and their vocabulary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LearnerProfile {
    pub name: String,
    pub age: u32,
    pub current_level: u32,
    #[serde(default)]
    pub learner_type: LearnerType,
    #[serde(default)]
    pub mother_tongue: Option<String>,
    #[serde(default)]
    pub interests: Option<String>,
    #[serde(rename = "created_date")]
    pub created_at: Timestamp,
    #[serde(default)]
    pub last_session: Option<Timestamp>,
    #[serde(default)]
    pub total_sessions: u32,
    /// Keyed by the normalized word.
    #[serde(default)]
    vocabulary: BTreeMap<String, WordRecord>,
    stats: ProfileStats,
    #[serde(default)]
    pub assessment_history: Vec<Assessment>,
    /// Not interpreted, only preserved.
    #[serde(default)]
    pub session_history: Vec<serde_json::Value>,
}

impl LearnerProfile {
    pub fn new(name: &str, options: ProfileOptions, now: Timestamp) -> Self {
        Self {
            name: name.to_string(),
            age: options.age,
            current_level: options.level,
            learner_type: options.learner_type,
            mother_tongue: options.mother_tongue,
            interests: options.interests,
            created_at: now,
            last_session: None,
            total_sessions: 0,
            vocabulary: BTreeMap::new(),
            stats: ProfileStats {
                words_learned: 0,
                words_mastered: 0,
                total_reviews: 0,
                current_streak: 0,
                longest_streak: 0,
                estimated_vocab_size: options.level.saturating_mul(300).saturating_add(200),
            },
            assessment_history: Vec::new(),
            session_history: Vec::new(),
        }
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, WordRecord> {
        &self.vocabulary
    }

    pub fn stats(&self) -> &ProfileStats {
        &self.stats
    }

    #[cfg(test)]
    pub fn get_word(&self, word: &str) -> Option<&WordRecord> {
        self.vocabulary.get(&normalize_key(word))
    }

    /// Adds a word to the vocabulary. Returns `false`, and changes nothing,
    /// if the word is already present under any capitalization.
    pub fn add_word(&mut self, word: &str, level: u32, now: Timestamp) -> bool {
        let key = normalize_key(word);
        if self.vocabulary.contains_key(&key) {
            return false;
        }
        self.vocabulary
            .insert(key, WordRecord::new(word.trim(), level, now));
        self.recount();
        true
    }

    /// Records a review of a word already in the vocabulary.
    pub fn review_word(
        &mut self,
        word: &str,
        quality: Quality,
        now: Timestamp,
    ) -> Fallible<&WordRecord> {
        let key = normalize_key(word);
        let Some(record) = self.vocabulary.get(&key) else {
            return fail(format!("word not found: {word}"));
        };
        let updated = scheduler::review(record, quality, now);
        self.vocabulary.insert(key.clone(), updated);
        self.recount();
        match self.vocabulary.get(&key) {
            Some(record) => Ok(record),
            None => fail(format!("word not found: {word}")),
        }
    }

    pub fn record_assessment(&mut self, level: u32, estimated_vocab_size: u32, now: Timestamp) {
        self.assessment_history.push(Assessment {
            assessed_at: now,
            level,
            estimated_vocab_size,
        });
        self.current_level = level;
        self.stats.estimated_vocab_size = estimated_vocab_size;
    }

    pub fn update_interests(&mut self, interests: &str) {
        self.interests = Some(interests.to_string());
    }

    /// Checks every record, and brings the derived counters in line with
    /// the vocabulary.
    pub fn validate(&mut self) -> Fallible<()> {
        if self.name.trim().is_empty() {
            return fail("invalid profile: missing learner name");
        }
        for (key, record) in &self.vocabulary {
            if *key != normalize_key(record.word()) {
                return fail(format!(
                    "invalid profile: word '{}' stored under key '{key}'",
                    record.word()
                ));
            }
            record.validate()?;
        }
        self.recount();
        Ok(())
    }

    fn recount(&mut self) {
        self.stats.words_learned = self.vocabulary.len();
        self.stats.words_mastered = self
            .vocabulary
            .values()
            .filter(|r| r.mastery_level().is_mastered())
            .count();
        self.stats.total_reviews = self
            .vocabulary
            .values()
            .map(|r| r.review_history().len())
            .sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::mastery::MasteryLevel;

    fn q(value: u8) -> Quality {
        Quality::new(value).unwrap()
    }

    fn profile() -> LearnerProfile {
        LearnerProfile::new("Ada", ProfileOptions::default(), Timestamp::now())
    }

    #[test]
    fn test_new_profile() {
        let profile = profile();
        assert_eq!(profile.current_level, 1);
        assert_eq!(profile.age, 10);
        assert_eq!(profile.stats().estimated_vocab_size, 500);
        assert!(profile.vocabulary().is_empty());
    }

    #[test]
    fn test_new_profile_with_huge_level() {
        let options = ProfileOptions {
            level: 20_000_000,
            ..ProfileOptions::default()
        };
        let profile = LearnerProfile::new("Ada", options, Timestamp::now());
        assert_eq!(profile.current_level, 20_000_000);
        assert_eq!(profile.stats().estimated_vocab_size, u32::MAX);
    }

    #[test]
    fn test_add_word_is_case_insensitive() {
        let mut profile = profile();
        let now = Timestamp::now();
        assert!(profile.add_word("Apple", 1, now));
        assert!(!profile.add_word("APPLE", 3, now));
        assert_eq!(profile.vocabulary().len(), 1);
        assert_eq!(profile.stats().words_learned, 1);
        let record = profile.get_word("aPPle").unwrap();
        assert_eq!(record.word(), "Apple");
        assert_eq!(record.level(), 1);
    }

    #[test]
    fn test_review_unknown_word() {
        let mut profile = profile();
        let result = profile.review_word("ghost", q(4), Timestamp::now());
        assert!(result.is_err());
        assert!(profile.vocabulary().is_empty());
    }

    #[test]
    fn test_review_updates_rollups() -> Fallible<()> {
        let mut profile = profile();
        let now = Timestamp::now();
        profile.add_word("apple", 1, now);
        profile.add_word("pear", 1, now);
        for _ in 0..8 {
            profile.review_word("Apple", q(5), now)?;
        }
        profile.review_word("pear", q(1), now)?;
        let apple = profile.get_word("apple").unwrap();
        assert_eq!(apple.repetitions(), 8);
        assert_eq!(apple.mastery_level(), MasteryLevel::Permanent);
        assert_eq!(profile.stats().words_mastered, 1);
        assert_eq!(profile.stats().total_reviews, 9);
        // A failure drops the word out of the mastered count.
        profile.review_word("apple", q(0), now)?;
        assert_eq!(profile.stats().words_mastered, 0);
        assert_eq!(profile.stats().total_reviews, 10);
        Ok(())
    }

    #[test]
    fn test_words_mastered_tracks_records() -> Fallible<()> {
        let mut profile = profile();
        let now = Timestamp::now();
        let words = ["a", "b", "c", "d"];
        for word in words {
            profile.add_word(word, 1, now);
        }
        for round in 0..12u8 {
            for (i, word) in words.iter().enumerate() {
                let quality = (round + i as u8) % 6;
                profile.review_word(word, q(quality.max(3 * (i as u8 % 2))), now)?;
                let mastered = profile
                    .vocabulary()
                    .values()
                    .filter(|r| r.mastery_level().as_u8() >= 4)
                    .count();
                assert_eq!(profile.stats().words_mastered, mastered);
            }
        }
        Ok(())
    }

    #[test]
    fn test_assessment() {
        let mut profile = profile();
        profile.record_assessment(3, 1500, Timestamp::now());
        assert_eq!(profile.current_level, 3);
        assert_eq!(profile.stats().estimated_vocab_size, 1500);
        assert_eq!(profile.assessment_history.len(), 1);
    }

    #[test]
    fn test_json_roundtrip() -> Fallible<()> {
        let mut profile = profile();
        let now = Timestamp::now();
        profile.add_word("apple", 1, now);
        profile.review_word("apple", q(4), now)?;
        let json = serde_json::to_string_pretty(&profile)?;
        let mut back: LearnerProfile = serde_json::from_str(&json)?;
        back.validate()?;
        assert_eq!(back, profile);
        Ok(())
    }

    #[test]
    fn test_validate_recounts() -> Fallible<()> {
        let json = r#"{
            "name": "Ada",
            "age": 9,
            "current_level": 2,
            "learner_type": "child",
            "mother_tongue": "Spanish",
            "interests": null,
            "created_date": "2025-01-01T09:00:00.123456",
            "last_session": null,
            "total_sessions": 0,
            "vocabulary": {
                "apple": {
                    "word": "Apple",
                    "level": 2,
                    "introduced_date": "2025-01-01T09:00:00.123456",
                    "mastery_level": 0,
                    "ease_factor": 2.5,
                    "interval_days": 1,
                    "repetitions": 0,
                    "next_review": "2025-01-01T09:00:00.123456",
                    "review_history": [],
                    "correct_streak": 0
                }
            },
            "stats": {
                "words_learned": 7,
                "words_mastered": 3,
                "total_reviews": 0,
                "current_streak": 0,
                "longest_streak": 0,
                "estimated_vocab_size": 800
            },
            "assessment_history": [],
            "session_history": []
        }"#;
        let mut profile: LearnerProfile = serde_json::from_str(json)?;
        profile.validate()?;
        assert_eq!(profile.stats().words_learned, 1);
        assert_eq!(profile.stats().words_mastered, 0);
        assert_eq!(profile.mother_tongue.as_deref(), Some("Spanish"));
        Ok(())
    }

    #[test]
    fn test_validate_rejects_mismatched_key() {
        let mut profile = profile();
        let now = Timestamp::now();
        profile.add_word("apple", 1, now);
        let record = profile.vocabulary.remove("apple").unwrap();
        profile.vocabulary.insert("pear".to_string(), record);
        assert!(profile.validate().is_err());
    }
}
