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

use serde::Serialize;

use crate::types::date::Date;
use crate::types::mastery::MasteryLevel;
use crate::types::profile::LearnerProfile;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LearnerStats {
    pub name: String,
    pub current_level: u32,
    pub total_words: usize,
    /// Word count per mastery level, every level present.
    pub mastery_distribution: BTreeMap<u8, usize>,
    pub words_mastered: usize,
    /// Share of reviews with quality 3 or better, to two decimal places.
    pub retention_rate: f64,
    pub total_reviews: usize,
    pub due_today: usize,
    pub estimated_vocab_size: u32,
    pub total_sessions: u32,
    pub current_streak: u32,
}

pub fn learner_stats(profile: &LearnerProfile, today: Date) -> LearnerStats {
    let vocabulary = profile.vocabulary();

    let mut mastery_distribution: BTreeMap<u8, usize> = MasteryLevel::ALL
        .iter()
        .map(|level| (level.as_u8(), 0))
        .collect();
    for record in vocabulary.values() {
        *mastery_distribution
            .entry(record.mastery_level().as_u8())
            .or_insert(0) += 1;
    }

    let mut total_reviews = 0;
    let mut correct_reviews = 0;
    for record in vocabulary.values() {
        for entry in record.review_history() {
            total_reviews += 1;
            if entry.quality.is_correct() {
                correct_reviews += 1;
            }
        }
    }
    let retention_rate = if total_reviews > 0 {
        let rate = correct_reviews as f64 / total_reviews as f64;
        (rate * 100.0).round() / 100.0
    } else {
        0.0
    };

    let due_today = vocabulary.values().filter(|r| r.is_due(today)).count();

    LearnerStats {
        name: profile.name.clone(),
        current_level: profile.current_level,
        total_words: vocabulary.len(),
        mastery_distribution,
        words_mastered: profile.stats().words_mastered,
        retention_rate,
        total_reviews,
        due_today,
        estimated_vocab_size: profile.stats().estimated_vocab_size,
        total_sessions: profile.total_sessions,
        current_streak: profile.stats().current_streak,
    }
}
