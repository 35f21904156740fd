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
use crate::types::timestamp::Timestamp;
use crate::types::word_record::WordRecord;

/// The most review words offered in a single session, whatever the
/// requested size.
pub const MAX_REVIEW_WORDS: usize = 3;

/// The words to drill today.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct DailySelection {
    pub review_words: Vec<ReviewWord>,
    /// How many new words can be introduced in this session.
    pub new_word_slots: usize,
    /// Every word that is due or overdue, selected or not.
    pub total_due: usize,
    pub overdue_count: usize,
}

/// A snapshot of a word picked for review.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct ReviewWord {
    pub word: String,
    pub mastery_level: MasteryLevel,
    #[serde(rename = "last_review")]
    pub last_review_at: Option<Timestamp>,
    #[serde(rename = "review_count")]
    pub repetitions: u32,
}

/// Picks the words to review on `today` for a session of `count` words.
///
/// Overdue words come first, most overdue first. Words due today follow,
/// least mastered first. Ties keep the vocabulary's key order.
pub fn select_daily(
    vocabulary: &BTreeMap<String, WordRecord>,
    today: Date,
    count: usize,
) -> DailySelection {
    let mut overdue: Vec<(&str, &WordRecord, i64)> = Vec::new();
    let mut due_today: Vec<(&str, &WordRecord)> = Vec::new();
    for (key, record) in vocabulary {
        let days_overdue = today.days_since(record.next_review_at());
        if days_overdue > 0 {
            overdue.push((key.as_str(), record, days_overdue));
        } else if days_overdue == 0 {
            due_today.push((key.as_str(), record));
        }
    }

    overdue.sort_by(|a, b| b.2.cmp(&a.2));
    due_today.sort_by_key(|(_, record)| record.mastery_level());

    let overdue_count = overdue.len();
    let total_due = overdue_count + due_today.len();
    let limit = MAX_REVIEW_WORDS.min(count);

    let review_words: Vec<ReviewWord> = overdue
        .into_iter()
        .map(|(key, record, _)| (key, record))
        .chain(due_today)
        .take(limit)
        .map(|(key, record)| ReviewWord {
            word: key.to_string(),
            mastery_level: record.mastery_level(),
            last_review_at: record.last_review_at(),
            repetitions: record.repetitions(),
        })
        .collect();

    log::debug!(
        "Selected {} of {total_due} due words ({overdue_count} overdue).",
        review_words.len()
    );

    DailySelection {
        new_word_slots: count - review_words.len(),
        review_words,
        total_due,
        overdue_count,
    }
}
