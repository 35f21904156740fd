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

//! The SM-2 update rule.

use crate::types::date::Date;
use crate::types::mastery::MasteryLevel;
use crate::types::mastery::classify_mastery;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;
use crate::types::word_record::WordRecord;

/// The lowest ease factor a word can have.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// The highest ease factor a word can have, and the one new words start with.
pub const MAX_EASE_FACTOR: f64 = 2.5;

/// Interval after the first correct review.
const FIRST_INTERVAL: u32 = 1;

/// Interval after the second correct review.
const SECOND_INTERVAL: u32 = 3;

/// The scheduling fields produced by a review.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Schedule {
    pub ease_factor: f64,
    pub interval_days: u32,
    pub repetitions: u32,
    pub mastery_level: MasteryLevel,
    pub next_review_at: Date,
}

/// Computes the schedule that follows reviewing `record` with `quality` on
/// the local date of `now`.
pub fn next_schedule(record: &WordRecord, quality: Quality, now: Timestamp) -> Schedule {
    let prior_ease = record.ease_factor();
    let (interval_days, repetitions) = if quality.is_correct() {
        let interval = match record.repetitions() {
            0 => FIRST_INTERVAL,
            1 => SECOND_INTERVAL,
            _ => grow_interval(record.interval_days(), prior_ease),
        };
        (interval, record.repetitions().saturating_add(1))
    } else {
        (FIRST_INTERVAL, 0)
    };
    let ease_factor = next_ease_factor(prior_ease, quality);
    let mastery_level = classify_mastery(repetitions, ease_factor, quality);
    Schedule {
        ease_factor: round_to_hundredths(ease_factor),
        interval_days,
        repetitions,
        mastery_level,
        next_review_at: now.local_date().add_days(interval_days),
    }
}

/// Reviews a word, returning the updated record. The input is left
/// untouched.
pub fn review(record: &WordRecord, quality: Quality, now: Timestamp) -> WordRecord {
    let schedule = next_schedule(record, quality, now);
    log::debug!(
        "Reviewed '{}' with quality {quality}: interval {} -> {}, ease {} -> {}",
        record.word(),
        record.interval_days(),
        schedule.interval_days,
        record.ease_factor(),
        schedule.ease_factor
    );
    let mut updated = record.clone();
    updated.apply(schedule, quality, now);
    updated
}

/// `round(interval × ease)`, rounding half away from zero, never below one.
fn grow_interval(interval_days: u32, ease_factor: f64) -> u32 {
    let grown = (interval_days as f64 * ease_factor).round();
    if grown >= u32::MAX as f64 {
        u32::MAX
    } else {
        (grown as u32).max(1)
    }
}

/// The unrounded, clamped ease factor after a review.
fn next_ease_factor(ease_factor: f64, quality: Quality) -> f64 {
    let miss = (Quality::MAX - quality.value()) as f64;
    let ef = ease_factor + (0.1 - miss * (0.08 + miss * 0.02));
    ef.clamp(MIN_EASE_FACTOR, MAX_EASE_FACTOR)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
