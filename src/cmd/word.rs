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

use crate::clock::Clock;
use crate::cmd::load_learner;
use crate::error::Fallible;
use crate::store::ProfileStore;
use crate::types::quality::Quality;
use crate::types::word_record::WordRecord;

/// Add a word to a learner's vocabulary. The level defaults to the
/// learner's current level. Returns `false` if the word was already there.
pub fn add_word(
    store: &dyn ProfileStore,
    clock: &dyn Clock,
    name: &str,
    word: &str,
    level: Option<u32>,
) -> Fallible<bool> {
    let mut profile = load_learner(store, name)?;
    let level = level.unwrap_or(profile.current_level);
    if !profile.add_word(word, level, clock.now()) {
        log::info!("Word '{word}' already exists in vocabulary.");
        return Ok(false);
    }
    store.save(name, &profile)?;
    Ok(true)
}

/// Record a review of a word and save the result.
pub fn update_word(
    store: &dyn ProfileStore,
    clock: &dyn Clock,
    name: &str,
    word: &str,
    quality: Quality,
) -> Fallible<WordRecord> {
    let mut profile = load_learner(store, name)?;
    let record = profile.review_word(word, quality, clock.now())?.clone();
    store.save(name, &profile)?;
    Ok(record)
}
