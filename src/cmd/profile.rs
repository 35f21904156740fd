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

/// Record the outcome of a placement assessment.
pub fn assess(
    store: &dyn ProfileStore,
    clock: &dyn Clock,
    name: &str,
    level: u32,
    vocab_size: u32,
) -> Fallible<()> {
    let mut profile = load_learner(store, name)?;
    profile.record_assessment(level, vocab_size, clock.now());
    store.save(name, &profile)
}

pub fn update_interests(store: &dyn ProfileStore, name: &str, interests: &str) -> Fallible<()> {
    let mut profile = load_learner(store, name)?;
    profile.update_interests(interests);
    store.save(name, &profile)
}
