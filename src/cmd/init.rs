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
use crate::error::Fallible;
use crate::error::fail;
use crate::store::ProfileStore;
use crate::store::learner_key;
use crate::types::profile::LearnerProfile;
use crate::types::profile::ProfileOptions;

/// Create and save a new learner profile. Fails if the learner exists.
pub fn init_learner(
    store: &dyn ProfileStore,
    clock: &dyn Clock,
    name: &str,
    options: ProfileOptions,
) -> Fallible<LearnerProfile> {
    learner_key(name)?;
    if store.load(name)?.is_some() {
        return fail(format!("learner '{name}' already exists"));
    }
    let profile = LearnerProfile::new(name, options, clock.now());
    store.save(name, &profile)?;
    Ok(profile)
}
