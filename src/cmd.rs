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

pub mod daily;
pub mod init;
pub mod profile;
pub mod stats;
pub mod transfer;
pub mod word;

use crate::error::Fallible;
use crate::error::fail;
use crate::store::ProfileStore;
use crate::types::profile::LearnerProfile;

/// Load a learner's profile, failing if there is none.
pub fn load_learner(store: &dyn ProfileStore, name: &str) -> Fallible<LearnerProfile> {
    match store.load(name)? {
        Some(profile) => Ok(profile),
        None => fail(format!("learner '{name}' not found")),
    }
}
