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

use std::fs::read_to_string;
use std::path::Path;

use serde_json::Value;

use crate::cmd::load_learner;
use crate::error::Fallible;
use crate::error::fail;
use crate::store::ProfileStore;
use crate::store::parse_profile;
use crate::store::write_profile;

/// Write a learner's profile to a JSON file.
pub fn export_learner(store: &dyn ProfileStore, name: &str, output: &Path) -> Fallible<()> {
    let profile = load_learner(store, name)?;
    write_profile(output, &profile)?;
    log::info!("Exported learner profile for {name} to {}.", output.display());
    Ok(())
}

/// Read a profile from a JSON file and save it under the learner's name.
/// Returns the name.
pub fn import_learner(store: &dyn ProfileStore, path: &Path) -> Fallible<String> {
    if !path.exists() {
        return fail(format!("file not found: {}", path.display()));
    }
    let json = read_to_string(path)?;
    let value: Value = match serde_json::from_str(&json) {
        Ok(value) => value,
        Err(_) => return fail(format!("{} is not a valid JSON file", path.display())),
    };
    let has_name = value
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|name| !name.trim().is_empty());
    if !has_name {
        return fail("invalid profile: missing learner name");
    }
    let profile = parse_profile(&json)?;
    store.save(&profile.name, &profile)?;
    Ok(profile.name)
}
