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

use std::fs::create_dir_all;
use std::fs::read_to_string;
use std::fs::write;
use std::path::Path;
use std::path::PathBuf;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::profile::LearnerProfile;
use crate::types::profile::normalize_key;

/// Loads and saves learner profiles by name. Names are case-insensitive.
pub trait ProfileStore {
    /// Load a learner's profile. If no profile exists, returns `None`.
    fn load(&self, name: &str) -> Fallible<Option<LearnerProfile>>;

    /// Save a learner's profile, replacing any previous version.
    fn save(&self, name: &str, profile: &LearnerProfile) -> Fallible<()>;
}

/// Normalizes a learner name into a storage key. The key becomes a file
/// name, so names that are empty or contain path syntax are rejected.
pub fn learner_key(name: &str) -> Fallible<String> {
    let key = normalize_key(name);
    if key.is_empty() {
        return fail("learner name must not be empty");
    }
    if key == "." || key == ".." || key.contains(['/', '\\', ':', '\0']) {
        return fail(format!("invalid learner name: {name}"));
    }
    Ok(key)
}

/// Parses a profile and checks its invariants.
pub fn parse_profile(json: &str) -> Fallible<LearnerProfile> {
    let mut profile: LearnerProfile = serde_json::from_str(json)?;
    profile.validate()?;
    Ok(profile)
}

/// Writes a profile as pretty-printed JSON.
pub fn write_profile(path: &Path, profile: &LearnerProfile) -> Fallible<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(profile)?;
    write(path, json)?;
    Ok(())
}

/// Stores each learner as `<name>.json` in a directory.
pub struct JsonStore {
    directory: PathBuf,
}

impl JsonStore {
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }

    fn profile_path(&self, name: &str) -> Fallible<PathBuf> {
        let key = learner_key(name)?;
        Ok(self.directory.join(format!("{key}.json")))
    }
}

impl ProfileStore for JsonStore {
    fn load(&self, name: &str) -> Fallible<Option<LearnerProfile>> {
        let path = self.profile_path(name)?;
        if !path.exists() {
            log::debug!("No profile at {}.", path.display());
            return Ok(None);
        }
        log::debug!("Loading profile from {}.", path.display());
        let json = read_to_string(&path)?;
        Ok(Some(parse_profile(&json)?))
    }

    fn save(&self, name: &str, profile: &LearnerProfile) -> Fallible<()> {
        let path = self.profile_path(name)?;
        write_profile(&path, profile)?;
        log::info!("Saved learner data to {}.", path.display());
        Ok(())
    }
}

/// Keeps profiles in memory, serialized, so that saving and loading goes
/// through the same validation as the other stores.
#[cfg(test)]
pub struct MemoryStore {
    profiles: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self {
            profiles: std::cell::RefCell::new(std::collections::HashMap::new()),
        }
    }
}

#[cfg(test)]
impl ProfileStore for MemoryStore {
    fn load(&self, name: &str) -> Fallible<Option<LearnerProfile>> {
        match self.profiles.borrow().get(&normalize_key(name)) {
            Some(json) => Ok(Some(parse_profile(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, name: &str, profile: &LearnerProfile) -> Fallible<()> {
        let json = serde_json::to_string(profile)?;
        self.profiles.borrow_mut().insert(normalize_key(name), json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::types::profile::ProfileOptions;
    use crate::types::quality::Quality;
    use crate::types::timestamp::Timestamp;

    fn sample() -> Fallible<LearnerProfile> {
        let now = Timestamp::now();
        let mut profile = LearnerProfile::new("Ada", ProfileOptions::default(), now);
        profile.add_word("Apple", 1, now);
        profile.review_word("apple", Quality::new(4)?, now)?;
        Ok(profile)
    }

    #[test]
    fn test_json_store_missing() -> Fallible<()> {
        let dir = tempdir()?;
        let store = JsonStore::new(dir.path().to_path_buf());
        assert!(store.load("nobody")?.is_none());
        Ok(())
    }

    #[test]
    fn test_json_store_roundtrip() -> Fallible<()> {
        let dir = tempdir()?;
        let store = JsonStore::new(dir.path().join("nested"));
        let profile = sample()?;
        store.save("Ada", &profile)?;
        assert!(dir.path().join("nested").join("ada.json").exists());
        let loaded = store.load("ADA")?;
        assert_eq!(loaded, Some(profile));
        Ok(())
    }

    #[test]
    fn test_json_store_rejects_corrupt_file() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join("ada.json"), "{ not json")?;
        let store = JsonStore::new(dir.path().to_path_buf());
        assert!(store.load("ada").is_err());
        Ok(())
    }

    #[test]
    fn test_learner_key() -> Fallible<()> {
        assert_eq!(learner_key("  Ada ")?, "ada");
        assert_eq!(learner_key("Mary Jane")?, "mary jane");
        assert_eq!(learner_key("..ada")?, "..ada");
        for name in ["", "   ", ".", "..", "../x", "a/b", "a\\b", "c:x", "a\0b"] {
            assert!(learner_key(name).is_err(), "{name:?} accepted");
        }
        Ok(())
    }

    #[test]
    fn test_json_store_stays_in_directory() -> Fallible<()> {
        let dir = tempdir()?;
        let store = JsonStore::new(dir.path().join("data"));
        let profile = sample()?;
        for name in ["../x", "../../x", "/tmp/x", "sub/x", ".."] {
            let result = store.save(name, &profile);
            assert_eq!(
                result.err().map(|e| e.to_string()),
                Some(format!("error: invalid learner name: {name}"))
            );
            assert!(store.load(name).is_err());
        }
        assert!(!dir.path().join("x.json").exists());
        assert!(!dir.path().join("data").exists());
        Ok(())
    }

    #[test]
    fn test_memory_store_roundtrip() -> Fallible<()> {
        let store = MemoryStore::new();
        let profile = sample()?;
        assert!(store.load("ada")?.is_none());
        store.save("Ada", &profile)?;
        assert_eq!(store.load("ada")?, Some(profile));
        Ok(())
    }
}
