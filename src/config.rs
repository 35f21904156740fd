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

use std::env::var_os;
use std::fs::read_to_string;
use std::path::PathBuf;

use serde::Deserialize;

use crate::db::SqliteStore;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::store::JsonStore;
use crate::store::ProfileStore;

/// Environment variable overriding the data directory.
const DATA_DIR_VAR: &str = "WORDTUTOR_DATA_DIR";

/// Name of the data directory under the home directory.
const DEFAULT_DIR_NAME: &str = ".english-tutor";

const CONFIG_FILE: &str = "config.toml";

const DATABASE_FILE: &str = "wordtutor.db";

#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Json,
    Sqlite,
}

/// Settings read from `config.toml` in the data directory.
#[derive(Deserialize, Clone, PartialEq, Debug)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where profiles are kept.
    pub store: StoreKind,
    /// Session size when `--count` is not given.
    pub daily_count: usize,
    /// Level for new learners when `--level` is not given.
    pub default_level: u32,
    /// Age for new learners when `--age` is not given.
    pub default_age: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreKind::Json,
            daily_count: 5,
            default_level: 1,
            default_age: 10,
        }
    }
}

impl Config {
    pub fn parse(content: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(content)?;
        if config.daily_count == 0 {
            return fail("config error: daily_count must be positive");
        }
        Ok(config)
    }
}

/// The data directory plus the configuration found in it.
pub struct Settings {
    pub data_dir: PathBuf,
    pub config: Config,
}

impl Settings {
    /// Resolves the data directory: the explicit option first, then the
    /// environment, then the home directory.
    pub fn resolve(data_dir: Option<PathBuf>) -> Fallible<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => match var_os(DATA_DIR_VAR) {
                Some(dir) => PathBuf::from(dir),
                None => {
                    let home = var_os("HOME")
                        .ok_or_else(|| ErrorReport::new("cannot find the home directory"))?;
                    PathBuf::from(home).join(DEFAULT_DIR_NAME)
                }
            },
        };
        let config_path = data_dir.join(CONFIG_FILE);
        let config = if config_path.exists() {
            log::debug!("Reading config from {}.", config_path.display());
            Config::parse(&read_to_string(&config_path)?)?
        } else {
            Config::default()
        };
        log::debug!("Using data directory {}.", data_dir.display());
        Ok(Self { data_dir, config })
    }

    pub fn open_store(&self) -> Fallible<Box<dyn ProfileStore>> {
        match self.config.store {
            StoreKind::Json => Ok(Box::new(JsonStore::new(self.data_dir.clone()))),
            StoreKind::Sqlite => {
                std::fs::create_dir_all(&self.data_dir)?;
                let db_path = self.data_dir.join(DATABASE_FILE);
                let db_path: &str = db_path
                    .to_str()
                    .ok_or_else(|| ErrorReport::new("invalid path"))?;
                Ok(Box::new(SqliteStore::new(db_path)?))
            }
        }
    }
}
