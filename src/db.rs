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

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;

use crate::error::Fallible;
use crate::store::ProfileStore;
use crate::store::parse_profile;
use crate::types::profile::LearnerProfile;
use crate::types::profile::normalize_key;
use crate::types::timestamp::Timestamp;

/// Stores every learner in one SQLite database, one row per learner.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating schema in {database_path}.");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }

    /// Return the names of all stored learners, in key order.
    #[cfg(test)]
    pub fn learner_names(&self) -> Fallible<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("select name from profiles order by learner_key;")?;
        let mut rows = stmt.query([])?;
        let mut names = Vec::new();
        while let Some(row) = rows.next()? {
            names.push(row.get(0)?);
        }
        Ok(names)
    }
}

impl ProfileStore for SqliteStore {
    fn load(&self, name: &str) -> Fallible<Option<LearnerProfile>> {
        let sql = "select data from profiles where learner_key = ?;";
        let data: Option<String> = self
            .conn
            .query_row(sql, [normalize_key(name)], |row| row.get(0))
            .optional()?;
        match data {
            Some(json) => Ok(Some(parse_profile(&json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, name: &str, profile: &LearnerProfile) -> Fallible<()> {
        let data = serde_json::to_string(profile)?;
        let sql = "insert into profiles (learner_key, name, data, saved_at) values (?, ?, ?, ?) on conflict (learner_key) do update set name = excluded.name, data = excluded.data, saved_at = excluded.saved_at;";
        self.conn
            .execute(sql, (normalize_key(name), name, data, Timestamp::now()))?;
        log::info!("Saved learner data for {name} to the database.");
        Ok(())
    }
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["profiles"], |row| row.get(0))?;
    Ok(count > 0)
}
