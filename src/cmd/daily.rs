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
use crate::session::DailySelection;
use crate::session::select_daily;
use crate::store::ProfileStore;

/// Pick today's words for a learner. Nothing is saved.
pub fn daily_words(
    store: &dyn ProfileStore,
    clock: &dyn Clock,
    name: &str,
    count: usize,
) -> Fallible<DailySelection> {
    let profile = load_learner(store, name)?;
    Ok(select_daily(profile.vocabulary(), clock.today(), count))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::clock::FixedClock;
    use crate::store::MemoryStore;
    use crate::types::profile::LearnerProfile;
    use crate::types::profile::ProfileOptions;
    use crate::types::quality::Quality;
    use crate::types::timestamp::Timestamp;

    #[test]
    fn test_unknown_learner() {
        let store = MemoryStore::new();
        let clock = FixedClock(Timestamp::now());
        let result = daily_words(&store, &clock, "nobody", 5);
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("error: learner 'nobody' not found".to_string())
        );
    }

    #[test]
    fn test_words_come_due_again() -> Fallible<()> {
        let store = MemoryStore::new();
        let start = Timestamp::now();
        let mut profile = LearnerProfile::new("Ada", ProfileOptions::default(), start);
        profile.add_word("apple", 1, start);
        profile.add_word("pear", 1, start);
        profile.review_word("apple", Quality::new(5)?, start)?;
        store.save("Ada", &profile)?;

        // Today only the unreviewed word is due.
        let today = daily_words(&store, &FixedClock(start), "ada", 5)?;
        let words: Vec<&str> = today.review_words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["pear"]);
        assert_eq!(today.new_word_slots, 4);

        // Three days later both are overdue, the older one first.
        let later = Timestamp::new(start.into_inner() + Duration::days(3));
        let selection = daily_words(&store, &FixedClock(later), "ada", 5)?;
        let words: Vec<&str> = selection.review_words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["pear", "apple"]);
        assert_eq!(selection.overdue_count, 2);

        // Selecting saves nothing.
        assert_eq!(store.load("ada")?, Some(profile));
        Ok(())
    }
}
