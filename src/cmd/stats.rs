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

use std::fmt::Write;

use crate::clock::Clock;
use crate::cmd::load_learner;
use crate::error::Fallible;
use crate::stats::LearnerStats;
use crate::stats::learner_stats;
use crate::store::ProfileStore;
use crate::types::mastery::MasteryLevel;

pub fn learner_report(
    store: &dyn ProfileStore,
    clock: &dyn Clock,
    name: &str,
) -> Fallible<LearnerStats> {
    let profile = load_learner(store, name)?;
    Ok(learner_stats(&profile, clock.today()))
}

/// Render the human-readable summary printed by `show`.
pub fn render_summary(stats: &LearnerStats) -> Fallible<String> {
    let rule = "=".repeat(50);
    let mut out = String::new();
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Learner: {}", stats.name)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Current Level: {}", stats.current_level)?;
    writeln!(out, "Estimated Vocabulary: {} words", stats.estimated_vocab_size)?;
    writeln!(out)?;
    writeln!(out, "Progress:")?;
    writeln!(out, "  Total words tracked: {}", stats.total_words)?;
    writeln!(out, "  Words mastered: {}", stats.words_mastered)?;
    writeln!(out, "  Retention rate: {:.0}%", stats.retention_rate * 100.0)?;
    writeln!(out)?;
    writeln!(out, "Mastery Distribution:")?;
    for level in MasteryLevel::ALL {
        let count = stats
            .mastery_distribution
            .get(&level.as_u8())
            .copied()
            .unwrap_or(0);
        if count > 0 {
            writeln!(out, "  {}: {count} words", level.name())?;
        }
    }
    writeln!(out)?;
    writeln!(out, "Today:")?;
    writeln!(out, "  Words due for review: {}", stats.due_today)?;
    writeln!(out, "  Total sessions: {}", stats.total_sessions)?;
    Ok(out)
}
