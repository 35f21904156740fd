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

use std::env::current_dir;
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::builder::RangedU64ValueParser;

use crate::clock::SystemClock;
use crate::cmd::daily::daily_words;
use crate::cmd::init::init_learner;
use crate::cmd::profile::assess;
use crate::cmd::profile::update_interests;
use crate::cmd::stats::learner_report;
use crate::cmd::stats::render_summary;
use crate::cmd::transfer::export_learner;
use crate::cmd::transfer::import_learner;
use crate::cmd::word::add_word;
use crate::cmd::word::update_word;
use crate::config::Settings;
use crate::error::Fallible;
use crate::types::profile::LearnerType;
use crate::types::profile::ProfileOptions;
use crate::types::quality::Quality;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding learner profiles and `config.toml`.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize a new learner.
    Init {
        name: String,
        /// Learner age.
        #[arg(long)]
        age: Option<u32>,
        /// Starting level (1-5).
        #[arg(long)]
        level: Option<u32>,
        /// Learner type.
        #[arg(long = "type", value_enum, default_value_t = LearnerType::Child)]
        learner_type: LearnerType,
        /// Mother tongue.
        #[arg(long)]
        mother_tongue: Option<String>,
        /// Comma-separated list of interests.
        #[arg(long)]
        interests: Option<String>,
    },
    /// Show a learner's profile.
    Show { name: String },
    /// Get today's words.
    GetDaily {
        name: String,
        /// Number of words in the session.
        #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        count: Option<usize>,
    },
    /// Add a word to a learner's vocabulary.
    AddWord {
        name: String,
        word: String,
        /// Word level. Defaults to the learner's current level.
        #[arg(long)]
        level: Option<u32>,
    },
    /// Update a word after a review.
    Update {
        name: String,
        word: String,
        /// Quality score (0-5).
        #[arg(value_parser = clap::value_parser!(u8).range(0..=5))]
        quality: u8,
    },
    /// Record assessment results.
    Assess {
        name: String,
        /// Assessed level.
        #[arg(long)]
        level: u32,
        /// Estimated vocabulary size.
        #[arg(long)]
        vocab_size: u32,
    },
    /// Update a learner's interests.
    UpdateInterests {
        name: String,
        #[arg(long)]
        interests: String,
    },
    /// Export a learner's profile to a JSON file.
    Export {
        name: String,
        /// Output file path. Defaults to `<name>-export.json` in the current
        /// directory.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Import a learner's profile from a JSON file.
    Import { path: PathBuf },
    /// Print detailed statistics as JSON.
    Stats { name: String },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Cli = Cli::parse();
    let settings = Settings::resolve(cli.data_dir)?;
    let store = settings.open_store()?;
    let store = store.as_ref();
    let clock = SystemClock;
    match cli.command {
        Command::Init {
            name,
            age,
            level,
            learner_type,
            mother_tongue,
            interests,
        } => {
            let options = ProfileOptions {
                age: age.unwrap_or(settings.config.default_age),
                level: level.unwrap_or(settings.config.default_level),
                learner_type,
                mother_tongue,
                interests,
            };
            let profile = init_learner(store, &clock, &name, options)?;
            println!(
                "Initialized learner profile for {name} (age {}, level {})",
                profile.age, profile.current_level
            );
        }
        Command::Show { name } => {
            let stats = learner_report(store, &clock, &name)?;
            print!("{}", render_summary(&stats)?);
        }
        Command::GetDaily { name, count } => {
            let count = count.unwrap_or(settings.config.daily_count);
            let daily = daily_words(store, &clock, &name, count)?;
            println!("{}", serde_json::to_string_pretty(&daily)?);
        }
        Command::AddWord { name, word, level } => {
            if add_word(store, &clock, &name, &word, level)? {
                println!("Added '{word}' to {name}'s vocabulary");
            } else {
                println!("Word '{word}' already exists in vocabulary");
            }
        }
        Command::Update {
            name,
            word,
            quality,
        } => {
            let quality = Quality::new(quality)?;
            let record = update_word(store, &clock, &name, &word, quality)?;
            println!(
                "Updated '{word}' with quality {quality}: next review on {}",
                record.next_review_at()
            );
        }
        Command::Assess {
            name,
            level,
            vocab_size,
        } => {
            assess(store, &clock, &name, level, vocab_size)?;
            println!("Assessment recorded: Level {level}, Vocab size {vocab_size}");
        }
        Command::UpdateInterests { name, interests } => {
            update_interests(store, &name, &interests)?;
            println!("Updated interests for {name}");
        }
        Command::Export { name, output } => {
            let output = match output {
                Some(path) => path,
                None => current_dir()?.join(format!("{name}-export.json")),
            };
            export_learner(store, &name, &output)?;
            println!("Exported learner profile for {name} to {}", output.display());
        }
        Command::Import { path } => {
            let name = import_learner(store, &path)?;
            println!("Imported learner profile for {name}");
        }
        Command::Stats { name } => {
            let stats = learner_report(store, &clock, &name)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
