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

use std::io::stdin;
use std::io::stdout;

use clap::Parser;

use crate::cmd::OutputFormat;
use crate::cmd::check::check_workspace;
use crate::cmd::clear::clear_history;
use crate::cmd::export::export_progress;
use crate::cmd::favorite::list_favorites;
use crate::cmd::favorite::toggle_favorite;
use crate::cmd::missed::list_missed;
use crate::cmd::quiz::Outcome;
use crate::cmd::quiz::record_attempt;
use crate::cmd::quiz::run_quiz;
use crate::cmd::stats::print_stats;
use crate::cmd::topics::list_topics;
use crate::error::Fallible;
use crate::workspace::Workspace;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// List the topics in the catalog.
    Topics {
        /// Path to the notes directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Add a topic to the favorites, or remove it if it is already there.
    Favorite {
        /// The topic's id.
        topic: String,
        /// Path to the notes directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// List favorite topics.
    Favorites {
        /// Path to the notes directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Quiz yourself on a topic.
    Quiz {
        /// The topic's id.
        topic: String,
        /// Path to the notes directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Record the outcome of a single quiz question.
    Record {
        /// The question's id, e.g. `nodejs-q-0`.
        question: String,
        /// You recalled the answer.
        #[arg(long, conflicts_with = "incorrect", required_unless_present = "incorrect")]
        correct: bool,
        /// You did not recall the answer.
        #[arg(long)]
        incorrect: bool,
        /// Path to the notes directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// List questions whose most recent attempt was incorrect.
    Missed {
        /// Path to the notes directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print correct and incorrect attempt counts per topic.
    Stats {
        /// Only this topic.
        #[arg(long)]
        topic: Option<String>,
        /// Path to the notes directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Delete the quiz history. Favorites are kept.
    ClearHistory {
        /// Path to the notes directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Check the configuration and the catalog, and report orphaned progress.
    Check {
        /// Path to the notes directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Print the saved progress as JSON.
    Export {
        /// Path to the notes directory. By default, the current working directory is used.
        directory: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    let mut out = stdout().lock();
    match cli {
        Command::Topics { directory } => {
            let ws = Workspace::open(directory)?;
            list_topics(&ws, &mut out)
        }
        Command::Favorite { topic, directory } => {
            let mut ws = Workspace::open(directory)?;
            toggle_favorite(&mut ws, &topic, &mut out)
        }
        Command::Favorites { directory } => {
            let ws = Workspace::open(directory)?;
            list_favorites(&ws, &mut out)
        }
        Command::Quiz { topic, directory } => {
            let mut ws = Workspace::open(directory)?;
            let mut input = stdin().lock();
            run_quiz(&mut ws, &topic, &mut input, &mut out)
        }
        Command::Record {
            question,
            correct,
            incorrect: _,
            directory,
        } => {
            let outcome = if correct {
                Outcome::Correct
            } else {
                Outcome::Incorrect
            };
            let mut ws = Workspace::open(directory)?;
            record_attempt(&mut ws, &question, outcome, &mut out)
        }
        Command::Missed { directory, format } => {
            let ws = Workspace::open(directory)?;
            list_missed(&ws, format, &mut out)
        }
        Command::Stats {
            topic,
            directory,
            format,
        } => {
            let ws = Workspace::open(directory)?;
            print_stats(&ws, topic.as_deref(), format, &mut out)
        }
        Command::ClearHistory { directory } => {
            let mut ws = Workspace::open(directory)?;
            clear_history(&mut ws, &mut out)
        }
        Command::Check { directory } => {
            let ws = Workspace::open(directory)?;
            check_workspace(&ws, &mut out)
        }
        Command::Export { directory } => {
            let ws = Workspace::open(directory)?;
            export_progress(&ws, &mut out)
        }
    }
}
