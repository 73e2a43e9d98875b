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

use clap::Parser;

use crate::cmd::activity::DEFAULT_DAYS;
use crate::cmd::activity::print_activity;
use crate::cmd::check::check_collection;
use crate::cmd::export::export_collection;
use crate::cmd::stats::print_collection_stats;
use crate::content::Deck;
use crate::drill::server::DrillOptions;
use crate::drill::server::start_server;
use crate::error::Fallible;
use crate::session::SessionLimits;
use crate::session::SessionType;
use crate::types::timestamp::Timestamp;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Drill a deck in the browser.
    Drill {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which deck to drill.
        #[arg(long, value_enum, default_value_t = Deck::Vocabulary)]
        deck: Deck,
        /// Which cards to include.
        #[arg(long, value_enum, default_value_t = SessionType::Mixed)]
        session: SessionType,
        /// The maximum number of cards in the session.
        #[arg(long)]
        max_cards: Option<usize>,
        /// The maximum number of new cards in the session.
        #[arg(long)]
        max_new: Option<usize>,
        /// The port to use for the web server.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Whether to open the browser automatically.
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        open_browser: bool,
    },
    /// Check the integrity of a collection.
    Check {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Print progress statistics for each deck as JSON.
    Stats {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Print the review streak and a calendar of recent activity as JSON.
    Activity {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// How many days to include, ending today.
        #[arg(long, default_value_t = DEFAULT_DAYS)]
        days: u64,
    },
    /// Export all progress and activity as JSON.
    Export {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            directory,
            deck,
            session,
            max_cards,
            max_new,
            port,
            open_browser,
        } => {
            let options = DrillOptions {
                deck,
                session_type: session,
                limits: SessionLimits { max_cards, max_new },
                port,
                open_browser,
            };
            start_server(directory, options, Timestamp::now()).await
        }
        Command::Check { directory } => check_collection(directory),
        Command::Stats { directory } => print_collection_stats(directory, Timestamp::now()),
        Command::Activity { directory, days } => print_activity(directory, days, Timestamp::now()),
        Command::Export { directory } => export_collection(directory),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_definition() {
        Command::command().debug_assert();
    }

    #[test]
    fn test_drill_defaults() {
        let cli = Command::parse_from(["scenecards", "drill"]);
        match cli {
            Command::Drill {
                directory,
                deck,
                session,
                max_cards,
                max_new,
                port,
                open_browser,
            } => {
                assert_eq!(directory, None);
                assert_eq!(deck, Deck::Vocabulary);
                assert_eq!(session, SessionType::Mixed);
                assert_eq!(max_cards, None);
                assert_eq!(max_new, None);
                assert_eq!(port, 8000);
                assert!(open_browser);
            }
            _ => panic!("expected the drill command"),
        }
    }

    #[test]
    fn test_drill_flags() {
        let cli = Command::parse_from([
            "scenecards",
            "drill",
            "words",
            "--deck",
            "etymology",
            "--session",
            "review-only",
            "--max-new",
            "5",
            "--open-browser",
            "false",
        ]);
        match cli {
            Command::Drill {
                directory,
                deck,
                session,
                max_new,
                open_browser,
                ..
            } => {
                assert_eq!(directory, Some("words".to_string()));
                assert_eq!(deck, Deck::Etymology);
                assert_eq!(session, SessionType::ReviewOnly);
                assert_eq!(max_new, Some(5));
                assert!(!open_browser);
            }
            _ => panic!("expected the drill command"),
        }
    }
}
