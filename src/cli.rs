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

use crate::cmd::add::add_card;
use crate::cmd::add::add_deck;
use crate::cmd::check::check_config;
use crate::cmd::grade::grade_card;
use crate::cmd::stats::print_card_stats;
use crate::collection::CollectionArgs;
use crate::error::Fallible;
use crate::types::card::CardId;
use crate::types::grade::Answer;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Grade a pass/fail answer and record it in the review log.
    Grade {
        /// The card being answered.
        card_id: i64,
        /// The user's answer.
        #[arg(value_enum)]
        answer: Answer,
        /// Time spent on the review, in milliseconds.
        #[arg(long)]
        time: u64,
        #[command(flatten)]
        collection: CollectionArgs,
    },
    /// Resolve the configuration and print the result.
    Check {
        #[command(flatten)]
        collection: CollectionArgs,
    },
    /// Print a card's review time statistics.
    Stats {
        card_id: i64,
        #[command(flatten)]
        collection: CollectionArgs,
    },
    /// Create a deck.
    AddDeck {
        name: String,
        #[command(flatten)]
        collection: CollectionArgs,
    },
    /// Create a card in an existing deck.
    AddCard {
        /// The name of the deck.
        deck: String,
        #[command(flatten)]
        collection: CollectionArgs,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Grade {
            card_id,
            answer,
            time,
            collection,
        } => grade_card(&collection, CardId::new(card_id), answer, time),
        Command::Check { collection } => check_config(&collection),
        Command::Stats {
            card_id,
            collection,
        } => print_card_stats(&collection, CardId::new(card_id)),
        Command::AddDeck { name, collection } => add_deck(&collection, &name),
        Command::AddCard { deck, collection } => add_card(&collection, &deck),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Command::command().debug_assert();
    }

    #[test]
    fn test_parse_grade() {
        let cli = Command::try_parse_from(["passfail", "grade", "7", "pass", "--time", "1500"]);
        match cli {
            Ok(Command::Grade {
                card_id,
                answer,
                time,
                collection,
            }) => {
                assert_eq!(card_id, 7);
                assert_eq!(answer, Answer::Pass);
                assert_eq!(time, 1500);
                assert_eq!(collection.db.to_str(), Some("passfail.db"));
                assert_eq!(collection.config.to_str(), Some("passfail.toml"));
            }
            _ => panic!("expected a grade command"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_answer() {
        let cli = Command::try_parse_from(["passfail", "grade", "7", "meh", "--time", "1500"]);
        assert!(cli.is_err());
    }
}
