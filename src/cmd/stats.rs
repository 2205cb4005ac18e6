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

use crate::collection::CollectionArgs;
use crate::error::Fallible;
use crate::stats::MIN_PASSING_REVIEWS;
use crate::stats::TimingProfile;
use crate::types::card::CardId;
use crate::types::review::HistorySource;

pub fn print_card_stats(args: &CollectionArgs, card_id: CardId) -> Fallible<()> {
    match card_profile(args, card_id)? {
        Some(profile) => {
            let json = serde_json::to_string_pretty(&profile)?;
            println!("{json}");
        }
        None => {
            println!(
                "Card {card_id} has fewer than {MIN_PASSING_REVIEWS} passing reviews; it is graded good on pass."
            );
        }
    }
    Ok(())
}

fn card_profile(args: &CollectionArgs, card_id: CardId) -> Fallible<Option<TimingProfile>> {
    let collection = args.open()?;
    // Fails if the card does not exist.
    let card = collection.db.get_card(card_id, 0)?;
    let history = collection.db.query_history(card.id)?;
    TimingProfile::from_history(&history)
}
