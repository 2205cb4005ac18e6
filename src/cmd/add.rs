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
use crate::error::fail;
use crate::types::deck::DeckDirectory;

pub fn add_deck(args: &CollectionArgs, name: &str) -> Fallible<()> {
    let collection = args.open()?;
    let deck_id = collection.db.add_deck(name)?;
    println!("{deck_id}");
    Ok(())
}

pub fn add_card(args: &CollectionArgs, deck_name: &str) -> Fallible<()> {
    let collection = args.open()?;
    let deck_id = match collection.db.deck_id_for_name(deck_name)? {
        Some(id) => id,
        None => return fail(format!("deck {deck_name:?} does not exist.")),
    };
    let card_id = collection.db.add_card(deck_id)?;
    println!("{card_id}");
    Ok(())
}
