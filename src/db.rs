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
use rusqlite::config::DbConfig;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::card::CardId;
use crate::types::deck::DeckDirectory;
use crate::types::deck::DeckId;
use crate::types::grade::Grade;
use crate::types::review::HistorySource;
use crate::types::review::ReviewRecord;
use crate::types::timestamp::Timestamp;

/// The collection store: decks, cards, and the review log.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }

    /// Add a deck. Fails if a deck with this name already exists.
    pub fn add_deck(&self, name: &str) -> Fallible<DeckId> {
        if self.deck_id_for_name(name)?.is_some() {
            return fail(format!("deck {name:?} already exists."));
        }
        log::debug!("Adding deck: {name}");
        let sql = "insert into decks (name) values (?) returning deck_id;";
        let deck_id: DeckId = self.conn.query_row(sql, [name], |row| row.get(0))?;
        Ok(deck_id)
    }

    pub fn add_card(&self, deck_id: DeckId) -> Fallible<CardId> {
        log::debug!("Adding card to deck {deck_id}");
        let sql = "insert into cards (deck_id, added_at) values (?, ?) returning card_id;";
        let card_id: CardId =
            self.conn
                .query_row(sql, (deck_id, Timestamp::now()), |row| row.get(0))?;
        Ok(card_id)
    }

    /// Build a view of a card for the review in progress, which has so far
    /// taken `time_taken_ms`.
    pub fn get_card(&self, card_id: CardId, time_taken_ms: u64) -> Fallible<Card> {
        let sql = "select c.deck_id, (select count(*) from revlog r where r.card_id = c.card_id) from cards c where c.card_id = ?;";
        let row: Option<(DeckId, i64)> = self
            .conn
            .query_row(sql, [card_id], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()?;
        match row {
            Some((deck_id, reps)) => Ok(Card {
                id: card_id,
                deck_id,
                reps: usize::try_from(reps)
                    .map_err(|_| ErrorReport::new("invalid review count"))?,
                time_taken_ms,
            }),
            None => fail(format!("no card with id {card_id}.")),
        }
    }

    /// Append a review to the review log.
    pub fn record_review(
        &self,
        card_id: CardId,
        grade: Grade,
        elapsed_ms: u64,
        reviewed_at: Timestamp,
    ) -> Fallible<()> {
        let elapsed_ms =
            i64::try_from(elapsed_ms).map_err(|_| ErrorReport::new("elapsed time too large"))?;
        let sql = "insert into revlog (card_id, reviewed_at, grade, elapsed_ms) values (?, ?, ?, ?);";
        self.conn
            .execute(sql, (card_id, reviewed_at, grade, elapsed_ms))?;
        Ok(())
    }
}

impl DeckDirectory for Database {
    fn deck_id_for_name(&self, name: &str) -> Fallible<Option<DeckId>> {
        let sql = "select deck_id from decks where name = ?;";
        let deck_id: Option<DeckId> = self
            .conn
            .query_row(sql, [name], |row| row.get(0))
            .optional()?;
        Ok(deck_id)
    }
}

impl HistorySource for Database {
    fn query_history(&self, card_id: CardId) -> Fallible<Vec<ReviewRecord>> {
        let mut history = Vec::new();
        let mut stmt = self
            .conn
            .prepare("select grade, elapsed_ms from revlog where card_id = ?;")?;
        let mut rows = stmt.query([card_id])?;
        while let Some(row) = rows.next()? {
            let grade: Grade = row.get(0)?;
            let elapsed_ms: i64 = row.get(1)?;
            let elapsed_ms = u64::try_from(elapsed_ms)
                .map_err(|_| ErrorReport::new("negative elapsed time in review log"))?;
            history.push(ReviewRecord::new(grade, elapsed_ms));
        }
        Ok(history)
    }
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["revlog"], |row| row.get(0))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use tempfile::tempdir;

    use super::*;

    fn open() -> Fallible<(TempDir, Database)> {
        let dir = tempdir()?;
        let path = dir.path().join("passfail.db");
        let path = path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?
            .to_string();
        let db = Database::new(&path)?;
        Ok((dir, db))
    }

    #[test]
    fn test_decks() -> Fallible<()> {
        let (_dir, db) = open()?;
        let cram = db.add_deck("Cram")?;
        let kanji = db.add_deck("Japanese::Kanji")?;
        assert_ne!(cram, kanji);
        assert_eq!(db.deck_id_for_name("Cram")?, Some(cram));
        assert_eq!(db.deck_id_for_name("Japanese::Kanji")?, Some(kanji));
        assert_eq!(db.deck_id_for_name("cram")?, None);
        assert!(db.add_deck("Cram").is_err());
        Ok(())
    }

    #[test]
    fn test_history() -> Fallible<()> {
        let (_dir, db) = open()?;
        let deck = db.add_deck("Default")?;
        let card = db.add_card(deck)?;
        let other = db.add_card(deck)?;
        db.record_review(card, Grade::Good, 1000, Timestamp::now())?;
        db.record_review(card, Grade::Again, 300, Timestamp::now())?;
        db.record_review(other, Grade::Easy, 700, Timestamp::now())?;
        let mut history = db.query_history(card)?;
        history.sort_by_key(|r| r.elapsed_ms);
        assert_eq!(
            history,
            vec![
                ReviewRecord::new(Grade::Again, 300),
                ReviewRecord::new(Grade::Good, 1000),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_get_card() -> Fallible<()> {
        let (_dir, db) = open()?;
        let deck = db.add_deck("Default")?;
        let card_id = db.add_card(deck)?;
        assert_eq!(db.get_card(card_id, 1234)?.reps, 0);
        db.record_review(card_id, Grade::Hard, 2000, Timestamp::now())?;
        let card = db.get_card(card_id, 1234)?;
        assert_eq!(card.id, card_id);
        assert_eq!(card.deck_id, deck);
        assert_eq!(card.reps, 1);
        assert_eq!(card.time_taken_ms, 1234);
        assert!(db.get_card(CardId::new(9999), 0).is_err());
        Ok(())
    }

    #[test]
    fn test_card_requires_deck() -> Fallible<()> {
        let (_dir, db) = open()?;
        assert!(db.add_card(DeckId::new(77)).is_err());
        Ok(())
    }

    #[test]
    fn test_reopen() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("passfail.db");
        let path = path.to_str().ok_or_else(|| ErrorReport::new("invalid path"))?;
        {
            let db = Database::new(path)?;
            db.add_deck("Default")?;
        }
        let db = Database::new(path)?;
        assert!(db.deck_id_for_name("Default")?.is_some());
        Ok(())
    }
}
