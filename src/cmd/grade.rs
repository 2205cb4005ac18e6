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
use crate::diagnostics::StderrNotifier;
use crate::error::Fallible;
use crate::resolver::GradeResolver;
use crate::types::card::CardId;
use crate::types::grade::Answer;
use crate::types::grade::Grade;
use crate::types::timestamp::Timestamp;

pub fn grade_card(
    args: &CollectionArgs,
    card_id: CardId,
    answer: Answer,
    time_ms: u64,
) -> Fallible<()> {
    let grade = answer_card(args, card_id, answer, time_ms)?;
    println!("{grade}");
    Ok(())
}

/// Resolve the grade for an answer and append it to the review log.
fn answer_card(
    args: &CollectionArgs,
    card_id: CardId,
    answer: Answer,
    time_ms: u64,
) -> Fallible<Grade> {
    let collection = args.open()?;
    let policy = collection.policy(Box::new(StderrNotifier))?;
    let resolver = GradeResolver::new(policy, Box::new(StderrNotifier));
    let card = collection.db.get_card(card_id, time_ms)?;
    let grade = resolver.resolve(answer, &card, &collection.db)?;
    collection
        .db
        .record_review(card.id, grade, time_ms, Timestamp::now())?;
    Ok(grade)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::testing::temp_collection;
    use crate::types::review::HistorySource;

    fn seed(args: &CollectionArgs, deck: &str, times: &[u64]) -> Fallible<CardId> {
        let collection = args.open()?;
        let deck_id = collection.db.add_deck(deck)?;
        let card_id = collection.db.add_card(deck_id)?;
        for ms in times {
            collection
                .db
                .record_review(card_id, Grade::Good, *ms, Timestamp::now())?;
        }
        Ok(card_id)
    }

    const TIMES: [u64; 5] = [1000, 1200, 1100, 1300, 900];

    #[test]
    fn test_grades_and_records() -> Fallible<()> {
        let (_dir, args) = temp_collection("")?;
        let card = seed(&args, "Default", &TIMES)?;
        assert_eq!(answer_card(&args, card, Answer::Pass, 900)?, Grade::Easy);
        let history = args.open()?.db.query_history(card)?;
        assert_eq!(history.len(), 6);
        assert!(history.iter().any(|r| r.grade == Grade::Easy && r.elapsed_ms == 900));
        Ok(())
    }

    #[test]
    fn test_fail() -> Fallible<()> {
        let (_dir, args) = temp_collection("")?;
        let card = seed(&args, "Default", &TIMES)?;
        assert_eq!(answer_card(&args, card, Answer::Fail, 900)?, Grade::Again);
        Ok(())
    }

    #[test]
    fn test_blacklisted_deck() -> Fallible<()> {
        let (_dir, args) = temp_collection("mode = \"exclude\"\ndecks = [\"Cram\"]\n")?;
        let card = seed(&args, "Cram", &TIMES)?;
        assert_eq!(answer_card(&args, card, Answer::Pass, 900)?, Grade::Good);
        Ok(())
    }

    #[test]
    fn test_invalid_mode_aborts() -> Fallible<()> {
        let (_dir, args) = temp_collection("mode = \"sometimes\"\n")?;
        let card = seed(&args, "Default", &TIMES)?;
        assert!(answer_card(&args, card, Answer::Pass, 900).is_err());
        let history = args.open()?.db.query_history(card)?;
        assert_eq!(history.len(), 5);
        Ok(())
    }

    #[test]
    fn test_unresolved_deck_is_not_fatal() -> Fallible<()> {
        let (_dir, args) = temp_collection("mode = \"whitelist\"\ndecks = [\"Default\", \"Ghost\"]\n")?;
        let card = seed(&args, "Default", &TIMES)?;
        assert_eq!(answer_card(&args, card, Answer::Pass, 1400)?, Grade::Hard);
        Ok(())
    }

    #[test]
    fn test_unknown_card() -> Fallible<()> {
        let (_dir, args) = temp_collection("")?;
        assert!(answer_card(&args, CardId::new(1), Answer::Pass, 900).is_err());
        Ok(())
    }
}
