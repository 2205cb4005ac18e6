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

use crate::error::Fallible;
use crate::types::card::CardId;
use crate::types::grade::Grade;

/// One logged past review of a card.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ReviewRecord {
    pub grade: Grade,
    /// Time spent answering, in milliseconds.
    pub elapsed_ms: u64,
}

impl ReviewRecord {
    pub fn new(grade: Grade, elapsed_ms: u64) -> Self {
        Self { grade, elapsed_ms }
    }

    /// A review counts as passing unless it was graded `Again`. `Hard`
    /// reviews are passing.
    pub fn is_passing(&self) -> bool {
        self.grade != Grade::Again
    }
}

/// Source of a card's review history. Order of the returned records is not
/// significant.
pub trait HistorySource {
    fn query_history(&self, card_id: CardId) -> Fallible<Vec<ReviewRecord>>;
}
