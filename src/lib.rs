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

//! Pass/fail autograding for spaced repetition.
//!
//! The user only ever answers "Pass" or "Fail". A failure is graded `Again`.
//! A pass is refined into `Hard`, `Good` or `Easy` by comparing the time spent
//! on the review against the card's past review times, unless the card's deck
//! is excluded by the configured policy.

pub mod cli;
pub mod cmd;
pub mod collection;
pub mod config;
pub mod db;
pub mod diagnostics;
pub mod error;
pub mod resolver;
pub mod stats;
pub mod types;

pub use config::Mode;
pub use config::PolicyConfig;
pub use diagnostics::Diagnostics;
pub use error::ErrorReport;
pub use error::Fallible;
pub use resolver::GradeResolver;
pub use resolver::resolve_grade;
pub use types::card::Card;
pub use types::grade::Answer;
pub use types::grade::Grade;
pub use types::review::ReviewRecord;
