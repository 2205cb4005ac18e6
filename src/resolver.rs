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

//! Refines a "Pass" answer into `Hard`, `Good` or `Easy` by comparing the
//! time taken on the current review against the card's past review times.

use crate::config::PolicyConfig;
use crate::diagnostics::Diagnostics;
use crate::diagnostics::Notifier;
use crate::error::Fallible;
use crate::stats::MIN_PASSING_REVIEWS;
use crate::stats::TimingProfile;
use crate::types::card::Card;
use crate::types::grade::Answer;
use crate::types::grade::Grade;
use crate::types::review::HistorySource;
use crate::types::review::ReviewRecord;

/// Resolve the grade for an answer given the card's full review history.
pub fn resolve_grade(
    answer: Answer,
    card: &Card,
    history: &[ReviewRecord],
    policy: &PolicyConfig,
    diagnostics: &Diagnostics,
) -> Fallible<Grade> {
    match resolve_without_history(answer, card, policy, diagnostics) {
        Some(grade) => Ok(grade),
        None => grade_by_time(card, history, diagnostics),
    }
}

/// Resolves grades, loading review history only when it is needed.
pub struct GradeResolver {
    policy: PolicyConfig,
    diagnostics: Diagnostics,
}

impl GradeResolver {
    /// Notifications reach the user only if the policy is in debug mode.
    pub fn new(policy: PolicyConfig, notifier: Box<dyn Notifier>) -> Self {
        let diagnostics = Diagnostics::new(policy.is_debug_mode(), notifier);
        Self {
            policy,
            diagnostics,
        }
    }

    pub fn resolve(
        &self,
        answer: Answer,
        card: &Card,
        source: &dyn HistorySource,
    ) -> Fallible<Grade> {
        if let Some(grade) = resolve_without_history(answer, card, &self.policy, &self.diagnostics)
        {
            return Ok(grade);
        }
        let history = source.query_history(card.id)?;
        grade_by_time(card, &history, &self.diagnostics)
    }
}

/// The decisions that do not need the review history: failures pass through
/// unchanged, and cards in excluded decks are always `Good`.
fn resolve_without_history(
    answer: Answer,
    card: &Card,
    policy: &PolicyConfig,
    diagnostics: &Diagnostics,
) -> Option<Grade> {
    if answer == Answer::Fail {
        diagnostics.info(&format!("Card {} failed. Graded again.", card.id));
        return Some(Grade::Again);
    }
    if policy.is_excluded(card.deck_id) {
        diagnostics.info(&format!(
            "Card {} excluded from time-based grading due to {} settings. Graded good.",
            card.id,
            policy.mode()
        ));
        return Some(Grade::Good);
    }
    None
}

fn grade_by_time(
    card: &Card,
    history: &[ReviewRecord],
    diagnostics: &Diagnostics,
) -> Fallible<Grade> {
    log::debug!(
        "Card {}: {} reps, {} history records.",
        card.id,
        card.reps,
        history.len()
    );
    let profile = match TimingProfile::from_history(history)? {
        Some(profile) => profile,
        None => {
            diagnostics.info(&format!(
                "Card {} has fewer than {MIN_PASSING_REVIEWS} passing reviews. Graded good.",
                card.id
            ));
            return Ok(Grade::Good);
        }
    };
    let t = card.time_taken_ms as f64;
    let grade = if t <= profile.lower_bound() {
        Grade::Easy
    } else if t >= profile.upper_bound() {
        Grade::Hard
    } else {
        Grade::Good
    };
    diagnostics.info(&format!(
        "Card {}: took {}ms against {:.0}±{:.0}ms. Graded {grade}.",
        card.id, card.time_taken_ms, profile.mean, profile.stdev
    ));
    Ok(grade)
}
