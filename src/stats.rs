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

use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::review::ReviewRecord;

/// The minimum number of passing reviews needed before review times are
/// considered meaningful.
pub const MIN_PASSING_REVIEWS: usize = 5;

pub fn mean(values: &[f64]) -> Fallible<f64> {
    if values.is_empty() {
        return fail("mean requires at least one data point");
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation, with an `n - 1` divisor.
pub fn sample_stdev(values: &[f64]) -> Fallible<f64> {
    if values.len() < 2 {
        return fail("standard deviation requires at least two data points");
    }
    let mean = mean(values)?;
    let sum_sq: f64 = values.iter().map(|x| (x - mean) * (x - mean)).sum();
    Ok((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Distribution of past review times for a card.
#[derive(Clone, Copy, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingProfile {
    /// The number of passing reviews the profile is built from.
    pub count: usize,
    pub mean: f64,
    pub stdev: f64,
}

impl TimingProfile {
    /// Build a profile from the passing reviews in the history. Returns
    /// `None` if there are fewer than [`MIN_PASSING_REVIEWS`] of them.
    pub fn from_history(history: &[ReviewRecord]) -> Fallible<Option<Self>> {
        let times: Vec<f64> = history
            .iter()
            .filter(|r| r.is_passing())
            .map(|r| r.elapsed_ms as f64)
            .collect();
        if times.len() < MIN_PASSING_REVIEWS {
            return Ok(None);
        }
        Ok(Some(Self {
            count: times.len(),
            mean: mean(&times)?,
            stdev: sample_stdev(&times)?,
        }))
    }

    pub fn lower_bound(&self) -> f64 {
        self.mean - self.stdev
    }

    pub fn upper_bound(&self) -> f64 {
        self.mean + self.stdev
    }
}
