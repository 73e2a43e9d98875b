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

//! The SM-2 spaced repetition algorithm.

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Serialize;

use crate::types::timestamp::Timestamp;

/// The ease factor of an item that has never been reviewed.
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// The ease factor never drops below this.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// How well the user recalled an item.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Quality {
    NoClue,
    HadAHunch,
    KnewIt,
}

impl Quality {
    /// The rating on SM-2's 0-5 scale. Only `NoClue` falls below the passing
    /// score of 3.
    pub fn score(self) -> f64 {
        match self {
            Quality::NoClue => 2.0,
            Quality::HadAHunch => 3.0,
            Quality::KnewIt => 5.0,
        }
    }

    pub fn passed(self) -> bool {
        self.score() >= 3.0
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Quality::NoClue => "no_clue",
            Quality::HadAHunch => "had_a_hunch",
            Quality::KnewIt => "knew_it",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Quality::NoClue => "No clue",
            Quality::HadAHunch => "Had a hunch",
            Quality::KnewIt => "Knew it",
        }
    }
}

impl Display for Quality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The scheduling state produced by a review.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Schedule {
    pub ease_factor: f64,
    pub interval: u32,
    pub repetitions: u32,
    pub next_review_date: Timestamp,
}

/// Compute an item's next scheduling state from a rating and its current
/// state.
///
/// # Panics
///
/// If `ease_factor` is below [`MIN_EASE_FACTOR`]. Persisted state never
/// holds such a value, so seeing one means the store is corrupt.
pub fn compute_next(
    quality: Quality,
    ease_factor: f64,
    interval: u32,
    repetitions: u32,
    now: Timestamp,
) -> Schedule {
    assert!(
        ease_factor >= MIN_EASE_FACTOR,
        "ease factor {ease_factor} is below the minimum of {MIN_EASE_FACTOR}"
    );
    let q = quality.score();
    let ease_factor = (ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02)))
        .max(MIN_EASE_FACTOR);
    let (interval, repetitions) = if quality.passed() {
        let repetitions = repetitions + 1;
        let interval = match repetitions {
            1 => 1,
            2 => 6,
            _ => (f64::from(interval) * ease_factor).round() as u32,
        };
        (interval, repetitions)
    } else {
        // Start the ladder again, but keep the ease factor.
        (1, 0)
    };
    Schedule {
        ease_factor,
        interval,
        repetitions,
        next_review_date: now.add_days(interval),
    }
}
