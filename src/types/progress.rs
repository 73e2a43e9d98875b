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

use crate::sm2::INITIAL_EASE_FACTOR;
use crate::sm2::Schedule;
use crate::types::item_id::ItemId;
use crate::types::timestamp::Timestamp;

/// Minimum streak of successful reviews for an item to count as mastered.
const MASTERY_REPETITIONS: u32 = 3;

/// Minimum interval, in days, for an item to count as mastered.
const MASTERY_INTERVAL: u32 = 21;

/// Learning status of an item.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The item has never been rated, so it has no progress record.
    New,
    /// The item has a progress record but is not yet mastered.
    Learning,
    /// At least three consecutive passes and an interval of three weeks or
    /// more.
    Mastered,
}

impl Status {
    pub fn of(record: Option<&ProgressRecord>) -> Self {
        match record {
            None => Status::New,
            Some(record) => record.status(),
        }
    }
}

/// Spaced repetition state for a single item. Created the first time the
/// item is rated.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub item_id: ItemId,
    pub ease_factor: f64,
    /// Days until the next review.
    pub interval: u32,
    /// Consecutive passing ratings.
    pub repetitions: u32,
    pub next_review_date: Timestamp,
    pub date_first_seen: Timestamp,
    pub last_review_date: Timestamp,
}

impl ProgressRecord {
    pub fn new(item_id: ItemId, now: Timestamp) -> Self {
        Self {
            item_id,
            ease_factor: INITIAL_EASE_FACTOR,
            interval: 0,
            repetitions: 0,
            next_review_date: now,
            date_first_seen: now,
            last_review_date: now,
        }
    }

    pub fn status(&self) -> Status {
        if self.repetitions >= MASTERY_REPETITIONS && self.interval >= MASTERY_INTERVAL {
            Status::Mastered
        } else {
            Status::Learning
        }
    }

    /// Whether the item is due at some point during the local day of `now`,
    /// or overdue.
    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_review_date < now.start_of_tomorrow()
    }

    /// Store the result of a review taken at `now`. `date_first_seen` is
    /// never touched.
    pub fn apply(&mut self, schedule: &Schedule, now: Timestamp) {
        self.ease_factor = schedule.ease_factor;
        self.interval = schedule.interval;
        self.repetitions = schedule.repetitions;
        self.next_review_date = schedule.next_review_date;
        self.last_review_date = now;
    }
}
