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

//! The persistence boundary. The scheduling core only ever talks to these
//! two traits.

pub mod memory;
pub mod sqlite;

use std::collections::HashSet;

use crate::error::Fallible;
use crate::types::activity::DailyActivity;
use crate::types::date::Date;
use crate::types::item_id::ItemId;
use crate::types::progress::ProgressRecord;
use crate::types::timestamp::Timestamp;

pub trait ProgressStore {
    fn get_progress(&self, item_id: &ItemId) -> Fallible<Option<ProgressRecord>>;

    /// Insert the record, or replace the scheduling fields of the existing
    /// record for the same item.
    fn upsert_progress(&mut self, record: &ProgressRecord) -> Fallible<()>;

    /// All records whose next review date is strictly before `cutoff`.
    fn due_before(&self, cutoff: Timestamp) -> Fallible<Vec<ProgressRecord>>;

    /// The ids of all items that have a record.
    fn progress_ids(&self) -> Fallible<HashSet<ItemId>>;

    fn all_progress(&self) -> Fallible<Vec<ProgressRecord>>;
}

pub trait ActivityStore {
    fn get_activity(&self, date: Date) -> Fallible<Option<DailyActivity>>;

    fn upsert_activity(&mut self, activity: &DailyActivity) -> Fallible<()>;

    /// All records, oldest first.
    fn all_activity(&self) -> Fallible<Vec<DailyActivity>>;
}
