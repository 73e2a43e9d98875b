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

use std::collections::BTreeMap;
use std::collections::HashSet;

use crate::error::Fallible;
use crate::store::ActivityStore;
use crate::store::ProgressStore;
use crate::types::activity::DailyActivity;
use crate::types::date::Date;
use crate::types::item_id::ItemId;
use crate::types::progress::ProgressRecord;
use crate::types::timestamp::Timestamp;

/// A store that keeps everything in memory. Records are kept ordered by key
/// so queries return them in a stable order.
#[derive(Default)]
pub struct MemoryStore {
    progress: BTreeMap<ItemId, ProgressRecord>,
    activity: BTreeMap<Date, DailyActivity>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn get_progress(&self, item_id: &ItemId) -> Fallible<Option<ProgressRecord>> {
        Ok(self.progress.get(item_id).cloned())
    }

    fn upsert_progress(&mut self, record: &ProgressRecord) -> Fallible<()> {
        match self.progress.get_mut(&record.item_id) {
            Some(existing) => {
                let date_first_seen = existing.date_first_seen;
                *existing = ProgressRecord {
                    date_first_seen,
                    ..record.clone()
                };
            }
            None => {
                self.progress.insert(record.item_id.clone(), record.clone());
            }
        }
        Ok(())
    }

    fn due_before(&self, cutoff: Timestamp) -> Fallible<Vec<ProgressRecord>> {
        Ok(self
            .progress
            .values()
            .filter(|record| record.next_review_date < cutoff)
            .cloned()
            .collect())
    }

    fn progress_ids(&self) -> Fallible<HashSet<ItemId>> {
        Ok(self.progress.keys().cloned().collect())
    }

    fn all_progress(&self) -> Fallible<Vec<ProgressRecord>> {
        Ok(self.progress.values().cloned().collect())
    }
}

impl ActivityStore for MemoryStore {
    fn get_activity(&self, date: Date) -> Fallible<Option<DailyActivity>> {
        Ok(self.activity.get(&date).cloned())
    }

    fn upsert_activity(&mut self, activity: &DailyActivity) -> Fallible<()> {
        self.activity.insert(activity.date, activity.clone());
        Ok(())
    }

    fn all_activity(&self) -> Fallible<Vec<DailyActivity>> {
        Ok(self.activity.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_keeps_first_seen() -> Fallible<()> {
        let mut store = MemoryStore::new();
        let first = Timestamp::local(2026, 3, 1, 9, 0);
        let later = Timestamp::local(2026, 3, 5, 9, 0);
        let record = ProgressRecord::new(ItemId::from("a"), first);
        store.upsert_progress(&record)?;
        let replacement = ProgressRecord {
            interval: 6,
            repetitions: 2,
            ..ProgressRecord::new(ItemId::from("a"), later)
        };
        store.upsert_progress(&replacement)?;
        let stored = store.get_progress(&ItemId::from("a"))?;
        let stored = stored.expect("record exists");
        assert_eq!(stored.date_first_seen, first);
        assert_eq!(stored.interval, 6);
        assert_eq!(store.progress_ids()?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_due_before_is_strict() -> Fallible<()> {
        let mut store = MemoryStore::new();
        let cutoff = Timestamp::local(2026, 3, 11, 0, 0);
        store.upsert_progress(&ProgressRecord::new(ItemId::from("a"), cutoff))?;
        store.upsert_progress(&ProgressRecord::new(
            ItemId::from("b"),
            Timestamp::local(2026, 3, 10, 23, 0),
        ))?;
        let due = store.due_before(cutoff)?;
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].item_id, ItemId::from("b"));
        Ok(())
    }
}
