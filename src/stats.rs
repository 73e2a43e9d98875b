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

use std::collections::HashMap;

use serde::Serialize;

use crate::activity::current_streak;
use crate::activity::total_reviewed;
use crate::catalog::Catalog;
use crate::catalog::LearnableItem;
use crate::error::Fallible;
use crate::store::ActivityStore;
use crate::store::ProgressStore;
use crate::types::item_id::ItemId;
use crate::types::progress::ProgressRecord;
use crate::types::progress::Status;
use crate::types::timestamp::Timestamp;

/// How far along the learner is with one deck.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressOverview {
    pub total: usize,
    pub mastered: usize,
    pub learning: usize,
    pub new: usize,
    /// Items with a record that are due today or overdue.
    pub due: usize,
    pub total_reviewed: u64,
    pub streak: usize,
}

/// Progress records for items that are no longer in the catalog are not
/// counted. Review totals and the streak span every deck.
pub fn overview<I, P, A>(
    catalog: &Catalog<I>,
    progress: &P,
    activity: &A,
    now: Timestamp,
) -> Fallible<ProgressOverview>
where
    I: LearnableItem,
    P: ProgressStore,
    A: ActivityStore,
{
    let records: HashMap<ItemId, ProgressRecord> = progress
        .all_progress()?
        .into_iter()
        .map(|record| (record.item_id.clone(), record))
        .collect();
    let mut overview = ProgressOverview {
        total: catalog.len(),
        ..Default::default()
    };
    for item in catalog.items() {
        let record = records.get(item.id());
        if record.is_some_and(|record| record.is_due(now)) {
            overview.due += 1;
        }
        match Status::of(record) {
            Status::New => overview.new += 1,
            Status::Learning => overview.learning += 1,
            Status::Mastered => overview.mastered += 1,
        }
    }
    let days = activity.all_activity()?;
    overview.total_reviewed = total_reviewed(&days);
    overview.streak = current_streak(&days, now);
    Ok(overview)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::catalog;
    use crate::store::memory::MemoryStore;
    use crate::types::activity::DailyActivity;

    fn now() -> Timestamp {
        Timestamp::local(2026, 5, 2, 18, 30)
    }

    #[test]
    fn test_empty_store() -> Fallible<()> {
        let catalog = catalog(&["a", "b", "c"]);
        let store = MemoryStore::new();
        let overview = overview(&catalog, &store, &store, now())?;
        assert_eq!(
            overview,
            ProgressOverview {
                total: 3,
                new: 3,
                ..Default::default()
            }
        );
        Ok(())
    }

    #[test]
    fn test_counts_by_status() -> Fallible<()> {
        let catalog = catalog(&["a", "b", "c", "d"]);
        let mut store = MemoryStore::new();

        let learning = ProgressRecord::new(ItemId::from("a"), now());
        store.upsert_progress(&learning)?;

        let mut mastered = ProgressRecord::new(ItemId::from("b"), now());
        mastered.repetitions = 4;
        mastered.interval = 30;
        mastered.next_review_date = now().add_days(30);
        store.upsert_progress(&mastered)?;

        // Not in the catalog.
        let mut orphan = ProgressRecord::new(ItemId::from("zzz"), now());
        orphan.repetitions = 4;
        orphan.interval = 30;
        store.upsert_progress(&orphan)?;

        let today = now().local_date();
        store.upsert_activity(&DailyActivity {
            date: today,
            items_reviewed: 4,
            items_learned: 1,
        })?;
        store.upsert_activity(&DailyActivity {
            date: today.pred(),
            items_reviewed: 6,
            items_learned: 0,
        })?;

        let overview = overview(&catalog, &store, &store, now())?;
        assert_eq!(overview.total, 4);
        assert_eq!(overview.mastered, 1);
        assert_eq!(overview.learning, 1);
        assert_eq!(overview.new, 2);
        assert_eq!(overview.due, 1);
        assert_eq!(overview.total_reviewed, 10);
        assert_eq!(overview.streak, 2);
        Ok(())
    }
}
