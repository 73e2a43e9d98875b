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

//! Per-day review counts and the streak derived from them.

use std::collections::HashMap;
use std::collections::HashSet;

use serde::Serialize;

use crate::error::Fallible;
use crate::store::ActivityStore;
use crate::types::activity::DailyActivity;
use crate::types::date::Date;
use crate::types::timestamp::Timestamp;

/// Count one rating against the local day of `now`. `is_new_item` is true
/// when the rating created the item's progress record.
pub fn record_review<A: ActivityStore>(
    store: &mut A,
    is_new_item: bool,
    now: Timestamp,
) -> Fallible<DailyActivity> {
    let today = now.local_date();
    let mut activity = match store.get_activity(today)? {
        Some(activity) => activity,
        None => DailyActivity::new(today),
    };
    activity.items_reviewed += 1;
    if is_new_item {
        activity.items_learned += 1;
    }
    store.upsert_activity(&activity)?;
    Ok(activity)
}

/// The number of consecutive active days ending today, or ending yesterday
/// if nothing has been reviewed yet today. Zero if neither day was active.
pub fn current_streak(records: &[DailyActivity], now: Timestamp) -> usize {
    let active: HashSet<Date> = records
        .iter()
        .filter(|record| record.items_reviewed > 0)
        .map(|record| record.date)
        .collect();
    let today = now.local_date();
    let mut day = if active.contains(&today) {
        today
    } else if active.contains(&today.pred()) {
        today.pred()
    } else {
        return 0;
    };
    let mut streak = 0;
    while active.contains(&day) {
        streak += 1;
        day = day.pred();
    }
    streak
}

pub fn total_reviewed(records: &[DailyActivity]) -> u64 {
    records
        .iter()
        .map(|record| u64::from(record.items_reviewed))
        .sum()
}

/// One cell of an activity calendar.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatMapDay {
    pub date: Date,
    pub items_reviewed: u32,
    /// Intensity from 0 (no activity) to 4 (close to the busiest day).
    pub level: u8,
}

/// The last `days` local days ending today, oldest first.
pub fn heat_map(records: &[DailyActivity], now: Timestamp, days: u64) -> Vec<HeatMapDay> {
    let by_date: HashMap<Date, u32> = records
        .iter()
        .map(|record| (record.date, record.items_reviewed))
        .collect();
    let busiest = records
        .iter()
        .map(|record| record.items_reviewed)
        .max()
        .unwrap_or(1)
        .max(1);
    let today = now.local_date();
    (0..days)
        .rev()
        .map(|offset| {
            let date = today.sub_days(offset);
            let items_reviewed = by_date.get(&date).copied().unwrap_or(0);
            HeatMapDay {
                date,
                items_reviewed,
                level: intensity(items_reviewed, busiest),
            }
        })
        .collect()
}

fn intensity(count: u32, busiest: u32) -> u8 {
    if count == 0 {
        return 0;
    }
    let ratio = f64::from(count) / f64::from(busiest);
    if ratio < 0.25 {
        1
    } else if ratio < 0.5 {
        2
    } else if ratio < 0.75 {
        3
    } else {
        4
    }
}
