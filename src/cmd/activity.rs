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

use crate::activity::HeatMapDay;
use crate::activity::current_streak;
use crate::activity::heat_map;
use crate::activity::total_reviewed;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::store::ActivityStore;
use crate::types::timestamp::Timestamp;

/// Thirteen weeks.
pub const DEFAULT_DAYS: u64 = 91;

pub fn print_activity(directory: Option<String>, days: u64, now: Timestamp) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let report = activity_report(&coll, days, now)?;
    let json = serde_json::to_string_pretty(&report)?;
    println!("{json}");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActivityReport {
    streak: usize,
    total_reviewed: u64,
    days: Vec<HeatMapDay>,
}

fn activity_report(coll: &Collection, days: u64, now: Timestamp) -> Fallible<ActivityReport> {
    let records = coll.db.all_activity()?;
    Ok(ActivityReport {
        streak: current_streak(&records, now),
        total_reviewed: total_reviewed(&records),
        days: heat_map(&records, now, days),
    })
}
