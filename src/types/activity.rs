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

use crate::types::date::Date;

/// Review counts for one local calendar day.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    pub date: Date,
    /// Number of ratings given that day.
    pub items_reviewed: u32,
    /// Number of ratings that created a progress record.
    pub items_learned: u32,
}

impl DailyActivity {
    pub fn new(date: Date) -> Self {
        Self {
            date,
            items_reviewed: 0,
            items_learned: 0,
        }
    }
}
