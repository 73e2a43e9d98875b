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

use crate::collection::Collection;
use crate::content::Deck;
use crate::error::Fallible;
use crate::store::ActivityStore;
use crate::store::ProgressStore;
use crate::types::activity::DailyActivity;
use crate::types::progress::ProgressRecord;
use crate::types::progress::Status;

pub fn export_collection(directory: Option<String>) -> Fallible<()> {
    let coll: Collection = Collection::new(directory)?;
    let export: Export = get_export(&coll)?;
    let json: String = serde_json::to_string_pretty(&export)?;
    println!("{json}");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Export {
    progress: Vec<ProgressExport>,
    activity: Vec<DailyActivity>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressExport {
    deck: Deck,
    status: Status,
    #[serde(flatten)]
    record: ProgressRecord,
}

fn get_export(coll: &Collection) -> Fallible<Export> {
    let mut progress: Vec<ProgressExport> = Vec::new();
    for deck in Deck::all() {
        for record in coll.db.progress(deck).all_progress()? {
            progress.push(ProgressExport {
                deck,
                status: record.status(),
                record,
            });
        }
    }
    let activity = coll.db.all_activity()?;
    Ok(Export { progress, activity })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_copy_of_test_directory;
    use crate::types::item_id::ItemId;
    use crate::types::timestamp::Timestamp;

    #[test]
    fn test_export() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        let coll = Collection::new(Some(directory))?;
        let now = Timestamp::now();
        let mut table = coll.db.progress(Deck::Etymology);
        table.upsert_progress(&ProgressRecord::new(ItemId::from("etym-salary"), now))?;

        let export = get_export(&coll)?;
        assert_eq!(export.progress.len(), 1);
        assert!(export.activity.is_empty());

        let json = serde_json::to_value(&export)?;
        let first = &json["progress"][0];
        assert_eq!(first["deck"], "etymology");
        assert_eq!(first["itemId"], "etym-salary");
        assert_eq!(first["status"], "learning");
        assert_eq!(first["easeFactor"], 2.5);
        Ok(())
    }
}
