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
use crate::stats::ProgressOverview;
use crate::stats::overview;
use crate::types::timestamp::Timestamp;

pub fn print_collection_stats(directory: Option<String>, now: Timestamp) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let stats = collection_stats(&coll, now)?;
    let stats_json = serde_json::to_string_pretty(&stats)?;
    println!("{stats_json}");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    vocabulary: ProgressOverview,
    etymology: ProgressOverview,
}

fn collection_stats(coll: &Collection, now: Timestamp) -> Fallible<Stats> {
    Ok(Stats {
        vocabulary: overview(
            &coll.vocabulary,
            &coll.db.progress(Deck::Vocabulary),
            &coll.db,
            now,
        )?,
        etymology: overview(
            &coll.etymology,
            &coll.db.progress(Deck::Etymology),
            &coll.db,
            now,
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_copy_of_test_directory;

    #[test]
    fn test_fresh_collection() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        let coll = Collection::new(Some(directory))?;
        let stats = collection_stats(&coll, Timestamp::now())?;
        assert_eq!(stats.vocabulary.total, 3);
        assert_eq!(stats.vocabulary.new, 3);
        assert_eq!(stats.etymology.total, 2);
        assert_eq!(stats.etymology.new, 2);
        assert_eq!(stats.etymology.streak, 0);
        Ok(())
    }

    #[test]
    fn test_print() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        print_collection_stats(Some(directory), Timestamp::now())
    }
}
