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

use serde::Deserialize;

use crate::catalog::LearnableItem;
use crate::error::ErrorReport;
use crate::error::fail;
use crate::types::item_id::ItemId;

/// An etymology as written in a deck file.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EtymologyEntry {
    id: Option<String>,
    word: String,
    casual_intro: String,
    origin_language: String,
    breakdown: String,
    literal_meaning: String,
    origin_story: String,
}

/// A common word with a surprising origin.
#[derive(Clone, PartialEq, Debug)]
pub struct EtymologyWord {
    id: ItemId,
    pub word: String,
    pub casual_intro: String,
    pub origin_language: String,
    /// Root words, e.g. "sophos (wise) + moros (fool)".
    pub breakdown: String,
    pub literal_meaning: String,
    pub origin_story: String,
}

impl TryFrom<EtymologyEntry> for EtymologyWord {
    type Error = ErrorReport;

    fn try_from(entry: EtymologyEntry) -> Result<Self, Self::Error> {
        let word = entry.word.trim().to_string();
        if word.is_empty() {
            return fail("etymology word is empty.");
        }
        let id = match entry.id {
            Some(id) => id,
            None => word.to_lowercase(),
        };
        Ok(Self {
            id: ItemId::new(id),
            word,
            casual_intro: entry.casual_intro,
            origin_language: entry.origin_language,
            breakdown: entry.breakdown,
            literal_meaning: entry.literal_meaning,
            origin_story: entry.origin_story,
        })
    }
}

impl LearnableItem for EtymologyWord {
    fn id(&self) -> &ItemId {
        &self.id
    }
}
