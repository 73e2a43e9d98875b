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

/// A vocabulary word as written in a deck file.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VocabularyEntry {
    id: Option<String>,
    word: String,
    pronunciation: Option<String>,
    definition: String,
    etymology: Option<String>,
    part_of_speech: String,
    scenarios: Vec<String>,
}

/// A word with its definition and one or more short scenarios that use it.
#[derive(Clone, PartialEq, Debug)]
pub struct VocabularyWord {
    id: ItemId,
    pub word: String,
    pub pronunciation: Option<String>,
    pub definition: String,
    /// A short note on where the word comes from.
    pub etymology: Option<String>,
    pub part_of_speech: String,
    pub scenarios: Vec<String>,
}

impl VocabularyWord {
    /// The scenario for a context index, wrapping around.
    pub fn scenario(&self, index: usize) -> &str {
        &self.scenarios[index % self.scenarios.len()]
    }
}

impl TryFrom<VocabularyEntry> for VocabularyWord {
    type Error = ErrorReport;

    fn try_from(entry: VocabularyEntry) -> Result<Self, Self::Error> {
        let word = entry.word.trim().to_string();
        if word.is_empty() {
            return fail("vocabulary word is empty.");
        }
        let scenarios: Vec<String> = entry
            .scenarios
            .into_iter()
            .filter(|scenario| !scenario.trim().is_empty())
            .collect();
        if scenarios.is_empty() {
            return fail(format!("vocabulary word '{word}' has no scenarios."));
        }
        let id = match entry.id {
            Some(id) => id,
            None => word.to_lowercase(),
        };
        Ok(Self {
            id: ItemId::new(id),
            word,
            pronunciation: entry.pronunciation,
            definition: entry.definition,
            etymology: entry.etymology,
            part_of_speech: entry.part_of_speech,
            scenarios,
        })
    }
}

impl LearnableItem for VocabularyWord {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn context_count(&self) -> usize {
        self.scenarios.len()
    }
}
