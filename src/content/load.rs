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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use walkdir::WalkDir;

use crate::catalog::Catalog;
use crate::catalog::LearnableItem;
use crate::error::ErrorReport;
use crate::error::Fallible;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DeckFile<E> {
    #[serde(default = "Vec::new")]
    words: Vec<E>,
}

/// Load every `*.toml` file under `directory` into a catalog. A missing
/// directory is an empty catalog.
pub fn load_catalog<E, I>(directory: &Path) -> Fallible<Catalog<I>>
where
    E: DeserializeOwned,
    I: LearnableItem + TryFrom<E, Error = ErrorReport>,
{
    let mut items = Vec::new();
    if directory.exists() {
        for entry in WalkDir::new(directory).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
                let contents = read_to_string(path)?;
                let file: DeckFile<E> = toml::from_str(&contents)
                    .map_err(|e| ErrorReport::new(format!("{}: {e}", path.display())))?;
                for entry in file.words {
                    items.push(I::try_from(entry)?);
                }
            }
        }
    }
    Catalog::new(items)
}
