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

use std::env::current_dir;
use std::path::PathBuf;
use std::time::Instant;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::content::Deck;
use crate::content::etymology::EtymologyEntry;
use crate::content::etymology::EtymologyWord;
use crate::content::load::load_catalog;
use crate::content::vocabulary::VocabularyEntry;
use crate::content::vocabulary::VocabularyWord;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::store::sqlite::Database;

pub const DATABASE_FILE_NAME: &str = "scenecards.db";

/// A collection directory: both catalogs, the settings, and the database.
pub struct Collection {
    pub directory: PathBuf,
    pub db: Database,
    pub vocabulary: Catalog<VocabularyWord>,
    pub etymology: Catalog<EtymologyWord>,
    pub config: Config,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };

        let config = Config::load(&directory)?;

        let (vocabulary, etymology) = {
            log::debug!("Loading catalogs...");
            let start = Instant::now();
            let vocabulary = load_catalog::<VocabularyEntry, VocabularyWord>(
                &directory.join(Deck::Vocabulary.as_str()),
            )?;
            let etymology = load_catalog::<EtymologyEntry, EtymologyWord>(
                &directory.join(Deck::Etymology.as_str()),
            )?;
            let duration = start.elapsed().as_millis();
            log::debug!(
                "Loaded {} words and {} etymologies in {duration}ms.",
                vocabulary.len(),
                etymology.len()
            );
            (vocabulary, etymology)
        };

        let db_path: PathBuf = directory.join(DATABASE_FILE_NAME);
        let db_path: &str = db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?;
        let db: Database = Database::new(db_path)?;

        Ok(Self {
            directory,
            db,
            vocabulary,
            etymology,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_copy_of_test_directory;

    #[test]
    fn test_non_existent_directory() {
        let result = Collection::new(Some("./derpherp".to_string()));
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("error: directory does not exist.".to_string())
        );
    }

    #[test]
    fn test_test_directory() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        let coll = Collection::new(Some(directory))?;
        assert_eq!(coll.vocabulary.len(), 3);
        assert_eq!(coll.etymology.len(), 2);
        assert!(coll.directory.join(DATABASE_FILE_NAME).exists());
        Ok(())
    }
}
