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

use crate::content::Deck;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::session::SessionLimits;

pub const CONFIG_FILE_NAME: &str = "scenecards.toml";

/// Per-collection settings, read from `scenecards.toml` when present.
///
/// ```toml
/// [vocabulary]
/// max_cards = 10
/// max_new = 3
///
/// [etymology]
/// max_cards = 5
/// ```
#[derive(Default, PartialEq, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub vocabulary: SessionLimits,
    #[serde(default)]
    pub etymology: SessionLimits,
}

impl Config {
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = read_to_string(&path)?;
        toml::from_str(&contents)
            .map_err(|e| ErrorReport::new(format!("{}: {e}", path.display())))
    }

    pub fn limits(&self, deck: Deck) -> SessionLimits {
        match deck {
            Deck::Vocabulary => self.vocabulary,
            Deck::Etymology => self.etymology,
        }
    }
}

impl SessionLimits {
    /// Take each limit from `overrides` when it is set there.
    pub fn overridden_by(self, overrides: SessionLimits) -> SessionLimits {
        SessionLimits {
            max_cards: overrides.max_cards.or(self.max_cards),
            max_new: overrides.max_new.or(self.max_new),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_file_is_default() -> Fallible<()> {
        let dir = tempdir()?;
        assert_eq!(Config::load(dir.path())?, Config::default());
        Ok(())
    }

    #[test]
    fn test_load() -> Fallible<()> {
        let dir = tempdir()?;
        write(
            dir.path().join(CONFIG_FILE_NAME),
            "[vocabulary]\nmax_cards = 10\nmax_new = 3\n",
        )?;
        let config = Config::load(dir.path())?;
        assert_eq!(
            config.limits(Deck::Vocabulary),
            SessionLimits {
                max_cards: Some(10),
                max_new: Some(3),
            }
        );
        assert_eq!(config.limits(Deck::Etymology), SessionLimits::default());
        Ok(())
    }

    #[test]
    fn test_unknown_keys_are_rejected() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join(CONFIG_FILE_NAME), "[vocabulary]\nmax_cardz = 1\n")?;
        assert!(Config::load(dir.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_overrides() {
        let base = SessionLimits {
            max_cards: Some(10),
            max_new: Some(3),
        };
        let overrides = SessionLimits {
            max_cards: None,
            max_new: Some(5),
        };
        assert_eq!(
            base.overridden_by(overrides),
            SessionLimits {
                max_cards: Some(10),
                max_new: Some(5),
            }
        );
    }
}
