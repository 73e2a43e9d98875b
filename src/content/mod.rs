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

//! The two kinds of learnable content: vocabulary words and etymologies.

pub mod etymology;
pub mod load;
pub mod vocabulary;

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Serialize;

/// A deck is a catalog with its own, independent progress records.
#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Deck {
    /// Vocabulary words, shown in example scenarios.
    Vocabulary,
    /// Everyday words with surprising origins.
    Etymology,
}

impl Deck {
    pub fn all() -> [Deck; 2] {
        [Deck::Vocabulary, Deck::Etymology]
    }

    /// The deck's key in the database, and the name of the subdirectory its
    /// content is loaded from.
    pub fn as_str(self) -> &'static str {
        match self {
            Deck::Vocabulary => "vocabulary",
            Deck::Etymology => "etymology",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Deck::Vocabulary => "Vocabulary",
            Deck::Etymology => "Deeper Than You Knew",
        }
    }
}

impl Display for Deck {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
