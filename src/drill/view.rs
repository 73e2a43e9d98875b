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

use maud::Markup;
use maud::PreEscaped;
use maud::html;

use crate::catalog::LearnableItem;
use crate::content::etymology::EtymologyWord;
use crate::content::vocabulary::VocabularyWord;
use crate::markdown::markdown_to_html;
use crate::markdown::markdown_to_html_inline;

/// An item that can be shown as a two-sided card in the drill.
pub trait Flashcard: LearnableItem + Clone + Send + Sync + 'static {
    /// What the learner sees before revealing.
    fn front(&self, context_index: usize) -> Markup;

    fn back(&self, context_index: usize) -> Markup;
}

impl Flashcard for VocabularyWord {
    fn front(&self, context_index: usize) -> Markup {
        let scenario = markdown_to_html(self.scenario(context_index), Some(&self.word));
        html! {
            div.scenario .rich-text {
                (PreEscaped(scenario))
            }
            p.prompt {
                "What does " strong { (self.word) } " mean here?"
            }
        }
    }

    fn back(&self, _context_index: usize) -> Markup {
        let definition = markdown_to_html_inline(&self.definition, None);
        html! {
            div.definition {
                p.headword {
                    strong { (self.word) }
                    @if let Some(pronunciation) = &self.pronunciation {
                        " " span.pronunciation { "(" (pronunciation) ")" }
                    }
                    " " em.part-of-speech { (self.part_of_speech) }
                }
                p.rich-text { (PreEscaped(definition)) }
                @if let Some(etymology) = &self.etymology {
                    p.etymology { (etymology) }
                }
            }
        }
    }
}

impl Flashcard for EtymologyWord {
    fn front(&self, _context_index: usize) -> Markup {
        let intro = markdown_to_html(&self.casual_intro, Some(&self.word));
        html! {
            div.intro .rich-text {
                (PreEscaped(intro))
            }
            p.prompt {
                "Where does " strong { (self.word) } " come from?"
            }
        }
    }

    fn back(&self, _context_index: usize) -> Markup {
        let story = markdown_to_html(&self.origin_story, None);
        html! {
            div.origin {
                dl {
                    dt { "Origin" }
                    dd { (self.origin_language) }
                    dt { "Breakdown" }
                    dd { (self.breakdown) }
                    dt { "Literally" }
                    dd { "\u{201C}" (self.literal_meaning) "\u{201D}" }
                }
                div.story .rich-text { (PreEscaped(story)) }
            }
        }
    }
}
