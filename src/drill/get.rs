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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;

use crate::drill::state::MutableState;
use crate::drill::state::ServerState;
use crate::drill::template::page_template;
use crate::drill::view::Flashcard;
use crate::error::Fallible;
use crate::sm2::Quality;

pub async fn get_handler<I: Flashcard>(
    State(state): State<ServerState<I>>,
) -> (StatusCode, Html<String>) {
    match render_page(&state) {
        Ok(markup) => (StatusCode::OK, Html(markup.into_string())),
        Err(e) => {
            log::error!("{e}");
            (StatusCode::INTERNAL_SERVER_ERROR, Html(e.to_string()))
        }
    }
}

fn render_page<I: Flashcard>(state: &ServerState<I>) -> Fallible<Markup> {
    let mutable = state.lock()?;
    let body = if mutable.finished() {
        render_completion_page(&mutable)
    } else {
        render_session_page(state, &mutable)
    };
    Ok(page_template(state.deck.title(), body))
}

fn render_session_page<I: Flashcard>(state: &ServerState<I>, mutable: &MutableState<I>) -> Markup {
    let Some(card) = mutable.session.current_card() else {
        return render_completion_page(mutable);
    };
    let progress = format!(
        "{} / {}",
        mutable.session.current_index() + 1,
        state.total_cards
    );
    let badge = if card.is_review { "Review" } else { "New" };
    let card_controls = if mutable.reveal {
        html! {
            form action="/" method="post" {
                button id="no-clue" type="submit" name="action" value="NoClue" { (Quality::NoClue.label()) }
                button id="had-a-hunch" type="submit" name="action" value="HadAHunch" { (Quality::HadAHunch.label()) }
                button id="knew-it" type="submit" name="action" value="KnewIt" { (Quality::KnewIt.label()) }
                div.spacer {}
                button id="end" type="submit" name="action" value="End" { "End" }
            }
        }
    } else {
        html! {
            form action="/" method="post" {
                button id="reveal" type="submit" name="action" value="Reveal" { "Reveal" }
                div.spacer {}
                button id="end" type="submit" name="action" value="End" { "End" }
            }
        }
    };
    html! {
        div.root {
            div.header {
                h1 { (state.deck.title()) }
                div.progress { (progress) }
            }
            div.card {
                div.badge { (badge) }
                div.front {
                    (card.item.front(card.context_index))
                }
                @if mutable.reveal {
                    div.back {
                        (card.item.back(card.context_index))
                    }
                }
            }
            div.controls {
                (card_controls)
            }
        }
    }
}

fn render_completion_page<I: Flashcard>(mutable: &MutableState<I>) -> Markup {
    let summary = mutable.session.summary();
    html! {
        div.finished {
            h1 { "Session Completed" }
            div.summary {
                table {
                    tbody {
                        tr {
                            td .key { "Words reviewed" }
                            td .val { (summary.words_rated) }
                        }
                        @if summary.new_words_learned > 0 {
                            tr {
                                td .key { "New words learned" }
                                td .val { (summary.new_words_learned) }
                            }
                        }
                        @if summary.newly_mastered > 0 {
                            tr {
                                td .key { "Words mastered" }
                                td .val { (summary.newly_mastered) }
                            }
                        }
                    }
                }
            }
            div.shutdown-container {
                form action="/" method="post" {
                    button id="shutdown" type="submit" name="action" value="Shutdown" { "Shutdown" }
                }
            }
        }
    }
}
