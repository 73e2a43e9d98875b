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

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use maud::html;
use serde::Deserialize;

use crate::drill::state::ServerState;
use crate::drill::template::page_template;
use crate::drill::view::Flashcard;
use crate::error::Fallible;
use crate::sm2::Quality;
use crate::types::timestamp::Timestamp;

#[derive(Debug, Deserialize)]
enum Action {
    Reveal,
    NoClue,
    HadAHunch,
    KnewIt,
    End,
    Shutdown,
}

impl Action {
    fn quality(&self) -> Option<Quality> {
        match self {
            Action::NoClue => Some(Quality::NoClue),
            Action::HadAHunch => Some(Quality::HadAHunch),
            Action::KnewIt => Some(Quality::KnewIt),
            Action::Reveal | Action::End | Action::Shutdown => None,
        }
    }
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
}

pub async fn post_handler<I: Flashcard>(
    State(state): State<ServerState<I>>,
    Form(form): Form<FormData>,
) -> Response {
    let shutting_down = matches!(form.action, Action::Shutdown);
    if let Err(e) = action_handler(&state, form.action) {
        log::error!("{e}");
    }
    if shutting_down {
        // The server is going away, so there is nothing to redirect to.
        let body = html! {
            div.finished {
                h1 { "Shutting down" }
                p { "You can close this tab." }
            }
        };
        let page = page_template(state.deck.title(), body);
        (StatusCode::OK, Html(page.into_string())).into_response()
    } else {
        Redirect::to("/").into_response()
    }
}

fn action_handler<I: Flashcard>(state: &ServerState<I>, action: Action) -> Fallible<()> {
    let mut guard = state.lock()?;
    let mutable = &mut *guard;
    match action {
        Action::Reveal => {
            if !mutable.finished() {
                mutable.reveal = true;
            }
        }
        Action::NoClue | Action::HadAHunch | Action::KnewIt => {
            // Ratings only count once the back of the card has been seen.
            if mutable.reveal && !mutable.finished() {
                if let Some(quality) = action.quality() {
                    mutable.session.rate_current(
                        quality,
                        Timestamp::now(),
                        &mut mutable.progress,
                        &mut mutable.db,
                    )?;
                    mutable.reveal = false;
                    if mutable.session.is_complete() {
                        log::debug!("Session completed");
                    }
                }
            }
        }
        Action::End => {
            log::debug!("Session ended early");
            mutable.ended = true;
            mutable.reveal = false;
        }
        Action::Shutdown => {
            log::debug!("Shutting down");
            let sender = state
                .shutdown_tx
                .lock()
                .ok()
                .and_then(|mut slot| slot.take());
            if let Some(tx) = sender {
                let _ = tx.send(());
            }
        }
    }
    Ok(())
}
