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

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::signal;
use tokio::sync::oneshot;
use tokio::time::sleep;

use crate::catalog::Catalog;
use crate::collection::Collection;
use crate::content::Deck;
use crate::drill::get::get_handler;
use crate::drill::post::post_handler;
use crate::drill::state::MutableState;
use crate::drill::state::ServerState;
use crate::drill::view::Flashcard;
use crate::error::Fallible;
use crate::session::Session;
use crate::session::SessionLimits;
use crate::session::SessionType;
use crate::store::sqlite::Database;
use crate::store::sqlite::ProgressTable;
use crate::types::timestamp::Timestamp;

pub struct DrillOptions {
    pub deck: Deck,
    pub session_type: SessionType,
    /// Overrides for the limits in the collection's config file.
    pub limits: SessionLimits,
    pub port: u16,
    pub open_browser: bool,
}

pub async fn start_server(
    directory: Option<String>,
    options: DrillOptions,
    now: Timestamp,
) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let limits = coll.config.limits(options.deck).overridden_by(options.limits);
    match options.deck {
        Deck::Vocabulary => {
            serve_deck(&coll.vocabulary, coll.db.clone(), options, limits, now).await
        }
        Deck::Etymology => serve_deck(&coll.etymology, coll.db.clone(), options, limits, now).await,
    }
}

async fn serve_deck<I: Flashcard>(
    catalog: &Catalog<I>,
    db: Database,
    options: DrillOptions,
    limits: SessionLimits,
    now: Timestamp,
) -> Fallible<()> {
    let progress = db.progress(options.deck);
    let session = compose_session(catalog, &progress, options.session_type, limits, now)?;
    if session.is_complete() {
        println!("Nothing due.");
        return Ok(());
    }
    log::debug!(
        "Session has {} cards ({} review, {} new).",
        session.total_cards(),
        session.review_card_count(),
        session.new_card_count()
    );

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let state = ServerState {
        port: options.port,
        deck: options.deck,
        total_cards: session.total_cards(),
        mutable: Arc::new(Mutex::new(MutableState {
            reveal: false,
            progress,
            db,
            session,
            ended: false,
        })),
        shutdown_tx: Arc::new(Mutex::new(Some(shutdown_tx))),
    };
    let bind = format!("127.0.0.1:{}", state.port);
    let app = Router::new();
    let app = app.route("/", get(get_handler::<I>));
    let app = app.route("/", post(post_handler::<I>));
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);

    if options.open_browser {
        // Start a separate task to open the browser.
        let url = format!("http://{bind}/");
        let address = bind.clone();
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(&address).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            let _ = open::that(url);
        });
    }

    // Start the server.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = shutdown_rx => {}
                _ = signal::ctrl_c() => {}
            }
        })
        .await?;
    Ok(())
}

fn compose_session<I: Flashcard>(
    catalog: &Catalog<I>,
    progress: &ProgressTable,
    session_type: SessionType,
    limits: SessionLimits,
    now: Timestamp,
) -> Fallible<Session<I>> {
    let mut rng = rand::thread_rng();
    Session::build(session_type, catalog, progress, limits, now, &mut rng)
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}
