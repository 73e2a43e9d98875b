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

mod get;
mod post;
pub mod server;
mod state;
mod template;
mod view;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use portpicker::pick_unused_port;
    use reqwest::StatusCode;
    use tokio::net::TcpStream;
    use tokio::spawn;
    use tokio::time::sleep;

    use crate::collection::DATABASE_FILE_NAME;
    use crate::content::Deck;
    use crate::drill::server::DrillOptions;
    use crate::drill::server::start_server;
    use crate::error::ErrorReport;
    use crate::error::Fallible;
    use crate::helper::create_tmp_copy_of_test_directory;
    use crate::session::SessionLimits;
    use crate::session::SessionType;
    use crate::store::ActivityStore;
    use crate::store::ProgressStore;
    use crate::store::sqlite::Database;
    use crate::types::timestamp::Timestamp;

    fn options(deck: Deck, session_type: SessionType, port: u16) -> DrillOptions {
        DrillOptions {
            deck,
            session_type,
            limits: SessionLimits::default(),
            port,
            open_browser: false,
        }
    }

    fn port() -> Fallible<u16> {
        pick_unused_port().ok_or_else(|| ErrorReport::new("no free port"))
    }

    async fn wait_for(port: u16) {
        loop {
            if let Ok(stream) = TcpStream::connect(format!("127.0.0.1:{port}")).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
    }

    async fn post(port: u16, action: &str) -> Fallible<String> {
        let response = reqwest::Client::new()
            .post(format!("http://127.0.0.1:{port}/"))
            .form(&[("action", action)])
            .send()
            .await
            .map_err(|e| ErrorReport::new(e.to_string()))?;
        assert!(response.status().is_success());
        response
            .text()
            .await
            .map_err(|e| ErrorReport::new(e.to_string()))
    }

    #[tokio::test]
    async fn test_start_server_on_non_existent_directory() -> Fallible<()> {
        let options = options(Deck::Vocabulary, SessionType::Mixed, port()?);
        let result = start_server(Some("./derpherp".to_string()), options, Timestamp::now()).await;
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("error: directory does not exist.".to_string())
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_nothing_due() -> Fallible<()> {
        // Nothing has been seen yet, so a review-only session is empty and
        // the server is never started.
        let directory = create_tmp_copy_of_test_directory()?;
        let options = options(Deck::Vocabulary, SessionType::ReviewOnly, port()?);
        start_server(Some(directory), options, Timestamp::now()).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_e2e() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        let db_path: PathBuf = PathBuf::from(&directory).join(DATABASE_FILE_NAME);
        let port = port()?;
        let now = Timestamp::now();
        let server = spawn(start_server(
            Some(directory),
            options(Deck::Etymology, SessionType::Mixed, port),
            now,
        ));
        wait_for(port).await;
        let base = format!("http://127.0.0.1:{port}");

        // Hit the `style.css` endpoint.
        let response = reqwest::get(format!("{base}/style.css"))
            .await
            .map_err(|e| ErrorReport::new(e.to_string()))?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").map(|v| v.as_bytes()),
            Some("text/css".as_bytes())
        );

        // Hit the not found endpoint.
        let response = reqwest::get(format!("{base}/herp-derp"))
            .await
            .map_err(|e| ErrorReport::new(e.to_string()))?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Hit the root endpoint.
        let response = reqwest::get(format!("{base}/"))
            .await
            .map_err(|e| ErrorReport::new(e.to_string()))?;
        assert!(response.status().is_success());
        let html = response
            .text()
            .await
            .map_err(|e| ErrorReport::new(e.to_string()))?;
        assert!(html.contains("Deeper Than You Knew"));
        assert!(html.contains("1 / 2"));
        assert!(!html.contains("Knew it"));

        // Rating before revealing does nothing.
        let html = post(port, "KnewIt").await?;
        assert!(html.contains("1 / 2"));

        let html = post(port, "Reveal").await?;
        assert!(html.contains("Knew it"));
        assert!(html.contains("Literally"));

        let html = post(port, "KnewIt").await?;
        assert!(html.contains("2 / 2"));

        post(port, "Reveal").await?;
        let html = post(port, "HadAHunch").await?;
        assert!(html.contains("Session Completed"));
        assert!(html.contains("Words reviewed"));
        assert!(html.contains("New words learned"));
        assert!(!html.contains("Words mastered"));

        // Every rating was written as it happened.
        let db_path = db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?;
        let db = Database::new(db_path)?;
        assert_eq!(db.progress(Deck::Etymology).progress_ids()?.len(), 2);
        assert!(db.progress(Deck::Vocabulary).progress_ids()?.is_empty());
        let today = db
            .get_activity(now.local_date())?
            .ok_or_else(|| ErrorReport::new("no activity recorded"))?;
        assert_eq!(today.items_reviewed, 2);
        assert_eq!(today.items_learned, 2);

        let html = post(port, "Shutdown").await?;
        assert!(html.contains("Shutting down"));
        server
            .await
            .map_err(|e| ErrorReport::new(e.to_string()))??;
        Ok(())
    }

    #[tokio::test]
    async fn test_end() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        let port = port()?;
        let server = spawn(start_server(
            Some(directory),
            options(Deck::Vocabulary, SessionType::Mixed, port),
            Timestamp::now(),
        ));
        wait_for(port).await;

        let html = post(port, "End").await?;
        assert!(html.contains("Session Completed"));
        assert!(!html.contains("New words learned"));

        // Further ratings are ignored once the session is over.
        post(port, "Reveal").await?;
        let html = post(port, "NoClue").await?;
        assert!(html.contains("Session Completed"));

        let html = post(port, "Shutdown").await?;
        assert!(html.contains("Shutting down"));
        server
            .await
            .map_err(|e| ErrorReport::new(e.to_string()))??;
        Ok(())
    }
}
