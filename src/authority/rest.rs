//! REST client for a remote game authority.

use super::{GameStart, RemoteAuthority, SessionSnapshot, StartGameConfig, WireMove};
use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

/// HTTP client speaking the authority's game API.
///
/// `POST {base}/games` starts a session; `POST {base}/games/{id}/moves`
/// submits a move. Transport failures and non-success statuses come
/// back as errors; retry policy belongs to the caller.
#[derive(Debug, Clone)]
pub struct RestAuthority {
    base_url: String,
    client: reqwest::Client,
}

impl RestAuthority {
    /// Creates a client against `base_url` (e.g. `https://host/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl RemoteAuthority for RestAuthority {
    #[instrument(skip_all, fields(base_url = %self.base_url))]
    async fn start_game(&mut self, config: &StartGameConfig) -> Result<GameStart> {
        info!("Starting game on remote authority");

        let response = self
            .client
            .post(format!("{}/games", self.base_url))
            .json(config)
            .send()
            .await
            .context("Failed to reach authority")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Authority returned {}: {}", status, body);
        }

        let start: GameStart = response
            .json()
            .await
            .context("Invalid start-game response")?;

        info!(session_id = %start.id, "Game started");
        Ok(start)
    }

    #[instrument(skip(self, action))]
    async fn submit_move(&mut self, session_id: &str, action: &WireMove) -> Result<SessionSnapshot> {
        debug!(?action, "Submitting move");

        let response = self
            .client
            .post(format!("{}/games/{}/moves", self.base_url, session_id))
            .json(action)
            .send()
            .await
            .context("Failed to reach authority")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Authority rejected move: {} - {}", status, body);
        }

        let snapshot: SessionSnapshot = response
            .json()
            .await
            .context("Invalid move response")?;

        debug!(
            is_over = snapshot.is_game_over,
            has_counter = snapshot.last_move.is_some(),
            "Received authoritative state"
        );
        Ok(snapshot)
    }
}
