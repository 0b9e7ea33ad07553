// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use serde_json::json;

use crate::client::SCORES_PATH;
use crate::{ApiClient, Credentials, RemoteState, ScoreBoard, Signal};

/// High-score board shared through the server.
pub struct NetworkScoreStore {
    client: ApiClient,
    state: Signal<RemoteState<ScoreBoard>>,
}

impl NetworkScoreStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client, state: Signal::default() }
    }

    pub fn state(&self) -> &Signal<RemoteState<ScoreBoard>> {
        &self.state
    }

    /// Submit a score; the server answers with the updated board.
    pub async fn add_score(&self, username: &str, score: u64, credentials: &Credentials) {
        self.state.begin();
        let body = json!({
            "username": username,
            "score": score,
            "ftpConfig": credentials,
        });
        let result = self
            .client
            .post(SCORES_PATH, &body)
            .await
            .and_then(|env| env.take("scores"));
        self.state.settle("Error saving score", result);
    }

    pub async fn load_scores(&self, credentials: &Credentials) {
        self.state.begin();
        let result = self
            .client
            .get(SCORES_PATH, credentials)
            .await
            .and_then(|env| env.take("scores"));
        self.state.settle("Error loading scores", result);
    }
}
