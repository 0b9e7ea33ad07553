// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use serde_json::json;

use crate::client::{ACTIVITY_LOGS_PATH, CLEAR_LOGS_PATH};
use crate::{ActivityLog, ApiClient, Credentials, RemoteState, Signal};

/// Server activity log viewer.
pub struct ActivityLogStore {
    client: ApiClient,
    state: Signal<RemoteState<Vec<ActivityLog>>>,
}

impl ActivityLogStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client, state: Signal::default() }
    }

    pub fn state(&self) -> &Signal<RemoteState<Vec<ActivityLog>>> {
        &self.state
    }

    /// Fetch the full activity log, replacing the current list on success.
    pub async fn load_logs(&self, credentials: &Credentials) {
        self.state.begin();
        let result = self
            .client
            .get(ACTIVITY_LOGS_PATH, credentials)
            .await
            .and_then(|env| env.take("logs"));
        self.state.settle("Error loading logs", result);
    }

    /// Ask the server to truncate its log; empties the local list on success.
    pub async fn clear_logs(&self, credentials: &Credentials) {
        self.state.begin();
        let body = json!({ "ftpConfig": credentials });
        let result = self.client.post(CLEAR_LOGS_PATH, &body).await.map(|_| Vec::new());
        self.state.settle("Error clearing logs", result);
    }
}
