// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use serde_json::json;

use crate::client::CHAT_MESSAGES_PATH;
use crate::{ApiClient, ChatMessage, Credentials, RemoteState, Signal};

/// Shared chat room.  Both sending and loading return the full message list.
pub struct ChatStore {
    client: ApiClient,
    state: Signal<RemoteState<Vec<ChatMessage>>>,
}

impl ChatStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client, state: Signal::default() }
    }

    pub fn state(&self) -> &Signal<RemoteState<Vec<ChatMessage>>> {
        &self.state
    }

    pub async fn send_message(&self, username: &str, message: &str, credentials: &Credentials) {
        self.state.begin();
        let body = json!({
            "username": username,
            "message": message,
            "ftpConfig": credentials,
        });
        let result = self
            .client
            .post(CHAT_MESSAGES_PATH, &body)
            .await
            .and_then(|env| env.take("messages"));
        self.state.settle("Error sending message", result);
    }

    pub async fn load_messages(&self, credentials: &Credentials) {
        self.state.begin();
        let result = self
            .client
            .get(CHAT_MESSAGES_PATH, credentials)
            .await
            .and_then(|env| env.take("messages"));
        self.state.settle("Error loading messages", result);
    }

    /// Dismiss the last error.
    pub fn clear_error(&self) {
        self.state.clear_error();
    }
}
