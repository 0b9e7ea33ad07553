// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! HTTP plumbing shared by the network-backed stores.
//!
//! Every ftpserve endpoint answers with the same JSON envelope:
//!
//! ```json
//! { "success": true,  "messages": [ ... ] }
//! { "success": false, "error": "invalid credentials" }
//! ```
//!
//! # Credential transport
//! GET requests carry the credential blob JSON-encoded in the
//! `Authorization` header; POST requests embed it in the body as
//! `ftpConfig`.  The server expects exactly this split.

use ftpdeck_config::ApiConfig;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::StoreError;

pub(crate) const ACTIVITY_LOGS_PATH: &str = "/logs/activity";
pub(crate) const CLEAR_LOGS_PATH: &str = "/logs/clear";
pub(crate) const CHAT_MESSAGES_PATH: &str = "/chat/messages";
pub(crate) const SCORES_PATH: &str = "/scores";

/// Opaque credential/configuration blob (`ftpConfig`) forwarded to the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(Value);

impl Credentials {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn header_value(&self) -> String {
        self.0.to_string()
    }
}

impl From<Value> for Credentials {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Thin `reqwest` wrapper bound to one API root.  Cheap to clone; clones
/// share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(cfg: &ApiConfig) -> Self {
        Self::new(&cfg.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET path` with credentials in the `Authorization` header.
    pub(crate) async fn get(
        &self,
        path: &str,
        credentials: &Credentials,
    ) -> Result<Envelope, StoreError> {
        let url = self.url(path);
        debug!(method = "GET", url = %url, "sending request");
        let req = self
            .http
            .get(&url)
            .header(AUTHORIZATION, credentials.header_value())
            .header(CONTENT_TYPE, "application/json");
        self.execute(req, &url).await
    }

    /// `POST path` with a JSON body; credentials travel inside `body`.
    pub(crate) async fn post(&self, path: &str, body: &Value) -> Result<Envelope, StoreError> {
        let url = self.url(path);
        debug!(method = "POST", url = %url, "sending request");
        let req = self.http.post(&url).json(body);
        self.execute(req, &url).await
    }

    async fn execute(
        &self,
        req: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<Envelope, StoreError> {
        let resp = req.send().await?;
        let status = resp.status();
        debug!(url = %url, status = status.as_u16(), "response received");
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }
        let text = resp.text().await?;
        Envelope::parse(&text)?.into_result()
    }
}

/// Decoded `{ "success": ..., ... }` response wrapper.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Envelope {
    fn parse(text: &str) -> Result<Self, StoreError> {
        serde_json::from_str(text).map_err(|e| StoreError::Decode(e.to_string()))
    }

    fn into_result(self) -> Result<Self, StoreError> {
        if self.success {
            Ok(self)
        } else {
            Err(StoreError::Api(
                self.error.unwrap_or_else(|| "server reported failure".to_string()),
            ))
        }
    }

    /// Remove and decode the collection stored under `field`.
    pub(crate) fn take<T: DeserializeOwned>(mut self, field: &str) -> Result<T, StoreError> {
        let raw = self
            .fields
            .remove(field)
            .ok_or_else(|| StoreError::Decode(format!("missing `{field}` field")))?;
        serde_json::from_value(raw)
            .map_err(|e| StoreError::Decode(format!("`{field}`: {e}")))
    }
}
