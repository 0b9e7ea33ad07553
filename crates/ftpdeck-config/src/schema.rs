// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Base URL of the public ftpserve deployment.
pub const DEFAULT_BASE_URL: &str = "https://ftpserve.w3d.box.ca";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    /// Opaque credential blob forwarded to the server as `ftpConfig`.
    ///
    /// The client never looks inside it; whatever table is written here is
    /// sent verbatim, either JSON-encoded in the `Authorization` header (GET
    /// requests) or embedded in the request body (POST requests).
    ///
    /// ```toml
    /// [credentials]
    /// host = "ftp.example.com"
    /// user = "alice"
    /// password = "hunter2"
    /// ```
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<serde_json::Value>,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Remote API root.  A trailing slash is tolerated and stripped by the
    /// client.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding durable local slots (the high-score board).
    /// `~` and `$VARS` are expanded.  Defaults to `$XDG_DATA_HOME/ftpdeck`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores_dir: Option<String>,
}

impl StorageConfig {
    /// Resolve the effective local storage directory.
    pub fn resolved_scores_dir(&self) -> PathBuf {
        match &self.scores_dir {
            Some(dir) => {
                let expanded = shellexpand::full(dir)
                    .map_or_else(|_| dir.clone(), |s| s.into_owned());
                PathBuf::from(expanded)
            }
            None => default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".local")
                .join("share")
        })
        .join("ftpdeck")
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
