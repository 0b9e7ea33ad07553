// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Observable state containers backed by the ftpserve HTTP API.
//!
//! Every store is an explicit value: construct one per concern, share it
//! by reference (or `Arc`) and watch it through [`Signal::subscribe`].
//! Network-backed operations never return errors; failures are recorded in
//! the store's `error` field and the previously loaded collection is kept.

mod error;
mod signal;
mod client;
mod models;
mod activity;
mod chat;
mod network_scores;
mod highscores;
mod storage;
pub mod filters;

pub use error::StoreError;
pub use signal::{RemoteState, Signal};
pub use client::{ApiClient, Credentials};
pub use models::{ActivityLog, ChatMessage, ScoreBoard};
pub use activity::ActivityLogStore;
pub use chat::ChatStore;
pub use network_scores::NetworkScoreStore;
pub use highscores::{HighScoreStore, HighScores, UserScores, MAX_ALL_TIME, SCORES_SLOT};
pub use storage::{JsonFileStorage, MemoryStorage, ScoreStorage};
