// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Local (per-device) high-score board for the flappy mini-game.
//!
//! The store keeps, per user, the best score of the current session and the
//! five best scores ever seen.  Every update writes the all-time lists (not
//! the session scores) to the `flappyScores` storage slot as
//! `{ "<user>": [best, ...] }`.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{ScoreStorage, Signal};

/// Storage slot holding the persisted all-time boards.
pub const SCORES_SLOT: &str = "flappyScores";

/// Length of each user's all-time list.
pub const MAX_ALL_TIME: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserScores {
    /// Best score since the last `clear_session`.
    pub current_session: u64,
    /// Sorted descending, at most [`MAX_ALL_TIME`] entries.
    pub all_time: Vec<u64>,
}

impl UserScores {
    fn record(&mut self, score: u64) {
        if score > self.current_session {
            self.current_session = score;
        }
        self.all_time.push(score);
        normalise(&mut self.all_time);
    }
}

fn normalise(scores: &mut Vec<u64>) {
    scores.sort_unstable_by(|a, b| b.cmp(a));
    scores.truncate(MAX_ALL_TIME);
}

pub type HighScores = BTreeMap<String, UserScores>;

pub struct HighScoreStore {
    state: Signal<HighScores>,
    storage: Arc<dyn ScoreStorage>,
}

impl HighScoreStore {
    /// Start with an empty board.  Call [`restore`](Self::restore) to pick up
    /// previously persisted all-time scores.
    pub fn new(storage: Arc<dyn ScoreStorage>) -> Self {
        Self { state: Signal::default(), storage }
    }

    pub fn state(&self) -> &Signal<HighScores> {
        &self.state
    }

    pub fn scores_for(&self, username: &str) -> Option<UserScores> {
        self.state.with(|s| s.get(username).cloned())
    }

    /// Record a finished game.  Empty usernames are ignored.
    pub fn add_score(&self, username: &str, score: u64) {
        if username.is_empty() {
            return;
        }
        self.state.update(|scores| {
            scores.entry(username.to_string()).or_default().record(score);
        });
        debug!(username, score, "score recorded");
        self.persist();
    }

    /// Reset the session best for `username`; all-time scores are kept.
    pub fn clear_session(&self, username: &str) {
        if username.is_empty() || self.state.with(|s| !s.contains_key(username)) {
            return;
        }
        self.state.update(|scores| {
            if let Some(user) = scores.get_mut(username) {
                user.current_session = 0;
            }
        });
    }

    /// Forget every score, including the persisted slot.
    pub fn reset(&self) {
        if let Err(e) = self.storage.remove(SCORES_SLOT) {
            warn!(error = %e, "could not remove persisted high scores");
        }
        self.state.set(HighScores::new());
    }

    /// Load the persisted all-time lists.  Session scores start at zero.
    pub fn restore(&self) -> anyhow::Result<()> {
        let Some(text) = self.storage.read(SCORES_SLOT)? else {
            return Ok(());
        };
        let persisted: BTreeMap<String, Vec<u64>> =
            serde_json::from_str(&text).context("parsing persisted high scores")?;
        let scores = persisted
            .into_iter()
            .map(|(user, mut all_time)| {
                normalise(&mut all_time);
                (user, UserScores { current_session: 0, all_time })
            })
            .collect();
        self.state.set(scores);
        Ok(())
    }

    fn persist(&self) {
        let encoded = self.state.with(|scores| {
            let view: BTreeMap<&str, &[u64]> = scores
                .iter()
                .map(|(user, s)| (user.as_str(), s.all_time.as_slice()))
                .collect();
            serde_json::to_string(&view)
        });
        let result = encoded
            .context("encoding high scores")
            .and_then(|text| self.storage.write(SCORES_SLOT, &text));
        if let Err(e) = result {
            warn!(error = %e, "could not persist high scores");
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    fn store() -> (HighScoreStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (HighScoreStore::new(storage.clone()), storage)
    }

    fn persisted(storage: &MemoryStorage) -> serde_json::Value {
        let text = storage.read(SCORES_SLOT).unwrap().expect("slot written");
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn scores_sorted_and_session_tracks_max() {
        let (s, _) = store();
        s.add_score("x", 10);
        s.add_score("x", 5);
        s.add_score("x", 20);
        let u = s.scores_for("x").unwrap();
        assert_eq!(u.current_session, 20);
        assert_eq!(u.all_time, vec![20, 10, 5]);
    }

    #[test]
    fn all_time_keeps_five_largest() {
        let (s, _) = store();
        for score in [3, 9, 1, 7, 5, 8] {
            s.add_score("x", score);
        }
        assert_eq!(s.scores_for("x").unwrap().all_time, vec![9, 8, 7, 5, 3]);
    }

    #[test]
    fn session_does_not_drop_for_lower_scores() {
        let (s, _) = store();
        s.add_score("x", 12);
        s.add_score("x", 4);
        assert_eq!(s.scores_for("x").unwrap().current_session, 12);
    }

    #[test]
    fn empty_username_is_ignored() {
        let (s, storage) = store();
        s.add_score("", 99);
        assert!(s.state().get().is_empty());
        assert!(storage.read(SCORES_SLOT).unwrap().is_none());
    }

    #[test]
    fn clear_session_keeps_all_time() {
        let (s, _) = store();
        s.add_score("x", 10);
        s.add_score("x", 30);
        s.clear_session("x");
        let u = s.scores_for("x").unwrap();
        assert_eq!(u.current_session, 0);
        assert_eq!(u.all_time, vec![30, 10]);
    }

    #[test]
    fn clear_session_unknown_user_is_noop() {
        let (s, _) = store();
        s.add_score("x", 1);
        s.clear_session("nobody");
        s.clear_session("");
        assert_eq!(s.state().get().len(), 1);
    }

    #[test]
    fn persisted_view_has_only_all_time_lists() {
        let (s, storage) = store();
        s.add_score("ann", 4);
        s.add_score("bob", 7);
        s.add_score("ann", 9);
        assert_eq!(persisted(&storage), serde_json::json!({ "ann": [9, 4], "bob": [7] }));
    }

    #[test]
    fn reset_clears_state_and_slot() {
        let (s, storage) = store();
        s.add_score("x", 1);
        s.reset();
        assert!(s.state().get().is_empty());
        assert!(storage.read(SCORES_SLOT).unwrap().is_none());
    }

    #[test]
    fn restore_loads_all_time_with_fresh_session() {
        let storage = Arc::new(MemoryStorage::new());
        storage.write(SCORES_SLOT, r#"{"x":[1,50,3,4,5,6]}"#).unwrap();
        let s = HighScoreStore::new(storage);
        s.restore().unwrap();
        let u = s.scores_for("x").unwrap();
        assert_eq!(u.current_session, 0);
        assert_eq!(u.all_time, vec![50, 6, 5, 4, 3]);
    }

    #[test]
    fn restore_without_slot_is_empty() {
        let (s, _) = store();
        s.restore().unwrap();
        assert!(s.state().get().is_empty());
    }

    #[test]
    fn restore_rejects_corrupt_slot() {
        let storage = Arc::new(MemoryStorage::new());
        storage.write(SCORES_SLOT, "not json").unwrap();
        let s = HighScoreStore::new(storage);
        assert!(s.restore().is_err());
    }

    #[tokio::test]
    async fn subscribers_see_new_scores() {
        let (s, _) = store();
        let mut rx = s.state().subscribe();
        s.add_score("x", 3);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update()["x"].all_time, vec![3]);
    }
}
