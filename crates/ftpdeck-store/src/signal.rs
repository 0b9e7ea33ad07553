// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use serde::Serialize;
use tokio::sync::watch;
use tracing::warn;

use crate::StoreError;

/// An observable value.
///
/// Wraps a `watch` channel: the signal owns the sender, subscribers get a
/// receiver that always sees the latest value and is woken on every change.
/// Updates notify even when nobody is subscribed.
#[derive(Debug)]
pub struct Signal<T> {
    tx: watch::Sender<T>,
}

impl<T> Signal<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Clone of the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.tx.borrow().clone()
    }

    /// Inspect the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Replace the value wholesale and notify subscribers.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Mutate the value in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }
}

impl<T: Default> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// State record shared by every network-backed store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RemoteState<T> {
    pub items: T,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Signal<RemoteState<T>> {
    /// Enter the loading state; runs before the request is issued.
    pub(crate) fn begin(&self) {
        self.update(|s| {
            s.is_loading = true;
            s.error = None;
        });
    }

    /// Apply the outcome of a request.  Failures keep the previous items.
    pub(crate) fn settle(&self, failure_prefix: &str, result: Result<T, StoreError>) {
        match result {
            Ok(items) => self.update(|s| {
                s.items = items;
                s.is_loading = false;
            }),
            Err(e) => {
                warn!(error = %e, "{failure_prefix}");
                self.update(|s| {
                    s.error = Some(format!("{failure_prefix}: {e}"));
                    s.is_loading = false;
                });
            }
        }
    }

    /// Clear a recorded error without touching anything else.
    pub(crate) fn clear_error(&self) {
        self.update(|s| s.error = None);
    }
}
