// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Minimal HTML escaping for user-supplied chat text.

/// Escape the five HTML-significant characters.
///
/// `&` is replaced first so the entities produced by the later replacements
/// are not escaped a second time.
pub fn sanitize_message(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}
