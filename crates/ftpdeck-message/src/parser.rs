// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// An `http`/`https` URL that does not end in trailing punctuation, a quote,
/// a closing bracket or `<`.  The greedy body backtracks so sentence
/// punctuation after a link stays in the surrounding text.
const URL_PATTERN: &str = r#"https?://[^\s<]+[^<.,:;"')\]\s]"#;

/// Suffixes (compared case-insensitively) that render a URL inline as an image.
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(URL_PATTERN).expect("URL pattern is a valid regex"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Text,
    Link,
    Image,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SegmentKind::Text => "text",
            SegmentKind::Link => "link",
            SegmentKind::Image => "image",
        };
        write!(f, "{s}")
    }
}

/// One classified span of a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    pub content: String,
}

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Self { kind: SegmentKind::Text, content: content.into() }
    }

    pub fn link(content: impl Into<String>) -> Self {
        Self { kind: SegmentKind::Link, content: content.into() }
    }

    pub fn image(content: impl Into<String>) -> Self {
        Self { kind: SegmentKind::Image, content: content.into() }
    }

    /// `true` for link and image segments.
    pub fn is_url(&self) -> bool {
        !matches!(self.kind, SegmentKind::Text)
    }
}

fn is_image_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Split `text` into an ordered list of text, link and image segments.
///
/// Segments never overlap and leave no gaps: joining every `content` in
/// order yields `text` again.  Input without URLs becomes a single text
/// segment; empty input yields no segments.
pub fn parse_message(text: &str) -> Vec<Segment> {
    let mut parts = Vec::new();
    let mut last = 0;

    for m in url_regex().find_iter(text) {
        if m.start() > last {
            parts.push(Segment::text(&text[last..m.start()]));
        }
        let url = m.as_str();
        parts.push(if is_image_url(url) { Segment::image(url) } else { Segment::link(url) });
        last = m.end();
    }

    if last < text.len() {
        parts.push(Segment::text(&text[last..]));
    }
    parts
}

/// Image URLs embedded in `text`, in order of appearance.
pub fn image_urls(text: &str) -> Vec<String> {
    parse_message(text)
        .into_iter()
        .filter(|s| s.kind == SegmentKind::Image)
        .map(|s| s.content)
        .collect()
}

// ─── Tests ────────────────────────────────────────────────────────────────────
