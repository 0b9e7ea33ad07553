// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Chat message helpers: split text into renderable segments and escape it
//! for HTML display.

mod parser;
mod sanitize;

pub use parser::{image_urls, parse_message, Segment, SegmentKind, IMAGE_EXTENSIONS};
pub use sanitize::sanitize_message;
