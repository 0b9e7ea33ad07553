// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Upload filters for the well-known media folders.

/// Extensions accepted by a folder and a short human description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolderFilter {
    pub extensions: &'static [&'static str],
    pub description: &'static str,
}

const VIDEO: &[&str] = &[".mp4", ".mkv", ".avi", ".mov", ".wmv", ".m4v", ".webm"];
const VIDEO_DESCRIPTION: &str = "Video files (mp4, mkv, avi, etc.)";

/// Folder label → filter.  Labels are matched case-insensitively.
pub const FOLDER_FILTERS: &[(&str, FolderFilter)] = &[
    (
        "Music",
        FolderFilter {
            extensions: &[".mp3", ".m4a", ".flac", ".wav", ".aac", ".ogg", ".wma"],
            description: "Audio files (mp3, m4a, flac, etc.)",
        },
    ),
    ("Movies", FolderFilter { extensions: VIDEO, description: VIDEO_DESCRIPTION }),
    ("TV Shows", FolderFilter { extensions: VIDEO, description: VIDEO_DESCRIPTION }),
    (
        "Pictures",
        FolderFilter {
            extensions: &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp", ".tiff", ".heic"],
            description: "Image files (jpg, png, gif, etc.)",
        },
    ),
    (
        "Audio Books",
        FolderFilter {
            extensions: &[".mp3", ".m4a", ".m4b", ".aac", ".ogg", ".wma"],
            description: "Audio files (mp3, m4a, m4b, etc.)",
        },
    ),
];

pub fn filter_for_folder(folder: &str) -> Option<&'static FolderFilter> {
    let wanted = folder.to_lowercase();
    FOLDER_FILTERS
        .iter()
        .find(|(name, _)| name.to_lowercase() == wanted)
        .map(|(_, filter)| filter)
}

/// Whether `filename` may be uploaded into `folder`.  Folders without a
/// filter accept everything; otherwise a file without an extension is
/// rejected.
pub fn is_file_allowed(filename: &str, folder: &str) -> bool {
    let Some(filter) = filter_for_folder(folder) else {
        return true;
    };
    let lower = filename.to_lowercase();
    match lower.rfind('.') {
        Some(idx) => filter.extensions.iter().any(|ext| *ext == &lower[idx..]),
        None => false,
    }
}

/// Comma-separated extension list for a file picker's `accept` attribute.
/// Empty for unfiltered folders.
pub fn accept_string(folder: &str) -> String {
    filter_for_folder(folder)
        .map(|f| f.extensions.join(","))
        .unwrap_or_default()
}

pub fn folder_description(folder: &str) -> &'static str {
    filter_for_folder(folder).map_or("All files", |f| f.description)
}
