// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::Config;

/// Environment variables applied on top of every config file, as
/// `(variable, table, key)`.  Empty values are ignored.
const ENV_OVERRIDES: &[(&str, &str, &str)] = &[
    ("FTPDECK_BASE_URL", "api", "base_url"),
    ("FTPDECK_SCORES_DIR", "storage", "scores_dir"),
];

/// Config files from lowest to highest priority: system, user, working
/// directory.
fn config_search_paths() -> Vec<PathBuf> {
    let user_dirs = [dirs::home_dir().map(|h| h.join(".config")), dirs::config_dir()];
    let mut paths: Vec<PathBuf> = std::iter::once(PathBuf::from("/etc"))
        .chain(user_dirs.into_iter().flatten())
        .map(|dir| dir.join("ftpdeck").join("config.toml"))
        .chain([PathBuf::from(".ftpdeck/config.toml"), PathBuf::from("ftpdeck.toml")])
        .collect();
    // On Linux ~/.config and the XDG config dir usually coincide.
    paths.dedup();
    paths
}

/// Merge the discovered config files, then `extra` (the `--config` flag),
/// then the `FTPDECK_*` environment overrides.
pub fn load(extra: Option<&Path>) -> anyhow::Result<Config> {
    load_with_env(extra, |var| std::env::var(var).ok())
}

fn load_with_env(
    extra: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    let mut files: Vec<PathBuf> = config_search_paths()
        .into_iter()
        .filter(|p| p.is_file())
        .collect();
    files.extend(extra.map(Path::to_path_buf));

    let mut merged = empty_table();
    for path in &files {
        debug!(path = %path.display(), "loading config layer");
        merge_toml(&mut merged, read_layer(path)?);
    }
    merge_toml(&mut merged, env_layer(lookup));

    merged
        .try_into()
        .context("config does not match the expected schema")
}

fn empty_table() -> toml::Value {
    toml::Value::Table(toml::map::Map::new())
}

fn read_layer(path: &Path) -> anyhow::Result<toml::Value> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn env_layer(lookup: impl Fn(&str) -> Option<String>) -> toml::Value {
    let mut root = toml::map::Map::new();
    for &(var, table, key) in ENV_OVERRIDES {
        let Some(value) = lookup(var).filter(|v| !v.is_empty()) else {
            continue;
        };
        debug!(var, "config override from environment");
        if let toml::Value::Table(t) = root.entry(table).or_insert(empty_table()) {
            t.insert(key.to_string(), toml::Value::String(value));
        }
    }
    toml::Value::Table(root)
}

/// Deep-merge `src` into `dst`.  Tables merge key by key; anything else in
/// `src` replaces what `dst` had.
fn merge_toml(dst: &mut toml::Value, src: toml::Value) {
    match (dst, src) {
        (toml::Value::Table(d), toml::Value::Table(s)) => {
            for (k, v) in s {
                merge_toml(d.entry(k).or_insert(empty_table()), v);
            }
        }
        (dst, src) => *dst = src,
    }
}
