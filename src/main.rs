// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
mod cli;

use std::sync::Arc;

use anyhow::{bail, Context};
use tracing::debug;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use clap::Parser;
use cli::{ChatCommand, Cli, Commands, HighscoreCommand, ScoresCommand};
use ftpdeck_config::Config;
use ftpdeck_message::{image_urls, parse_message, sanitize_message, SegmentKind};
use ftpdeck_store::filters::{accept_string, folder_description, is_file_allowed};
use ftpdeck_store::{
    ActivityLogStore, ApiClient, ChatMessage, ChatStore, Credentials, HighScoreStore,
    JsonFileStorage, NetworkScoreStore, RemoteState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Commands that need no configuration
    match &cli.command {
        Commands::Completions { shell } => {
            cli::print_completions(*shell);
            return Ok(());
        }
        Commands::Parse { json, text } => return print_segments(text, *json),
        Commands::Sanitize { text } => {
            println!("{}", sanitize_message(text));
            return Ok(());
        }
        Commands::Filter { folder, files } => {
            print_filter(folder, files);
            return Ok(());
        }
        _ => {}
    }

    let config = load_config(&cli)?;

    match &cli.command {
        Commands::ShowConfig => {
            println!("{}", serde_yaml::to_string(&config).unwrap_or_default());
            Ok(())
        }
        Commands::Logs { clear } => {
            let store = ActivityLogStore::new(api_client(&config));
            let credentials = resolve_credentials(&cli, &config)?;
            if *clear {
                store.clear_logs(&credentials).await;
                check(&store.state().get())?;
                println!("Activity log cleared.");
            } else {
                store.load_logs(&credentials).await;
                let state = store.state().get();
                check(&state)?;
                for log in &state.items {
                    println!("{}", log.summary());
                }
            }
            Ok(())
        }
        Commands::Chat(cmd) => {
            let store = ChatStore::new(api_client(&config));
            let credentials = resolve_credentials(&cli, &config)?;
            match cmd {
                ChatCommand::List => store.load_messages(&credentials).await,
                ChatCommand::Send { user, message } => {
                    store.send_message(user, message, &credentials).await
                }
            }
            let state = store.state().get();
            check(&state)?;
            for msg in &state.items {
                println!("{}", render_chat_line(msg));
                for line in render_attachments(msg) {
                    println!("{line}");
                }
            }
            Ok(())
        }
        Commands::Scores(cmd) => {
            let store = NetworkScoreStore::new(api_client(&config));
            let credentials = resolve_credentials(&cli, &config)?;
            match cmd {
                ScoresCommand::List => store.load_scores(&credentials).await,
                ScoresCommand::Submit { user, score } => {
                    store.add_score(user, *score, &credentials).await
                }
            }
            let state = store.state().get();
            check(&state)?;
            for (user, scores) in &state.items {
                println!("{user}: {}", join_scores(scores));
            }
            Ok(())
        }
        Commands::Highscore(cmd) => run_highscore(cmd, &config),
        Commands::Completions { .. }
        | Commands::Parse { .. }
        | Commands::Sanitize { .. }
        | Commands::Filter { .. } => unreachable!("handled above"),
    }
}

/// Load config layers and apply command-line overrides.
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = ftpdeck_config::load(cli.config.as_deref())?;
    if let Some(url) = &cli.base_url {
        config.api.base_url = url.clone();
    }
    debug!(base_url = %config.api.base_url, "configuration loaded");
    Ok(config)
}

fn api_client(config: &Config) -> ApiClient {
    ApiClient::from_config(&config.api)
}

/// `--credentials` wins over the config file's `[credentials]` table.
fn resolve_credentials(cli: &Cli, config: &Config) -> anyhow::Result<Credentials> {
    if let Some(raw) = &cli.credentials {
        let value: serde_json::Value =
            serde_json::from_str(raw).context("parsing --credentials as JSON")?;
        return Ok(Credentials::new(value));
    }
    match &config.credentials {
        Some(value) => Ok(Credentials::new(value.clone())),
        None => {
            bail!("no credentials: pass --credentials or add a [credentials] table to the config")
        }
    }
}

fn check<T>(state: &RemoteState<T>) -> anyhow::Result<()> {
    match &state.error {
        Some(e) => bail!("{e}"),
        None => Ok(()),
    }
}

/// Images are shown as numbered placeholders; see [`render_attachments`].
fn render_chat_line(msg: &ChatMessage) -> String {
    let mut images = 0;
    let body: String = parse_message(&msg.message)
        .into_iter()
        .map(|seg| match seg.kind {
            SegmentKind::Text => seg.content,
            SegmentKind::Link => format!("<{}>", seg.content),
            SegmentKind::Image => {
                images += 1;
                format!("[image #{images}]")
            }
        })
        .collect();
    match msg.timestamp() {
        Some(ts) => format!("[{ts}] {}: {body}", msg.username),
        None => format!("{}: {body}", msg.username),
    }
}

fn render_attachments(msg: &ChatMessage) -> Vec<String> {
    image_urls(&msg.message)
        .into_iter()
        .enumerate()
        .map(|(i, url)| format!("    #{} {url}", i + 1))
        .collect()
}

fn join_scores(scores: &[u64]) -> String {
    scores.iter().map(u64::to_string).collect::<Vec<_>>().join(", ")
}

fn print_segments(text: &str, json: bool) -> anyhow::Result<()> {
    let segments = parse_message(text);
    if json {
        println!("{}", serde_json::to_string_pretty(&segments)?);
    } else {
        for seg in &segments {
            println!("{:<5}  {:?}", seg.kind.to_string(), seg.content);
        }
    }
    Ok(())
}

fn print_filter(folder: &str, files: &[String]) {
    println!("{folder}: {}", folder_description(folder));
    let accept = accept_string(folder);
    if !accept.is_empty() {
        println!("  accepts: {accept}");
    }
    for file in files {
        let verdict = if is_file_allowed(file, folder) { "allowed" } else { "rejected" };
        println!("  {file}: {verdict}");
    }
}

fn run_highscore(cmd: &HighscoreCommand, config: &Config) -> anyhow::Result<()> {
    let storage = Arc::new(JsonFileStorage::new(config.storage.resolved_scores_dir()));
    let store = HighScoreStore::new(storage);
    // Reset must work even when the persisted slot is unreadable.
    if !matches!(cmd, HighscoreCommand::Reset) {
        store.restore()?;
    }

    match cmd {
        HighscoreCommand::Add { user, score } => {
            store.add_score(user, *score);
            if let Some(s) = store.scores_for(user) {
                println!("{user}: {}", join_scores(&s.all_time));
            }
        }
        HighscoreCommand::Show => {
            for (user, s) in store.state().get() {
                println!("{user}: {}", join_scores(&s.all_time));
            }
        }
        HighscoreCommand::Reset => {
            store.reset();
            println!("Local high scores reset.");
        }
    }
    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
