// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ftpdeck",
    about = "Terminal front-end for the ftpserve chat, log and score API",
    version,
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (overrides auto-discovery)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// API root, e.g. "https://ftpserve.example.com"
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Credential blob as JSON, forwarded verbatim as `ftpConfig`.
    /// Overrides the `[credentials]` table of the config file.
    #[arg(
        long,
        env = "FTPDECK_CREDENTIALS",
        hide_env_values = true,
        value_name = "JSON",
        global = true
    )]
    pub credentials: Option<String>,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show (or clear) the server activity log
    Logs {
        /// Clear the log instead of listing it
        #[arg(long)]
        clear: bool,
    },
    /// Read or post chat messages
    #[command(subcommand)]
    Chat(ChatCommand),
    /// Networked high-score board
    #[command(subcommand)]
    Scores(ScoresCommand),
    /// Local high-score board (persisted on this machine)
    #[command(subcommand)]
    Highscore(HighscoreCommand),
    /// Split a message into text / link / image segments
    Parse {
        /// Print the segments as JSON
        #[arg(long)]
        json: bool,
        text: String,
    },
    /// HTML-escape a message
    Sanitize { text: String },
    /// Check file names against a media folder's upload filter
    Filter {
        /// Folder label, e.g. "Music" or "TV Shows"
        folder: String,
        files: Vec<String>,
    },
    /// Print the effective configuration and exit
    ShowConfig,
    /// Generate shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ChatCommand {
    /// Print the chat history
    List,
    /// Post a message and print the updated history
    Send {
        #[arg(long, short = 'u')]
        user: String,
        message: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ScoresCommand {
    /// Print the shared score board
    List,
    /// Submit a score
    Submit {
        #[arg(long, short = 'u')]
        user: String,
        score: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum HighscoreCommand {
    /// Record a score
    Add { user: String, score: u64 },
    /// Print every user's best scores
    Show,
    /// Delete all local scores
    Reset,
}

pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "ftpdeck", &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_chat_send() {
        let cli = Cli::try_parse_from(["ftpdeck", "chat", "send", "-u", "ann", "hello"]).unwrap();
        match cli.command {
            Commands::Chat(ChatCommand::Send { user, message }) => {
                assert_eq!(user, "ann");
                assert_eq!(message, "hello");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ftpdeck", "logs", "--clear", "--base-url", "http://localhost:1", "-vv",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Logs { clear: true }));
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:1"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn help_never_shows_credential_values() {
        std::env::set_var("FTPDECK_CREDENTIALS", r#"{"password":"hunter2"}"#);
        let help = Cli::command().render_long_help().to_string();
        std::env::remove_var("FTPDECK_CREDENTIALS");
        assert!(help.contains("FTPDECK_CREDENTIALS"));
        assert!(!help.contains("hunter2"));
    }

    #[test]
    fn highscore_score_must_be_numeric() {
        assert!(Cli::try_parse_from(["ftpdeck", "highscore", "add", "x", "lots"]).is_err());
    }
}
