//! Command-line parsing for the daily macro briefing.
//!
//! Parsing only; `crate::app` decides what each command does.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "brief", version, about = "Daily Korean market macro briefing")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build today's digest and post it to the configured Telegram chat.
    Send(RunArgs),
    /// Build the digest and print it to stdout instead of sending it.
    Preview(RunArgs),
}

impl Command {
    pub fn args(&self) -> &RunArgs {
        match self {
            Command::Send(args) | Command::Preview(args) => args,
        }
    }

    pub fn delivers(&self) -> bool {
        matches!(self, Command::Send(_))
    }
}

/// Options shared by both commands.
#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    /// Date printed in the digest header (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    /// Per-request timeout for every upstream call.
    #[arg(long, default_value_t = crate::http::DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}
