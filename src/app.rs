//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the real main that:
//! - parses CLI arguments and sets up logging
//! - loads configuration from the environment
//! - wires the HTTP client, insight client and delivery sink
//! - hands off to [`pipeline::run_briefing`]

use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::delivery::{DeliverySink, StdoutSink, TelegramSink};
use crate::error::AppError;
use crate::http::BlockingHttp;
use crate::insight::ChatInsightClient;

pub mod pipeline;

/// Entry point for the `brief` binary.
pub fn run() -> Result<(), AppError> {
    // `brief` alone is what the scheduler runs, so it means `brief send`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);
    init_logging();

    let config = Config::from_env(cli.command.delivers())?;
    let args = cli.command.args();
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let http = BlockingHttp::new(Duration::from_secs(args.timeout_secs))?;
    let insight = ChatInsightClient::new(http.client().clone(), &config.insight);

    let (sink, destination): (Box<dyn DeliverySink>, String) = match (&cli.command, &config.delivery) {
        (Command::Send(_), Some(delivery)) => (
            Box::new(TelegramSink::new(
                http.client().clone(),
                &config.endpoints.telegram,
                delivery.telegram_token.as_str(),
            )),
            delivery.chat_id.clone(),
        ),
        _ => (Box::new(StdoutSink), String::new()),
    };

    info!(%date, command = command_name(&cli.command), "starting briefing");
    pipeline::run_briefing(
        &http,
        &config.endpoints,
        &insight,
        sink.as_ref(),
        &destination,
        date,
    );
    Ok(())
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Send(_) => "send",
        Command::Preview(_) => "preview",
    }
}

/// Logs go to stderr so `brief preview` output stays clean on stdout.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Rewrite argv so `brief` defaults to `brief send`.
///
/// Rules:
/// - `brief`                      -> `brief send`
/// - `brief --date 2024-05-02`    -> `brief send --date 2024-05-02`
/// - `brief --help/--version/-h`  -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("send".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if matches!(arg1.as_str(), "send" | "preview") {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "send".to_string());
    }
    argv
}
