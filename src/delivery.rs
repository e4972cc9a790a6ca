//! Where a finished digest goes.
//!
//! Delivery is fire-and-forget: the outcome is logged, never retried, and
//! never reported back to the pipeline.

use reqwest::blocking::Client;
use serde::Serialize;
use tracing::{info, warn};

pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

pub trait DeliverySink {
    fn deliver(&self, destination: &str, text: &str);
}

pub struct TelegramSink {
    client: Client,
    api_base: String,
    token: String,
}

impl TelegramSink {
    pub fn new(client: Client, api_base: &str, token: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

impl DeliverySink for TelegramSink {
    fn deliver(&self, destination: &str, text: &str) {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.token);
        let payload = SendMessage {
            chat_id: destination,
            text,
            parse_mode: "Markdown",
        };
        match self.client.post(&url).json(&payload).send() {
            Ok(resp) if resp.status().is_success() => {
                info!(chat_id = destination, "digest delivered");
            }
            Ok(resp) => {
                warn!(chat_id = destination, status = %resp.status(), "telegram rejected digest");
            }
            // The error text can embed the URL, which carries the bot token.
            Err(e) => {
                warn!(chat_id = destination, error = %e.without_url(), "telegram unreachable");
            }
        }
    }
}

/// Prints the digest instead of sending it (`brief preview`).
pub struct StdoutSink;

impl DeliverySink for StdoutSink {
    fn deliver(&self, _destination: &str, text: &str) {
        println!("{text}");
    }
}
