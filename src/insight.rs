//! One-line commentary from an OpenAI-compatible chat completions endpoint.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::InsightConfig;
use crate::error::InsightError;

/// Fixed instruction sent ahead of the condensed summary.
pub const INSIGHT_INSTRUCTION: &str = "다음은 오늘의 시장 지표 요약이다. \
     이를 바탕으로 개인 투자자에게 줄 조언을 한국어 한 문장으로 작성하라.";

/// Used in place of the insight whenever generation fails.
pub const INSIGHT_FALLBACK: &str = "죄송합니다. 오늘은 AI 인사이트를 생성하지 못했습니다.";

pub const MAX_INSIGHT_TOKENS: u32 = 200;

pub trait InsightGenerator {
    fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, InsightError>;
}

/// Ask `generator` for a sentence about `summary`, falling back on failure.
pub fn insight_line(generator: &dyn InsightGenerator, summary: &str) -> String {
    let prompt = format!("{INSIGHT_INSTRUCTION}\n\n{summary}");
    match generator.generate(&prompt, MAX_INSIGHT_TOKENS).map(|text| strip_markup(&text)) {
        Ok(text) if !text.is_empty() => text,
        Ok(_) => {
            warn!("insight generator returned empty text");
            INSIGHT_FALLBACK.to_string()
        }
        Err(e) => {
            warn!(error = %e, "insight generation failed");
            INSIGHT_FALLBACK.to_string()
        }
    }
}

/// Drop legacy Telegram Markdown control characters from generated text.
///
/// The digest is sent with `parse_mode=Markdown`; one stray `*` or `_` gets the
/// whole message rejected.
fn strip_markup(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '*' | '`' | '['))
        .map(|c| if c == '_' { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

pub struct ChatInsightClient {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl ChatInsightClient {
    pub fn new(client: Client, config: &InsightConfig) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl InsightGenerator for ChatInsightClient {
    fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, InsightError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
        };

        debug!(model = %self.model, "requesting insight");
        let resp = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| InsightError::GenerationFailed(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(InsightError::GenerationFailed(format!("HTTP {status}")));
        }

        let body: ChatResponse = resp
            .json()
            .map_err(|e| InsightError::GenerationFailed(format!("invalid response: {e}")))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| InsightError::GenerationFailed("response had no content".to_string()))
    }
}
