//! Fear & Greed index from the alternative.me aggregator.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::ChangeRecord;
use crate::error::FetchError;
use crate::http::HttpFetch;
use crate::normalize::format_change;

pub const DEFAULT_URL: &str = "https://api.alternative.me/fng/?limit=2";

const NAME: &str = "alternative.me";

/// Status buckets, highest first. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBucket {
    ExtremeGreed,
    Greed,
    Neutral,
    Fear,
    ExtremeFear,
}

impl SentimentBucket {
    pub fn from_score(score: u8) -> Self {
        match score {
            75.. => SentimentBucket::ExtremeGreed,
            55..=74 => SentimentBucket::Greed,
            45..=54 => SentimentBucket::Neutral,
            25..=44 => SentimentBucket::Fear,
            _ => SentimentBucket::ExtremeFear,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SentimentBucket::ExtremeGreed => "극단적 탐욕",
            SentimentBucket::Greed => "탐욕",
            SentimentBucket::Neutral => "중립",
            SentimentBucket::Fear => "공포",
            SentimentBucket::ExtremeFear => "극단적 공포",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SentimentBucket::ExtremeGreed => "🤑",
            SentimentBucket::Greed => "😀",
            SentimentBucket::Neutral => "😐",
            SentimentBucket::Fear => "😨",
            SentimentBucket::ExtremeFear => "😱",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentimentReading {
    pub current: u8,
    pub previous: u8,
}

impl SentimentReading {
    pub fn bucket(&self) -> SentimentBucket {
        SentimentBucket::from_score(self.current)
    }

    pub fn change(&self) -> ChangeRecord {
        format_change(f64::from(self.current), f64::from(self.previous))
    }
}

/// Outcome of a sentiment fetch. `Unavailable` is never a score of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentStatus {
    Available(SentimentReading),
    Unavailable,
}

pub struct SentimentClient<'a> {
    http: &'a dyn HttpFetch,
    url: &'a str,
}

impl<'a> SentimentClient<'a> {
    pub fn new(http: &'a dyn HttpFetch, url: &'a str) -> Self {
        Self { http, url }
    }

    pub fn fetch(&self) -> SentimentStatus {
        match self.try_fetch() {
            Ok(reading) => SentimentStatus::Available(reading),
            Err(e) => {
                warn!(error = %e, "sentiment index unavailable");
                SentimentStatus::Unavailable
            }
        }
    }

    fn try_fetch(&self) -> Result<SentimentReading, FetchError> {
        let body = self.http.get_text(self.url)?;
        parse_reading(&body).map_err(|reason| FetchError::unavailable(NAME, reason))
    }
}

#[derive(Debug, Deserialize)]
struct FngResponse {
    #[serde(default)]
    data: Vec<FngEntry>,
}

#[derive(Debug, Deserialize)]
struct FngEntry {
    value: Value,
}

fn parse_reading(body: &str) -> Result<SentimentReading, String> {
    let resp: FngResponse =
        serde_json::from_str(body).map_err(|e| format!("invalid JSON: {e}"))?;

    let first = resp.data.first().ok_or_else(|| "empty data list".to_string())?;
    let current = parse_score(&first.value)?;
    let previous = match resp.data.get(1).map(|entry| parse_score(&entry.value)) {
        Some(Ok(previous)) => previous,
        Some(Err(reason)) => {
            warn!(%reason, "previous sentiment entry unusable, reusing current");
            current
        }
        None => current,
    };

    Ok(SentimentReading { current, previous })
}

/// Scores arrive as numbers or numeric strings and must lie in 0..=100.
fn parse_score(value: &Value) -> Result<u8, String> {
    let score = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
    .ok_or_else(|| format!("non-numeric score {value}"))?;

    u8::try_from(score)
        .ok()
        .filter(|s| *s <= 100)
        .ok_or_else(|| format!("score {score} out of range"))
}
