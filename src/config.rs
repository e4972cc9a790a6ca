//! Process configuration, read once at startup from the environment.
//!
//! A `.env` file in the working directory is loaded first when present.
//! Missing required values are fatal (exit code 2) before any fetch happens.

use crate::error::AppError;

pub const DEFAULT_INSIGHT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_INSIGHT_MODEL: &str = "gpt-4o-mini";

/// Base URLs of every upstream, overridable for staging or tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub yahoo: String,
    pub naver: String,
    pub investing: String,
    pub fred: String,
    pub sentiment: String,
    pub telegram: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            yahoo: crate::data::yahoo::DEFAULT_BASE_URL.to_string(),
            naver: crate::data::portal::DEFAULT_BASE_URL.to_string(),
            investing: crate::data::investing::DEFAULT_BASE_URL.to_string(),
            fred: crate::data::fred::DEFAULT_BASE_URL.to_string(),
            sentiment: crate::data::sentiment::DEFAULT_URL.to_string(),
            telegram: crate::delivery::DEFAULT_TELEGRAM_API.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryConfig {
    pub telegram_token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` in preview mode, where nothing is sent.
    pub delivery: Option<DeliveryConfig>,
    pub insight: InsightConfig,
    pub endpoints: Endpoints,
}

impl Config {
    /// Read configuration from the process environment (after `.env`).
    pub fn from_env(require_delivery: bool) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(require_delivery, |key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(require_delivery: bool, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &str| get(key).ok_or_else(|| AppError::config_missing(key));

        let delivery = if require_delivery {
            Some(DeliveryConfig {
                telegram_token: require("TELEGRAM_TOKEN")?,
                chat_id: require("CHAT_ID")?,
            })
        } else {
            None
        };

        let insight = InsightConfig {
            api_key: require("INSIGHT_API_KEY")?,
            api_base: get("INSIGHT_API_BASE").unwrap_or_else(|| DEFAULT_INSIGHT_API_BASE.to_string()),
            model: get("INSIGHT_MODEL").unwrap_or_else(|| DEFAULT_INSIGHT_MODEL.to_string()),
        };

        let defaults = Endpoints::default();
        let endpoints = Endpoints {
            yahoo: get("BRIEF_YAHOO_URL").unwrap_or(defaults.yahoo),
            naver: get("BRIEF_NAVER_URL").unwrap_or(defaults.naver),
            investing: get("BRIEF_INVESTING_URL").unwrap_or(defaults.investing),
            fred: get("BRIEF_FRED_URL").unwrap_or(defaults.fred),
            sentiment: get("BRIEF_SENTIMENT_URL").unwrap_or(defaults.sentiment),
            telegram: get("BRIEF_TELEGRAM_URL").unwrap_or(defaults.telegram),
        };

        Ok(Self {
            delivery,
            insight,
            endpoints,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn send_mode_requires_delivery_values() {
        let err = Config::from_lookup(true, lookup(&[("INSIGHT_API_KEY", "k"), ("CHAT_ID", "1")]))
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("TELEGRAM_TOKEN"));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let err = Config::from_lookup(
            true,
            lookup(&[("TELEGRAM_TOKEN", "t"), ("CHAT_ID", "  "), ("INSIGHT_API_KEY", "k")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("CHAT_ID"));
    }

    #[test]
    fn insight_key_is_always_required() {
        let err = Config::from_lookup(false, lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("INSIGHT_API_KEY"));
    }

    #[test]
    fn preview_mode_with_defaults() {
        let config = Config::from_lookup(false, lookup(&[("INSIGHT_API_KEY", "k")])).unwrap();
        assert_eq!(config.delivery, None);
        assert_eq!(config.insight.api_base, DEFAULT_INSIGHT_API_BASE);
        assert_eq!(config.insight.model, DEFAULT_INSIGHT_MODEL);
        assert_eq!(config.endpoints, Endpoints::default());
    }

    #[test]
    fn endpoint_overrides_apply() {
        let config = Config::from_lookup(
            true,
            lookup(&[
                ("TELEGRAM_TOKEN", "t"),
                ("CHAT_ID", "-100"),
                ("INSIGHT_API_KEY", "k"),
                ("BRIEF_YAHOO_URL", "http://127.0.0.1:9000"),
            ]),
        )
        .unwrap();
        assert_eq!(config.endpoints.yahoo, "http://127.0.0.1:9000");
        assert_eq!(config.endpoints.naver, crate::data::portal::DEFAULT_BASE_URL);
        assert_eq!(
            config.delivery,
            Some(DeliveryConfig {
                telegram_token: "t".to_string(),
                chat_id: "-100".to_string(),
            })
        );
    }
}
