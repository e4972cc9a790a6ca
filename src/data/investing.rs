//! Investing.com instrument page.
//!
//! The site has shipped several layouts over time; each known one gets a rule.
//! Only the last price is read, so readings from here carry no diff.

use crate::domain::Reading;
use crate::error::FetchError;
use crate::http::HttpFetch;

use super::resolver::Provider;
use super::rules::{ExtractRule, first_match};

pub const DEFAULT_BASE_URL: &str = "https://www.investing.com";

const NAME: &str = "Investing.com";

pub const PRICE_RULES: [ExtractRule; 3] = [
    ExtractRule {
        name: "instrument-price-last",
        pattern: r#"data-test="instrument-price-last"[^>]*>\s*(?P<value>[-+]?[0-9][0-9.,]*)\s*<"#,
    },
    ExtractRule {
        name: "last_last",
        pattern: r#"id="last_last"[^>]*>\s*(?P<value>[-+]?[0-9][0-9.,]*)\s*<"#,
    },
    ExtractRule {
        name: "pid last",
        pattern: r#"class="[^"]*\bpid-[0-9]+-last\b[^"]*"[^>]*>\s*(?P<value>[-+]?[0-9][0-9.,]*)\s*<"#,
    },
];

pub struct InstrumentPageProvider {
    url: String,
}

impl InstrumentPageProvider {
    pub fn new(base_url: &str, instrument_path: &str) -> Self {
        Self {
            url: format!(
                "{}/{}",
                base_url.trim_end_matches('/'),
                instrument_path.trim_start_matches('/')
            ),
        }
    }
}

impl Provider for InstrumentPageProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn fetch(&self, http: &dyn HttpFetch) -> Result<Reading, FetchError> {
        let body = http.get_text(&self.url)?;
        parse_instrument_page(&body)
    }
}

pub fn parse_instrument_page(body: &str) -> Result<Reading, FetchError> {
    let price = first_match(&PRICE_RULES, body)
        .ok_or_else(|| FetchError::unavailable(NAME, "no price rule matched"))?;
    Ok(Reading {
        value: price.value,
        diff: None,
    })
}
