//! Naver Finance interest-rate detail page.
//!
//! The page prints the latest yield and the day's change, with the direction
//! carried by a class name (`point_up`, `point_dn`, ...) or a hidden glyph
//! label rather than by a sign on the number.

use crate::domain::Reading;
use crate::error::FetchError;
use crate::http::HttpFetch;

use super::resolver::Provider;
use super::rules::{ExtractRule, first_match, marker_direction, signed_change};

pub const DEFAULT_BASE_URL: &str = "https://finance.naver.com";

const NAME: &str = "Naver Finance";

pub const VALUE_RULES: [ExtractRule; 3] = [
    ExtractRule {
        name: "head_info value",
        pattern: r#"class="head_info[^"]*"[^>]*>\s*<span class="value">\s*(?P<value>[-+]?[0-9][0-9.,]*)"#,
    },
    ExtractRule {
        name: "value span",
        pattern: r#"<span class="value">\s*(?P<value>[-+]?[0-9][0-9.,]*)\s*</span>"#,
    },
    ExtractRule {
        name: "daily table first row",
        pattern: r#"<td class="num">\s*(?P<value>[0-9][0-9.,]*)\s*</td>"#,
    },
];

pub const CHANGE_RULES: [ExtractRule; 3] = [
    ExtractRule {
        name: "head_info marker",
        // The gap may not open or close a <div>, so the change stays inside the block.
        pattern: r#"class="head_info point_(?P<dir>[a-z]+)"(?:[^<]|<[^/d]|</[^d]|<d[^i])*?<span class="change">\s*(?P<value>[-+]?[0-9][0-9.,]*)"#,
    },
    ExtractRule {
        name: "blind glyph",
        pattern: r#"<span class="change">\s*(?P<value>[-+]?[0-9][0-9.,]*)\s*</span>\s*<span class="blind">(?P<dir>[^<]*)</span>"#,
    },
    ExtractRule {
        name: "legacy em marker",
        pattern: r#"<em class="no_(?P<dir>[a-z]+)">[\s\S]*?(?P<value>[0-9]+\.[0-9]+)"#,
    },
];

pub struct PortalDetailProvider {
    url: String,
}

impl PortalDetailProvider {
    pub fn new(base_url: &str, market_index_code: &str) -> Self {
        Self {
            url: format!(
                "{}/marketindex/interestDetail.naver?marketindexCd={market_index_code}",
                base_url.trim_end_matches('/')
            ),
        }
    }
}

impl Provider for PortalDetailProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn fetch(&self, http: &dyn HttpFetch) -> Result<Reading, FetchError> {
        let body = http.get_text(&self.url)?;
        parse_detail_page(&body)
    }
}

/// Extract the printed value and signed change from a detail page.
///
/// A page without a recognizable change still yields its value, with no diff.
pub fn parse_detail_page(body: &str) -> Result<Reading, FetchError> {
    let value = first_match(&VALUE_RULES, body)
        .ok_or_else(|| FetchError::unavailable(NAME, "no value rule matched"))?
        .value;

    let diff = first_match(&CHANGE_RULES, body)
        .map(|change| signed_change(marker_direction(change.marker.as_deref()), change.value));

    Ok(Reading { value, diff })
}
