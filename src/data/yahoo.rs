//! Daily close history from the Yahoo Finance chart API, reduced to anchors.

use serde::Deserialize;
use tracing::debug;

use crate::domain::{AnchorSet, Lookback};
use crate::error::FetchError;
use crate::http::HttpFetch;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Sessions back from `current` for each anchor.
const PRIOR_OFFSET: usize = 1;
const WEEK_OFFSET: usize = 5;
const MONTH_OFFSET: usize = 21;
const YEAR_OFFSET: usize = 251;

pub struct HistoryClient<'a> {
    http: &'a dyn HttpFetch,
    base_url: &'a str,
}

impl<'a> HistoryClient<'a> {
    pub fn new(http: &'a dyn HttpFetch, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Fetch `symbol`'s daily closes and extract the anchor points.
    pub fn fetch_anchors(&self, symbol: &str, lookback: Lookback) -> Result<AnchorSet, FetchError> {
        let closes = self.fetch_closes(symbol, lookback)?;
        debug!(symbol, n = closes.len(), "daily closes fetched");
        extract_anchors(&closes, lookback.includes_year())
            .ok_or_else(|| FetchError::unavailable(source_name(symbol), "fewer than 2 closes"))
    }

    /// Oldest→newest closes with missing points dropped.
    pub fn fetch_closes(&self, symbol: &str, lookback: Lookback) -> Result<Vec<f64>, FetchError> {
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval=1d",
            self.base_url.trim_end_matches('/'),
            encode_symbol(symbol),
            lookback.range_param()
        );
        let body = self.http.get_text(&url)?;
        parse_closes(&body).map_err(|reason| FetchError::unavailable(source_name(symbol), reason))
    }
}

/// Index symbols start with `^`, which is not valid unescaped in a URL path.
fn encode_symbol(symbol: &str) -> String {
    symbol.replace('^', "%5E")
}

fn source_name(symbol: &str) -> String {
    format!("yahoo:{symbol}")
}

/// Pick the anchors out of an oldest→newest series.
///
/// Offsets that reach past the start of the series clamp to the first sample.
/// Returns `None` when there are fewer than two samples.
pub fn extract_anchors(closes: &[f64], include_year: bool) -> Option<AnchorSet> {
    if closes.len() < 2 {
        return None;
    }
    let last = closes.len() - 1;
    let back = |offset: usize| closes[last.saturating_sub(offset)];

    Some(AnchorSet {
        current: closes[last],
        prior: back(PRIOR_OFFSET),
        week_ago: back(WEEK_OFFSET),
        month_ago: back(MONTH_OFFSET),
        year_ago: include_year.then(|| back(YEAR_OFFSET)),
    })
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

fn parse_closes(body: &str) -> Result<Vec<f64>, String> {
    let resp: ChartResponse =
        serde_json::from_str(body).map_err(|e| format!("invalid chart JSON: {e}"))?;

    if let Some(err) = resp.chart.error {
        return Err(format!("{}: {}", err.code, err.description));
    }

    let quote = resp
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .and_then(|result| result.indicators.quote.into_iter().next())
        .ok_or_else(|| "empty chart result".to_string())?;

    Ok(quote
        .close
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::CannedHttp;

    fn series(n: usize) -> Vec<f64> {
        (1..=n).map(|i| i as f64).collect()
    }

    #[test]
    fn anchors_from_long_series() {
        let closes = series(30);
        let a = extract_anchors(&closes, false).unwrap();
        assert_eq!(a.current, 30.0);
        assert_eq!(a.prior, 29.0);
        assert_eq!(a.week_ago, 25.0);
        assert_eq!(a.month_ago, 9.0);
        assert_eq!(a.year_ago, None);
    }

    #[test]
    fn anchors_at_exactly_22_points() {
        let closes = series(22);
        let a = extract_anchors(&closes, false).unwrap();
        assert_eq!(a.month_ago, closes[0]);
        assert_eq!(a.week_ago, closes[16]);
    }

    #[test]
    fn short_series_clamps_to_first_sample() {
        let closes = series(10);
        let a = extract_anchors(&closes, true).unwrap();
        assert_eq!(a.month_ago, 1.0);
        assert_eq!(a.week_ago, 5.0);
        assert_eq!(a.year_ago, Some(1.0));

        let two = extract_anchors(&[7.0, 8.0], false).unwrap();
        assert_eq!(two.current, 8.0);
        assert_eq!(two.prior, 7.0);
        assert_eq!(two.week_ago, 7.0);
        assert_eq!(two.month_ago, 7.0);
    }

    #[test]
    fn year_anchor_uses_252nd_from_last() {
        let closes = series(300);
        let a = extract_anchors(&closes, true).unwrap();
        assert_eq!(a.year_ago, Some(closes[300 - 252]));
    }

    #[test]
    fn fewer_than_two_points_is_unavailable() {
        assert!(extract_anchors(&[], false).is_none());
        assert!(extract_anchors(&[1.0], false).is_none());

        let http = CannedHttp::new().with(
            "/v8/finance/chart/%5EKS11",
            r#"{"chart":{"result":[{"indicators":{"quote":[{"close":[null, 2650.5]}]}}],"error":null}}"#,
        );
        let client = HistoryClient::new(&http, "https://yahoo.test");
        let err = client.fetch_anchors("^KS11", Lookback::Quarter).unwrap_err();
        assert!(matches!(err, FetchError::DataUnavailable { .. }));
    }

    #[test]
    fn parses_chart_and_skips_nulls() {
        let body = r#"{"chart":{"result":[{"meta":{"symbol":"^KS11"},
            "timestamp":[1,2,3,4],
            "indicators":{"quote":[{"open":[1,2,3,4],"close":[2600.0,null,2610.5,2650.25]}]}}],
            "error":null}}"#;
        assert_eq!(parse_closes(body).unwrap(), vec![2600.0, 2610.5, 2650.25]);
    }

    #[test]
    fn chart_error_is_reported() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = parse_closes(body).unwrap_err();
        assert!(err.contains("Not Found"));
    }

    #[test]
    fn fetch_builds_range_from_lookback() {
        let http = CannedHttp::new().with(
            "range=2y",
            r#"{"chart":{"result":[{"indicators":{"quote":[{"close":[1.0,2.0,3.0]}]}}],"error":null}}"#,
        );
        let client = HistoryClient::new(&http, "https://yahoo.test/");
        let a = client.fetch_anchors("^GSPC", Lookback::TwoYears).unwrap();
        assert_eq!(a.current, 3.0);
        assert_eq!(a.year_ago, Some(1.0));
        assert_eq!(
            http.requested.borrow()[0],
            "https://yahoo.test/v8/finance/chart/%5EGSPC?range=2y&interval=1d"
        );
    }
}
