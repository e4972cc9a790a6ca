//! FRED graph CSV download for monthly fallback series.
//!
//! `fredgraph.csv` returns a header row and chronological `date,value` rows.
//! Missing observations are printed as `.` and skipped.

use crate::domain::{Frequency, Reading};
use crate::error::FetchError;
use crate::http::HttpFetch;

use super::resolver::Provider;

pub const DEFAULT_BASE_URL: &str = "https://fred.stlouisfed.org";

const NAME: &str = "FRED";

pub struct FredCsvProvider {
    series_id: String,
    url: String,
}

impl FredCsvProvider {
    pub fn new(base_url: &str, series_id: &str) -> Self {
        Self {
            series_id: series_id.to_string(),
            url: format!(
                "{}/graph/fredgraph.csv?id={series_id}",
                base_url.trim_end_matches('/')
            ),
        }
    }
}

impl Provider for FredCsvProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn frequency(&self) -> Frequency {
        Frequency::Monthly
    }

    fn fetch(&self, http: &dyn HttpFetch) -> Result<Reading, FetchError> {
        let body = http.get_text(&self.url)?;
        let observations = parse_observations(&body)
            .map_err(|reason| FetchError::unavailable(format!("{NAME}:{}", self.series_id), reason))?;
        latest_reading(&observations).ok_or_else(|| {
            FetchError::unavailable(format!("{NAME}:{}", self.series_id), "no valid observations")
        })
    }
}

/// `(date, value)` rows with numeric values, in file order.
pub fn parse_observations(body: &str) -> Result<Vec<(String, f64)>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    reader
        .headers()
        .map_err(|e| format!("failed to read CSV header: {e}"))?;

    let mut out = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| format!("CSV parse error: {e}"))?;
        let (Some(date), Some(raw)) = (record.get(0), record.get(1)) else {
            continue;
        };
        if let Some(value) = parse_value(raw) {
            out.push((date.to_string(), value));
        }
    }
    Ok(out)
}

/// Latest valid observation, diffed against the one before it when present.
pub fn latest_reading(observations: &[(String, f64)]) -> Option<Reading> {
    let mut valid = observations.iter().rev().map(|(_, v)| *v);
    let latest = valid.next()?;
    let previous = valid.next();
    Some(Reading {
        value: latest,
        diff: previous.map(|p| latest - p),
    })
}

fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::CannedHttp;

    const CSV: &str = "observation_date,IRLTLT01KRM156N
2023-11-01,3.71
2023-12-01,3.36
2024-01-01,3.10
2024-02-01,.
";

    #[test]
    fn skips_placeholders_scanning_backwards() {
        let obs = parse_observations(CSV).unwrap();
        assert_eq!(obs.len(), 3);
        let r = latest_reading(&obs).unwrap();
        assert_eq!(r.value, 3.10);
        assert!((r.diff.unwrap() - (3.10 - 3.36)).abs() < 1e-12);
    }

    #[test]
    fn single_valid_row_has_no_diff() {
        let obs = parse_observations("DATE,X\n2024-01-01,3.10\n2024-02-01,.\n").unwrap();
        let r = latest_reading(&obs).unwrap();
        assert_eq!(r.value, 3.10);
        assert_eq!(r.diff, None);
    }

    #[test]
    fn only_placeholders_is_unavailable() {
        let http = CannedHttp::new().with("fredgraph.csv", "DATE,X\n2024-01-01,.\n");
        let provider = FredCsvProvider::new("https://fred.test", "X");
        let err = provider.fetch(&http).unwrap_err();
        assert_eq!(
            err,
            FetchError::unavailable("FRED:X", "no valid observations")
        );
    }

    #[test]
    fn short_rows_are_ignored() {
        let obs = parse_observations("DATE,X\n2024-01-01\n2024-02-01,2.5\n").unwrap();
        assert_eq!(obs, vec![("2024-02-01".to_string(), 2.5)]);
    }

    #[test]
    fn provider_is_monthly() {
        let provider = FredCsvProvider::new("https://fred.test/", "IRLTLT01KRM156N");
        assert_eq!(provider.frequency(), Frequency::Monthly);
        assert_eq!(
            provider.url,
            "https://fred.test/graph/fredgraph.csv?id=IRLTLT01KRM156N"
        );
    }
}
