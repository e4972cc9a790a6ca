//! Provider chains: resolve one scalar metric from ordered fallback sources.

use tracing::{info, warn};

use crate::config::Endpoints;
use crate::domain::{Frequency, PlausibleRange, RateMetric, Reading, Resolved};
use crate::error::FetchError;
use crate::http::HttpFetch;

use super::fred::FredCsvProvider;
use super::investing::InstrumentPageProvider;
use super::portal::PortalDetailProvider;

/// One source able to produce a reading for one metric.
///
/// Every call is self-contained: endpoint, request and parse rules all live in
/// the provider, nothing is carried between calls.
pub trait Provider {
    /// Display name, recorded as the source of a resolved value.
    fn name(&self) -> &'static str;

    fn frequency(&self) -> Frequency {
        Frequency::Daily
    }

    fn fetch(&self, http: &dyn HttpFetch) -> Result<Reading, FetchError>;
}

/// Ordered providers for one metric plus the range its values must fall in.
pub struct ProviderChain {
    metric: &'static str,
    range: PlausibleRange,
    providers: Vec<Box<dyn Provider>>,
}

impl ProviderChain {
    pub fn new(metric: &'static str, range: PlausibleRange) -> Self {
        Self {
            metric,
            range,
            providers: Vec::new(),
        }
    }

    pub fn with(mut self, provider: impl Provider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Portal page, then the international instrument page, then the monthly
    /// FRED series when the metric has one.
    pub fn for_rate(metric: &RateMetric, endpoints: &Endpoints) -> Self {
        let chain = Self::new(metric.id, metric.range)
            .with(PortalDetailProvider::new(&endpoints.naver, metric.portal_code))
            .with(InstrumentPageProvider::new(&endpoints.investing, metric.instrument_path));
        match metric.fred_series {
            Some(series) => chain.with(FredCsvProvider::new(&endpoints.fred, series)),
            None => chain,
        }
    }

    pub fn metric(&self) -> &'static str {
        self.metric
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Try each provider in order and keep the first plausible reading.
    ///
    /// Never fails: provider errors and implausible values are logged and the
    /// next provider is tried. `None` means every provider came up empty.
    pub fn resolve(&self, http: &dyn HttpFetch) -> Option<Resolved> {
        for provider in &self.providers {
            let reading = match provider.fetch(http) {
                Ok(reading) => reading,
                Err(e) => {
                    warn!(metric = self.metric, provider = provider.name(), error = %e, "provider failed");
                    continue;
                }
            };

            if !self.range.contains(reading.value) {
                warn!(
                    metric = self.metric,
                    provider = provider.name(),
                    value = reading.value,
                    min = self.range.min,
                    max = self.range.max,
                    "discarding implausible value"
                );
                continue;
            }

            info!(metric = self.metric, provider = provider.name(), value = reading.value, "resolved");
            return Some(Resolved {
                value: reading.value,
                diff: reading.diff.filter(|d| d.is_finite()),
                source: provider.name(),
                frequency: provider.frequency(),
            });
        }

        warn!(metric = self.metric, "all providers exhausted");
        None
    }
}
