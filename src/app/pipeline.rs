//! The briefing pipeline, independent of how it is invoked.
//!
//! fetch (sentiment, rate chains, histories) -> normalize -> render sections
//! -> insight -> digest -> delivery
//!
//! Every metric is fetched inside its own fallback boundary: a failure turns
//! into a no-data line for that metric and the run carries on.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::Endpoints;
use crate::data::{HistoryClient, ProviderChain, SentimentClient};
use crate::delivery::DeliverySink;
use crate::domain::{RATE_METRICS, Section, SeriesMetric, series_in};
use crate::http::HttpFetch;
use crate::insight::{InsightGenerator, insight_line};
use crate::normalize::normalize_anchors;
use crate::report::format::{self, RenderedMetric};
use crate::report::{Digest, ReportBuilder, ReportSection};

/// Fetch every metric and render all sections in their fixed order.
pub fn collect_report(http: &dyn HttpFetch, endpoints: &Endpoints) -> ReportBuilder {
    Section::ORDER
        .iter()
        .fold(ReportBuilder::new(), |report, section| {
            report.with_section(build_section(*section, http, endpoints))
        })
}

fn build_section(section: Section, http: &dyn HttpFetch, endpoints: &Endpoints) -> ReportSection {
    let out = ReportSection::new(section);
    match section {
        Section::Sentiment => {
            let status = SentimentClient::new(http, &endpoints.sentiment).fetch();
            out.with_metric(format::sentiment(&status))
        }
        Section::DomesticRates => RATE_METRICS.iter().fold(out, |out, metric| {
            let chain = ProviderChain::for_rate(metric, endpoints);
            debug!(metric = chain.metric(), providers = ?chain.provider_names(), "resolving rate");
            let resolved = chain.resolve(http);
            out.with_metric(format::rate_metric(metric, resolved.as_ref()))
        }),
        Section::DomesticIndices | Section::Global => {
            let history = HistoryClient::new(http, &endpoints.yahoo);
            series_in(section).fold(out, |out, metric| out.with_metric(series_entry(&history, metric)))
        }
    }
}

fn series_entry(history: &HistoryClient<'_>, metric: &SeriesMetric) -> RenderedMetric {
    match history.fetch_anchors(metric.symbol, metric.lookback) {
        Ok(anchors) => format::series_metric(metric, &normalize_anchors(metric.scaling, anchors)),
        Err(e) => {
            warn!(metric = metric.id, error = %e, "no data for metric");
            format::unavailable(metric.label)
        }
    }
}

/// Run one briefing end to end and hand the digest to `sink` exactly once.
pub fn run_briefing(
    http: &dyn HttpFetch,
    endpoints: &Endpoints,
    generator: &dyn InsightGenerator,
    sink: &dyn DeliverySink,
    destination: &str,
    date: NaiveDate,
) -> Digest {
    let report = collect_report(http, endpoints);
    info!(sections = report.sections().len(), "report assembled");

    let digest = Digest {
        date,
        report: report.display_text(),
        insight: insight_line(generator, &report.summary_text()),
    };

    sink.deliver(destination, &digest.render());
    digest
}
