//! The metrics a briefing reports, as static configuration.

use super::types::{DisplayUnit, Lookback, PlausibleRange, Scaling, Section};

/// A metric read from a daily close history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesMetric {
    pub id: &'static str,
    pub label: &'static str,
    /// Yahoo Finance symbol.
    pub symbol: &'static str,
    pub unit: DisplayUnit,
    pub scaling: Scaling,
    pub lookback: Lookback,
    pub section: Section,
}

/// A scalar rate resolved through a provider chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateMetric {
    pub id: &'static str,
    pub label: &'static str,
    /// `marketindexCd` on the portal detail page.
    pub portal_code: &'static str,
    /// Instrument path on the international site.
    pub instrument_path: &'static str,
    /// Monthly FRED series used as the last resort, if one exists.
    pub fred_series: Option<&'static str>,
    pub range: PlausibleRange,
}

pub const RATE_METRICS: [RateMetric; 2] = [
    RateMetric {
        id: "kr3y",
        label: "국고채 3년",
        portal_code: "IRR_GOVT03Y",
        instrument_path: "rates-bonds/south-korea-3-year-bond-yield",
        fred_series: None,
        range: PlausibleRange::YIELD,
    },
    RateMetric {
        id: "kr10y",
        label: "국고채 10년",
        portal_code: "IRR_GOVT10Y",
        instrument_path: "rates-bonds/south-korea-10-year-bond-yield",
        fred_series: Some("IRLTLT01KRM156N"),
        range: PlausibleRange::YIELD,
    },
];

pub const SERIES_METRICS: [SeriesMetric; 9] = [
    SeriesMetric {
        id: "kospi",
        label: "코스피",
        symbol: "^KS11",
        unit: DisplayUnit::Points,
        scaling: Scaling::None,
        lookback: Lookback::Quarter,
        section: Section::DomesticIndices,
    },
    SeriesMetric {
        id: "kosdaq",
        label: "코스닥",
        symbol: "^KQ11",
        unit: DisplayUnit::Points,
        scaling: Scaling::None,
        lookback: Lookback::Quarter,
        section: Section::DomesticIndices,
    },
    SeriesMetric {
        id: "usdkrw",
        label: "원/달러 환율",
        symbol: "USDKRW=X",
        unit: DisplayUnit::Won,
        scaling: Scaling::None,
        lookback: Lookback::Quarter,
        section: Section::DomesticIndices,
    },
    SeriesMetric {
        id: "sp500",
        label: "S&P 500",
        symbol: "^GSPC",
        unit: DisplayUnit::Points,
        scaling: Scaling::None,
        lookback: Lookback::TwoYears,
        section: Section::Global,
    },
    SeriesMetric {
        id: "nasdaq",
        label: "나스닥",
        symbol: "^IXIC",
        unit: DisplayUnit::Points,
        scaling: Scaling::None,
        lookback: Lookback::TwoYears,
        section: Section::Global,
    },
    SeriesMetric {
        id: "us10y",
        label: "미국 10년물 금리",
        symbol: "^TNX",
        unit: DisplayUnit::Percent,
        scaling: Scaling::Tenths,
        lookback: Lookback::TwoYears,
        section: Section::Global,
    },
    SeriesMetric {
        id: "dxy",
        label: "달러 인덱스",
        symbol: "DX-Y.NYB",
        unit: DisplayUnit::Points,
        scaling: Scaling::None,
        lookback: Lookback::TwoYears,
        section: Section::Global,
    },
    SeriesMetric {
        id: "wti",
        label: "국제 유가(WTI)",
        symbol: "CL=F",
        unit: DisplayUnit::PerBarrel,
        scaling: Scaling::None,
        lookback: Lookback::TwoYears,
        section: Section::Global,
    },
    SeriesMetric {
        id: "gold",
        label: "금",
        symbol: "GC=F",
        unit: DisplayUnit::PerOunce,
        scaling: Scaling::None,
        lookback: Lookback::TwoYears,
        section: Section::Global,
    },
];

/// Series metrics belonging to `section`, in catalog order.
pub fn series_in(section: Section) -> impl Iterator<Item = &'static SeriesMetric> {
    SERIES_METRICS.iter().filter(move |m| m.section == section)
}
