//! Shared domain types.
//!
//! These are plain values passed from the fetchers through the normalizer into
//! the report. Nothing here performs I/O.

/// Report sections, in the order they appear in the digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Sentiment,
    DomesticRates,
    DomesticIndices,
    Global,
}

impl Section {
    pub const ORDER: [Section; 4] = [
        Section::Sentiment,
        Section::DomesticRates,
        Section::DomesticIndices,
        Section::Global,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Sentiment => "🧭 시장 심리",
            Section::DomesticRates => "🏦 국내 금리",
            Section::DomesticIndices => "🇰🇷 국내 지수·환율",
            Section::Global => "🌐 글로벌",
        }
    }
}

/// How a metric's value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayUnit {
    Won,
    Points,
    Percent,
    PerBarrel,
    PerOunce,
}

impl DisplayUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            DisplayUnit::Won => "원",
            DisplayUnit::Points => "pt",
            DisplayUnit::Percent => "%",
            DisplayUnit::PerBarrel => "$/bbl",
            DisplayUnit::PerOunce => "$/oz",
        }
    }

    /// Rates move in percentage points; a percent-of-a-percent is noise.
    pub fn is_rate(self) -> bool {
        matches!(self, DisplayUnit::Percent)
    }
}

/// Scaling correction applied to raw upstream values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scaling {
    None,
    /// Upstream sometimes quotes the value ×10 (e.g. `^TNX` 42.5 for 4.25%).
    Tenths,
}

/// Direction of a change between two samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Direction::Up
        } else if delta < 0.0 {
            Direction::Down
        } else {
            Direction::Flat
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Direction::Up => "🔺",
            Direction::Down => "🔻",
            Direction::Flat => "➖",
        }
    }
}

/// Change between a current and a previous sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeRecord {
    pub absolute_delta: f64,
    /// `delta / previous * 100`, `0` when `previous` is zero.
    pub percent_delta: f64,
    pub direction: Direction,
}

/// How much daily history a caller asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookback {
    /// About 63 sessions: enough for the month-ago anchor.
    Quarter,
    /// About 500 sessions: enough for the year-ago anchor.
    TwoYears,
}

impl Lookback {
    pub fn range_param(self) -> &'static str {
        match self {
            Lookback::Quarter => "3mo",
            Lookback::TwoYears => "2y",
        }
    }

    pub fn includes_year(self) -> bool {
        matches!(self, Lookback::TwoYears)
    }
}

/// Fixed-offset anchor points drawn from one oldest→newest daily series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorSet {
    pub current: f64,
    pub prior: f64,
    pub week_ago: f64,
    pub month_ago: f64,
    /// Only present when a one-year lookback was requested.
    pub year_ago: Option<f64>,
}

/// Sampling frequency of the source a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Monthly,
}

/// One provider's raw answer before plausibility checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub diff: Option<f64>,
}

/// A scalar metric resolved through a provider chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub value: f64,
    /// Absent when the winning source reports no change (never approximated).
    pub diff: Option<f64>,
    /// Name of the provider that produced the value.
    pub source: &'static str,
    pub frequency: Frequency,
}

/// Inclusive bounds a value must fall in to be believed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlausibleRange {
    pub min: f64,
    pub max: f64,
}

impl PlausibleRange {
    pub const YIELD: PlausibleRange = PlausibleRange { min: 0.0, max: 20.0 };

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_flat_only_for_exact_zero() {
        assert_eq!(Direction::from_delta(0.0), Direction::Flat);
        assert_eq!(Direction::from_delta(1e-12), Direction::Up);
        assert_eq!(Direction::from_delta(-1e-12), Direction::Down);
    }

    #[test]
    fn yield_range_is_inclusive_and_rejects_nan() {
        assert!(PlausibleRange::YIELD.contains(0.0));
        assert!(PlausibleRange::YIELD.contains(20.0));
        assert!(!PlausibleRange::YIELD.contains(20.01));
        assert!(!PlausibleRange::YIELD.contains(-0.1));
        assert!(!PlausibleRange::YIELD.contains(f64::NAN));
    }
}
