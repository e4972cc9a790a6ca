//! Line formatting for each kind of metric.
//!
//! Every renderer returns both the rich display lines and the one-line summary
//! fed to the insight generator, so the two can never disagree on which
//! metrics were present.

use crate::data::{SentimentReading, SentimentStatus};
use crate::domain::{
    AnchorSet, ChangeRecord, Direction, DisplayUnit, Frequency, RateMetric, Resolved, SeriesMetric,
};
use crate::normalize::format_change;

pub const NO_DATA: &str = "⚠️ 데이터 없음";

const SENTIMENT_LABEL: &str = "공포·탐욕 지수";

/// Display lines plus summary line for one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMetric {
    pub lines: Vec<String>,
    pub summary: String,
}

pub fn fmt_value(value: f64, unit: DisplayUnit) -> String {
    if unit.is_rate() {
        format!("{value:.3}{}", unit.suffix())
    } else {
        format!("{value:.2}{}", unit.suffix())
    }
}

/// Signed change: `%p` for rates, absolute and percent otherwise.
pub fn fmt_change(change: &ChangeRecord, unit: DisplayUnit) -> String {
    if unit.is_rate() {
        format!("{} {:+.3}%p", change.direction.icon(), change.absolute_delta)
    } else {
        format!(
            "{} {:+.2} ({:+.2}%)",
            change.direction.icon(),
            change.absolute_delta,
            change.percent_delta
        )
    }
}

/// Compact change used on the anchor line and in summaries.
fn fmt_change_short(change: &ChangeRecord, unit: DisplayUnit) -> String {
    if unit.is_rate() {
        format!("{:+.3}%p", change.absolute_delta)
    } else {
        format!("{:+.2}%", change.percent_delta)
    }
}

pub fn series_metric(metric: &SeriesMetric, anchors: &AnchorSet) -> RenderedMetric {
    let unit = metric.unit;
    let day = format_change(anchors.current, anchors.prior);

    let mut horizons = vec![
        ("1주", format_change(anchors.current, anchors.week_ago)),
        ("1달", format_change(anchors.current, anchors.month_ago)),
    ];
    if let Some(year_ago) = anchors.year_ago {
        horizons.push(("1년", format_change(anchors.current, year_ago)));
    }

    let horizon_line = horizons
        .iter()
        .map(|(label, c)| format!("{label} {} {}", c.direction.icon(), fmt_change_short(c, unit)))
        .collect::<Vec<_>>()
        .join(" · ");

    let summary_horizons = horizons
        .iter()
        .map(|(label, c)| format!("{label} {}", fmt_change_short(c, unit)))
        .collect::<Vec<_>>()
        .join(", ");

    RenderedMetric {
        lines: vec![
            format!(
                "📊 *{}*: {} {}",
                metric.label,
                fmt_value(anchors.current, unit),
                fmt_change(&day, unit)
            ),
            format!("   {horizon_line}"),
        ],
        summary: format!(
            "{}: {}, 전일 대비 {}, {summary_horizons}",
            metric.label,
            fmt_value(anchors.current, unit),
            fmt_change_short(&day, unit)
        ),
    }
}

pub fn unavailable(label: &str) -> RenderedMetric {
    RenderedMetric {
        lines: vec![format!("📊 *{label}*: {NO_DATA}")],
        summary: format!("{label}: 데이터 없음"),
    }
}

pub fn rate_metric(metric: &RateMetric, resolved: Option<&Resolved>) -> RenderedMetric {
    let Some(resolved) = resolved else {
        return unavailable(metric.label);
    };
    let unit = DisplayUnit::Percent;
    let (period, note) = match resolved.frequency {
        Frequency::Daily => ("전일", resolved.source.to_string()),
        Frequency::Monthly => ("전월", format!("{} · 월간 데이터", resolved.source)),
    };

    let mut line = format!("📊 *{}*: {}", metric.label, fmt_value(resolved.value, unit));
    let mut summary = format!("{}: {}", metric.label, fmt_value(resolved.value, unit));
    if let Some(diff) = resolved.diff {
        let change = ChangeRecord {
            absolute_delta: diff,
            percent_delta: 0.0,
            direction: Direction::from_delta(diff),
        };
        line.push_str(&format!(" {} ({period} 대비)", fmt_change(&change, unit)));
        summary.push_str(&format!(", {period} 대비 {}", fmt_change_short(&change, unit)));
    }
    line.push_str(&format!(" _({note})_"));

    RenderedMetric {
        lines: vec![line],
        summary,
    }
}

pub fn sentiment(status: &SentimentStatus) -> RenderedMetric {
    match status {
        SentimentStatus::Available(reading) => sentiment_reading(reading),
        SentimentStatus::Unavailable => RenderedMetric {
            lines: vec![format!("🧭 *{SENTIMENT_LABEL}*: {NO_DATA}")],
            summary: format!("{SENTIMENT_LABEL}: 데이터 없음"),
        },
    }
}

fn sentiment_reading(reading: &SentimentReading) -> RenderedMetric {
    let bucket = reading.bucket();
    let change = reading.change();
    RenderedMetric {
        lines: vec![format!(
            "{} *{SENTIMENT_LABEL}*: {} ({}) {} {:+}",
            bucket.icon(),
            reading.current,
            bucket.label(),
            change.direction.icon(),
            change.absolute_delta
        )],
        summary: format!(
            "{SENTIMENT_LABEL}: {} ({}), 전일 {}",
            reading.current,
            bucket.label(),
            reading.previous
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Lookback, PlausibleRange, Scaling, Section};

    const KOSPI: SeriesMetric = SeriesMetric {
        id: "kospi",
        label: "코스피",
        symbol: "^KS11",
        unit: DisplayUnit::Points,
        scaling: Scaling::None,
        lookback: Lookback::Quarter,
        section: Section::DomesticIndices,
    };

    const KR10Y: RateMetric = RateMetric {
        id: "kr10y",
        label: "국고채 10년",
        portal_code: "IRR_GOVT10Y",
        instrument_path: "x",
        fred_series: None,
        range: PlausibleRange::YIELD,
    };

    #[test]
    fn series_lines_without_year() {
        let anchors = AnchorSet {
            current: 105.0,
            prior: 100.0,
            week_ago: 105.0,
            month_ago: 110.0,
            year_ago: None,
        };
        let r = series_metric(&KOSPI, &anchors);
        assert_eq!(r.lines[0], "📊 *코스피*: 105.00pt 🔺 +5.00 (+5.00%)");
        assert_eq!(r.lines[1], "   1주 ➖ +0.00% · 1달 🔻 -4.55%");
        assert_eq!(r.summary, "코스피: 105.00pt, 전일 대비 +5.00%, 1주 +0.00%, 1달 -4.55%");
    }

    #[test]
    fn rate_series_uses_percentage_points() {
        let metric = SeriesMetric {
            label: "미국 10년물 금리",
            unit: DisplayUnit::Percent,
            ..KOSPI
        };
        let anchors = AnchorSet {
            current: 4.25,
            prior: 4.3,
            week_ago: 4.2,
            month_ago: 4.0,
            year_ago: Some(3.75),
        };
        let r = series_metric(&metric, &anchors);
        assert_eq!(r.lines[0], "📊 *미국 10년물 금리*: 4.250% 🔻 -0.050%p");
        assert!(r.lines[1].ends_with("1년 🔺 +0.500%p"));
    }

    #[test]
    fn rate_line_annotates_source_and_frequency() {
        let daily = Resolved {
            value: 2.645,
            diff: Some(-0.021),
            source: "Naver Finance",
            frequency: Frequency::Daily,
        };
        let r = rate_metric(&KR10Y, Some(&daily));
        assert_eq!(
            r.lines[0],
            "📊 *국고채 10년*: 2.645% 🔻 -0.021%p (전일 대비) _(Naver Finance)_"
        );
        assert_eq!(r.summary, "국고채 10년: 2.645%, 전일 대비 -0.021%p");

        let monthly = Resolved {
            value: 3.1,
            diff: None,
            source: "FRED",
            frequency: Frequency::Monthly,
        };
        let r = rate_metric(&KR10Y, Some(&monthly));
        assert_eq!(r.lines[0], "📊 *국고채 10년*: 3.100% _(FRED · 월간 데이터)_");
        assert_eq!(r.summary, "국고채 10년: 3.100%");
    }

    #[test]
    fn unresolved_rate_is_an_explicit_no_data_line() {
        let r = rate_metric(&KR10Y, None);
        assert_eq!(r.lines, vec![format!("📊 *국고채 10년*: {NO_DATA}")]);
        assert_eq!(r.summary, "국고채 10년: 데이터 없음");
    }

    #[test]
    fn sentiment_lines() {
        let r = sentiment(&SentimentStatus::Available(SentimentReading {
            current: 75,
            previous: 70,
        }));
        assert_eq!(r.lines[0], "🤑 *공포·탐욕 지수*: 75 (극단적 탐욕) 🔺 +5");
        assert_eq!(r.summary, "공포·탐욕 지수: 75 (극단적 탐욕), 전일 70");

        let r = sentiment(&SentimentStatus::Unavailable);
        assert!(r.lines[0].contains(NO_DATA));
    }
}
