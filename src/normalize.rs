//! Unit correction and change records.

use crate::domain::{AnchorSet, ChangeRecord, Direction, Scaling};

/// Apply a metric's scaling correction to one raw value.
///
/// `Scaling::Tenths` divides by 10 only when the magnitude is strictly above
/// 10, so values that already arrive in the right unit pass through. This is a
/// heuristic: upstream gives no flag saying which unit it used. A raw value of
/// exactly 10 is left alone.
pub fn normalize(scaling: Scaling, raw: f64) -> f64 {
    match scaling {
        Scaling::None => raw,
        Scaling::Tenths if raw.abs() > 10.0 => raw / 10.0,
        Scaling::Tenths => raw,
    }
}

/// [`normalize`] applied to each anchor independently.
pub fn normalize_anchors(scaling: Scaling, anchors: AnchorSet) -> AnchorSet {
    AnchorSet {
        current: normalize(scaling, anchors.current),
        prior: normalize(scaling, anchors.prior),
        week_ago: normalize(scaling, anchors.week_ago),
        month_ago: normalize(scaling, anchors.month_ago),
        year_ago: anchors.year_ago.map(|v| normalize(scaling, v)),
    }
}

pub fn format_change(current: f64, previous: f64) -> ChangeRecord {
    let delta = current - previous;
    let percent_delta = if previous == 0.0 {
        0.0
    } else {
        delta / previous * 100.0
    };
    ChangeRecord {
        absolute_delta: delta,
        percent_delta,
        direction: Direction::from_delta(delta),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenths_boundary_is_exclusive() {
        assert_eq!(normalize(Scaling::Tenths, 10.0), 10.0);
        assert!((normalize(Scaling::Tenths, 10.01) - 1.001).abs() < 1e-12);
        assert!((normalize(Scaling::Tenths, 42.5) - 4.25).abs() < 1e-12);
        assert_eq!(normalize(Scaling::Tenths, 4.25), 4.25);
        assert_eq!(normalize(Scaling::None, 42.5), 42.5);
    }

    #[test]
    fn anchors_are_scaled_one_by_one() {
        let anchors = AnchorSet {
            current: 42.0,
            prior: 41.0,
            week_ago: 9.5,
            month_ago: 10.0,
            year_ago: Some(38.0),
        };
        let out = normalize_anchors(Scaling::Tenths, anchors);
        assert!((out.current - 4.2).abs() < 1e-12);
        assert!((out.prior - 4.1).abs() < 1e-12);
        assert_eq!(out.week_ago, 9.5);
        assert_eq!(out.month_ago, 10.0);
        assert!((out.year_ago.unwrap() - 3.8).abs() < 1e-12);
    }

    #[test]
    fn change_up_flat_down() {
        let up = format_change(105.0, 100.0);
        assert_eq!(up.absolute_delta, 5.0);
        assert_eq!(up.direction, Direction::Up);
        assert!((up.percent_delta - 5.0).abs() < 1e-12);

        let flat = format_change(100.0, 100.0);
        assert_eq!(flat.absolute_delta, 0.0);
        assert_eq!(flat.direction, Direction::Flat);
        assert_eq!(flat.percent_delta, 0.0);

        let down = format_change(95.0, 100.0);
        assert_eq!(down.absolute_delta, -5.0);
        assert_eq!(down.direction, Direction::Down);
        assert!((down.percent_delta + 5.0).abs() < 1e-12);
    }

    #[test]
    fn zero_previous_gives_zero_percent() {
        let rec = format_change(3.0, 0.0);
        assert_eq!(rec.percent_delta, 0.0);
        assert_eq!(rec.direction, Direction::Up);
    }
}
