//! Ordered extraction rules for scraped markup.
//!
//! Each provider declares its rules as a static table. Rules are tried in
//! order and the first one that yields a parseable number wins; later rules
//! are never consulted to confirm or contradict it.
//!
//! Patterns use named groups: `value` (required) holds the number, `dir`
//! (optional) holds a textual direction marker.

use regex::Regex;
use tracing::warn;

use crate::domain::Direction;

#[derive(Debug, Clone, Copy)]
pub struct ExtractRule {
    pub name: &'static str,
    pub pattern: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    /// Name of the rule that matched.
    pub rule: &'static str,
    pub value: f64,
    pub marker: Option<String>,
}

/// Run `rules` against `text` and return the first usable match.
pub fn first_match(rules: &[ExtractRule], text: &str) -> Option<Extracted> {
    for rule in rules {
        let re = match Regex::new(rule.pattern) {
            Ok(re) => re,
            Err(e) => {
                warn!(rule = rule.name, error = %e, "skipping invalid extraction rule");
                continue;
            }
        };
        let Some(caps) = re.captures(text) else {
            continue;
        };
        let Some(value) = caps.name("value").and_then(|m| parse_number(m.as_str())) else {
            continue;
        };
        return Some(Extracted {
            rule: rule.name,
            value,
            marker: caps.name("dir").map(|m| m.as_str().trim().to_string()),
        });
    }
    None
}

/// Parse a printed number such as `"1,234.50"` or `"+0.012"`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    let v = cleaned.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

/// Map a textual change marker to a direction.
///
/// Recognizes class-name fragments (`up`, `dn`, `down`, `same`) and the Korean
/// glyph text (상승, 하락, 보합). Anything else, including no marker, is flat.
pub fn marker_direction(marker: Option<&str>) -> Direction {
    let Some(marker) = marker else {
        return Direction::Flat;
    };
    let m = marker.to_ascii_lowercase();
    if m.contains("down") || m.contains("dn") || m.contains("하락") {
        Direction::Down
    } else if m.contains("up") || m.contains("상승") {
        Direction::Up
    } else {
        Direction::Flat
    }
}

/// Signed change from a direction marker and an unsigned magnitude.
pub fn signed_change(direction: Direction, magnitude: f64) -> f64 {
    match direction {
        Direction::Up => magnitude.abs(),
        Direction::Down => -magnitude.abs(),
        Direction::Flat => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: [ExtractRule; 3] = [
        ExtractRule {
            name: "primary",
            pattern: r#"<b id="px">(?P<value>[0-9.,]+)</b>"#,
        },
        ExtractRule {
            name: "broken",
            pattern: r#"(?P<value>[0-9"#,
        },
        ExtractRule {
            name: "fallback",
            pattern: r#"<i class="(?P<dir>[a-z]+)">(?P<value>[0-9.,]+)</i>"#,
        },
    ];

    #[test]
    fn first_matching_rule_wins() {
        let html = r#"<i class="up">9.99</i> <b id="px">1,234.5</b>"#;
        let got = first_match(&RULES, html).unwrap();
        assert_eq!(got.rule, "primary");
        assert_eq!(got.value, 1234.5);
        assert_eq!(got.marker, None);
    }

    #[test]
    fn invalid_and_unmatched_rules_fall_through() {
        let html = r#"<i class="dn">3.25</i>"#;
        let got = first_match(&RULES, html).unwrap();
        assert_eq!(got.rule, "fallback");
        assert_eq!(got.value, 3.25);
        assert_eq!(got.marker.as_deref(), Some("dn"));
    }

    #[test]
    fn unparseable_capture_falls_through() {
        let html = r#"<b id="px">,,</b><i class="same">1.0</i>"#;
        assert_eq!(first_match(&RULES, html).unwrap().rule, "fallback");
        assert!(first_match(&RULES, "<html></html>").is_none());
    }

    #[test]
    fn numbers_with_grouping_and_sign() {
        assert_eq!(parse_number(" 1,385.20 "), Some(1385.2));
        assert_eq!(parse_number("+0.012"), Some(0.012));
        assert_eq!(parse_number("-0.5"), Some(-0.5));
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("N/A"), None);
    }

    #[test]
    fn markers_map_to_directions() {
        assert_eq!(marker_direction(Some("up")), Direction::Up);
        assert_eq!(marker_direction(Some("point_dn")), Direction::Down);
        assert_eq!(marker_direction(Some("DOWN")), Direction::Down);
        assert_eq!(marker_direction(Some("상승")), Direction::Up);
        assert_eq!(marker_direction(Some("하락")), Direction::Down);
        assert_eq!(marker_direction(Some("same")), Direction::Flat);
        assert_eq!(marker_direction(Some("보합")), Direction::Flat);
        assert_eq!(marker_direction(Some("")), Direction::Flat);
        assert_eq!(marker_direction(None), Direction::Flat);
    }

    #[test]
    fn signed_change_follows_marker_not_sign() {
        assert_eq!(signed_change(Direction::Down, 0.02), -0.02);
        assert_eq!(signed_change(Direction::Up, -0.02), 0.02);
        assert_eq!(signed_change(Direction::Flat, 0.02), 0.0);
    }
}
