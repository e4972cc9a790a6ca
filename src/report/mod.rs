//! Report assembly: sections, the snapshot builder, and the final digest.

use chrono::NaiveDate;

use crate::domain::Section;

pub mod format;

pub use format::{NO_DATA, RenderedMetric};

/// Rendered lines for one metric group.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub section: Section,
    pub lines: Vec<String>,
    pub summary: Vec<String>,
}

impl ReportSection {
    pub fn new(section: Section) -> Self {
        Self {
            section,
            lines: Vec::new(),
            summary: Vec::new(),
        }
    }

    pub fn with_metric(mut self, metric: RenderedMetric) -> Self {
        self.lines.extend(metric.lines);
        self.summary.push(metric.summary);
        self
    }

    fn display_text(&self) -> String {
        let mut out = format!("*{}*", self.section.title());
        for line in &self.lines {
            out.push('\n');
            out.push_str(line);
        }
        out
    }
}

/// Accumulates sections for the display report and the condensed summary.
///
/// Each call returns a new snapshot. Sections are kept in `Section::ORDER`
/// whatever order they are added in, and adding a section kind twice replaces
/// the earlier one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportBuilder {
    sections: Vec<ReportSection>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(mut self, section: ReportSection) -> Self {
        self.sections.retain(|s| s.section != section.section);
        let rank = order_of(section.section);
        let at = self
            .sections
            .iter()
            .position(|s| order_of(s.section) > rank)
            .unwrap_or(self.sections.len());
        self.sections.insert(at, section);
        self
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    /// Multi-line report for humans, sections separated by a blank line.
    pub fn display_text(&self) -> String {
        self.sections
            .iter()
            .map(ReportSection::display_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// One line per metric, for the insight generator.
    pub fn summary_text(&self) -> String {
        self.sections
            .iter()
            .flat_map(|s| s.summary.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn order_of(section: Section) -> usize {
    Section::ORDER
        .iter()
        .position(|s| *s == section)
        .unwrap_or(Section::ORDER.len())
}

/// The final text handed to the delivery sink.
#[derive(Debug, Clone, PartialEq)]
pub struct Digest {
    pub date: NaiveDate,
    pub report: String,
    pub insight: String,
}

impl Digest {
    pub fn header(&self) -> String {
        format!("📅 *매크로 브리핑 ({})*", self.date.format("%Y-%m-%d"))
    }

    pub fn render(&self) -> String {
        format!(
            "{}\n\n{}\n\n💡 *AI 인사이트*\n{}",
            self.header(),
            self.report,
            self.insight
        )
    }
}
