//! Report domain models.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// A labelled, already formatted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSection {
    pub title: String,
    pub rows: Vec<ReportRow>,
}

impl ReportSection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.rows.push(ReportRow {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }
}

/// Medium-independent summary of a simulation.
///
/// Document and image exporters lay this out however they like; the values
/// are final strings and must not be re-computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub title: String,
    pub subtitle: String,
    pub sections: Vec<ReportSection>,
    pub methodology_note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

/// Width of the label column in the plain-text rendering.
const LABEL_WIDTH: usize = 36;

impl SimulationReport {
    pub fn with_footer(mut self, footer: Option<String>) -> Self {
        self.footer = footer;
        self
    }

    pub fn section(&self, title: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|section| section.title == title)
    }

    /// Renders the report as plain text, one `label value` line per row.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{}", self.subtitle);

        for section in &self.sections {
            out.push('\n');
            let _ = writeln!(out, "{}", section.title);
            let _ = writeln!(out, "{}", "-".repeat(section.title.chars().count()));
            for row in &section.rows {
                let _ = writeln!(out, "{:<width$} {}", row.label, row.value, width = LABEL_WIDTH);
            }
        }

        out.push('\n');
        let _ = writeln!(out, "{}", self.methodology_note);
        if let Some(footer) = &self.footer {
            out.push('\n');
            let _ = writeln!(out, "{}", footer);
        }
        out
    }
}

/// Drops every character outside Latin-1.
///
/// Applied to the plain-text export. Document writers limited to that
/// encoding would otherwise fail on symbols such as emoji or subscript digits.
pub fn latin1_safe(text: &str) -> String {
    text.chars().filter(|c| (*c as u32) <= 0xFF).collect()
}
