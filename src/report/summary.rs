//! Batch summary report generation

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use serde::Serialize;

use crate::files::human_readable_size;
use crate::utils::rule;

use super::Reporter;

/// Aggregate outcome of one batch run. Never persisted beyond an optional JSON export.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub success_count: usize,
    pub total_count: usize,
    /// Bytes saved across successful items; negative when outputs grew
    pub total_savings: i64,
    /// Original size of the successful items only
    pub total_original_size: u64,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self) {
        self.success_count += 1;
        self.total_count += 1;
    }

    pub fn record_failure(&mut self) {
        self.total_count += 1;
    }

    /// Count a success that changed the size of a file
    pub fn record_savings(&mut self, savings: i64, original_size: u64) {
        self.record_success();
        self.total_savings += savings;
        self.total_original_size += original_size;
    }

    pub fn failure_count(&self) -> usize {
        self.total_count - self.success_count
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Percent of the original size saved, only when both totals are positive.
    pub fn savings_percent(&self) -> Option<f64> {
        if self.total_savings > 0 && self.total_original_size > 0 {
            Some(self.total_savings as f64 / self.total_original_size as f64 * 100.0)
        } else {
            None
        }
    }

    /// `"1.50 KB (12.5%)"`, or `None` when nothing was saved.
    pub fn savings_line(&self) -> Option<String> {
        self.savings_percent().map(|percent| {
            format!(
                "{} ({:.1}%)",
                human_readable_size(self.total_savings as u64),
                percent
            )
        })
    }

    pub fn display(&self, reporter: &Reporter) {
        tracing::info!(
            success = self.success_count,
            total = self.total_count,
            savings = self.total_savings,
            "Batch finished"
        );

        reporter.line("");
        reporter.line(rule());
        reporter.line(format!(
            "{}",
            style("PROCESSING SUMMARY").white().bold()
        ));

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("Processed successfully"),
            Cell::new(format!("{}/{}", self.success_count, self.total_count))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        if self.failure_count() > 0 {
            table.add_row(vec![
                Cell::new("Failed"),
                Cell::new(self.failure_count()).fg(Color::Red),
            ]);
        }

        if let Some(savings) = self.savings_line() {
            table.add_row(vec![
                Cell::new("Space saved"),
                Cell::new(savings).fg(Color::Cyan),
            ]);
        }

        for line in table.to_string().lines() {
            reporter.line(format!("    {}", line));
        }
        reporter.line(rule());
    }
}
