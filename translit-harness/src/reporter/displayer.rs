// Copyright (c) The translit-harness Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prints the console summary of a run.

use super::helpers::Styles;
use crate::{
    outcome::Outcome,
    store::{RunSnapshot, RunTotals},
};
use camino::Utf8Path;
use owo_colors::OwoColorize;
use std::io::{self, Write};

const SEPARATOR: &str = "═══════════════════════════════════════════════════";

/// Writes run progress and the end-of-run summary to the console.
#[derive(Debug, Default)]
pub struct ReportDisplayer {
    styles: Styles,
}

impl ReportDisplayer {
    /// Creates a new displayer.
    pub fn new(colorize: bool) -> Self {
        let mut styles = Styles::default();
        if colorize {
            styles.colorize();
        }
        Self { styles }
    }

    /// Writes the banner shown when a run begins.
    pub fn write_run_started(&self, writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer)?;
        writeln!(
            writer,
            "🧪 {}",
            "Running transliteration conformance tests".style(self.styles.heading)
        )?;
        writeln!(writer)
    }

    /// Writes the end-of-run summary: positive cases, negative cases, then totals.
    ///
    /// Cases are listed once per id, in the order of [`RunSnapshot::unique_view`]. Totals count
    /// every recorded outcome.
    pub fn write_summary(
        &self,
        snapshot: &RunSnapshot,
        document_path: &Utf8Path,
        writer: &mut dyn Write,
    ) -> io::Result<()> {
        writeln!(writer)?;
        writeln!(writer, "{SEPARATOR}")?;
        writeln!(writer)?;

        self.write_section("POSITIVE FUNCTIONAL TESTS", &snapshot.positive(), writer)?;
        writeln!(writer)?;
        self.write_section("NEGATIVE FUNCTIONAL TESTS", &snapshot.negative(), writer)?;

        writeln!(writer)?;
        writeln!(writer, "{SEPARATOR}")?;
        writeln!(writer)?;
        self.write_totals(snapshot.totals(), writer)?;
        writeln!(writer)?;
        writeln!(writer, "📄 Report: {document_path}")
    }

    fn write_section(
        &self,
        heading: &str,
        outcomes: &[&Outcome],
        writer: &mut dyn Write,
    ) -> io::Result<()> {
        writeln!(writer, "📊 {}", heading.style(self.styles.heading))?;
        writeln!(writer)?;
        for outcome in outcomes {
            let status = outcome.status();
            writeln!(
                writer,
                "{} - {} {}",
                outcome.id().style(self.styles.case_id),
                status.glyph(),
                status.style(self.styles.for_status(status)),
            )?;
        }
        Ok(())
    }

    fn write_totals(&self, totals: RunTotals, writer: &mut dyn Write) -> io::Result<()> {
        writeln!(
            writer,
            "{} total | ✅ {} {} | ❌ {} {}",
            totals.total.style(self.styles.count),
            totals.passed.style(self.styles.count),
            "passed".style(self.styles.pass),
            totals.failed.style(self.styles.count),
            "failed".style(self.styles.fail),
        )
    }
}
