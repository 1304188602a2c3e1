// Copyright (c) The translit-harness Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The markdown report document written at the end of a run.

use super::helpers::field_text;
use crate::{errors::WriteReportError, store::RunSnapshot};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use camino::Utf8Path;
use std::io::Write;
use swrite::{SWrite, swrite};
use tracing::info;

/// The report document for a finished run.
///
/// The document has a header with the run's start time and totals, followed by one section per
/// case in the run's unique view.
#[derive(Clone, Copy, Debug)]
pub struct ReportDocument<'a> {
    snapshot: &'a RunSnapshot,
}

impl<'a> ReportDocument<'a> {
    /// Creates a document for the given snapshot.
    pub fn new(snapshot: &'a RunSnapshot) -> Self {
        Self { snapshot }
    }

    /// Renders the document as markdown.
    pub fn render(&self) -> String {
        let totals = self.snapshot.totals();
        let mut out = String::new();

        swrite!(out, "# Test Execution Report\n\n");
        swrite!(
            out,
            "**Date:** {}\n\n",
            self.snapshot.started_at().format("%Y-%m-%d %H:%M:%S %:z")
        );
        swrite!(out, "**Total Tests:** {}\n", totals.total);
        swrite!(out, "**Passed:** {}\n", totals.passed);
        swrite!(out, "**Failed:** {}\n\n", totals.failed);
        swrite!(out, "---\n\n");

        for outcome in self.snapshot.unique_view() {
            let status = outcome.status();
            swrite!(out, "## {}\n\n", outcome.id());
            swrite!(out, "**Test Case:** {}\n\n", field_text(outcome.title()));
            swrite!(out, "**Input:** {}\n", field_text(outcome.input()));
            swrite!(out, "**Expect Output:** {}\n", field_text(outcome.expected()));
            swrite!(out, "**Actual Output:** {}\n", field_text(outcome.actual()));
            swrite!(out, "**Result:** {} {}\n\n", status.glyph(), status);
            swrite!(out, "---\n\n");
        }

        out
    }

    /// Writes the document to `path`, replacing anything already there.
    ///
    /// The parent directory is created if it doesn't exist. The document is written to a
    /// temporary file and renamed into place, so `path` never holds a partial document.
    pub fn write_to(&self, path: &Utf8Path) -> Result<(), WriteReportError> {
        let dir = path.parent().ok_or_else(|| WriteReportError::NoParent {
            path: path.to_owned(),
        })?;
        // An empty parent means the current directory.
        if !dir.as_str().is_empty() {
            std::fs::create_dir_all(dir).map_err(|error| WriteReportError::CreateDir {
                dir: dir.to_owned(),
                error,
            })?;
        }

        let contents = self.render();
        AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
            .write(|file| file.write_all(contents.as_bytes()))
            .map_err(|error| WriteReportError::Write {
                path: path.to_owned(),
                error: match error {
                    atomicwrites::Error::Internal(error) => error,
                    atomicwrites::Error::User(error) => error,
                },
            })?;

        info!(%path, bytes = contents.len(), "wrote report document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        capture::{Annotation, CaseRecord, SideChannel},
        outcome::TestStatus,
        store::{RunStore, tests::start_time},
    };
    use camino_tempfile::Utf8TempDir;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn snapshot() -> RunSnapshot {
        let store = RunStore::with_start_time(start_time());
        let handle = store.handle();
        handle.capture(CaseRecord {
            title: "Neg_Fun_0004 - Multiple spaces and formatting".to_owned(),
            verdict: TestStatus::Fail,
            lane: Some("firefox".to_owned()),
            side_channel: SideChannel::Empty,
        });
        handle.capture(CaseRecord {
            title: "Pos_Fun_0001 - Daily language usage".to_owned(),
            verdict: TestStatus::Pass,
            lane: Some("chromium".to_owned()),
            side_channel: SideChannel::KeyValue(vec![
                Annotation::new("Input", "naan netru soru saappitten"),
                Annotation::new("Expected", "நான் நேற்று சோறு சாப்பிட்டேன்"),
                Annotation::new("Actual", "நான் நேற்று சோறு சாப்பிட்டேன்"),
            ]),
        });
        handle.capture(CaseRecord {
            title: "Perf_Fun_0001 - Typing throughput".to_owned(),
            verdict: TestStatus::Pass,
            lane: None,
            side_channel: SideChannel::Empty,
        });
        store.finish()
    }

    #[test]
    fn render_document() {
        let snapshot = snapshot();
        let document = ReportDocument::new(&snapshot);

        assert_eq!(
            document.render(),
            indoc! {"
                # Test Execution Report

                **Date:** 2026-01-24 09:30:00 +05:30

                **Total Tests:** 3
                **Passed:** 2
                **Failed:** 1

                ---

                ## Pos_Fun_0001

                **Test Case:** Pos_Fun_0001 - Daily language usage

                **Input:** naan netru soru saappitten
                **Expect Output:** நான் நேற்று சோறு சாப்பிட்டேன்
                **Actual Output:** நான் நேற்று சோறு சாப்பிட்டேன்
                **Result:** ✅ PASS

                ---

                ## Neg_Fun_0004

                **Test Case:** Neg_Fun_0004 - Multiple spaces and formatting

                **Input:** N/A
                **Expect Output:** N/A
                **Actual Output:** N/A
                **Result:** ❌ FAIL

                ---

            "}
        );
        // Rendering doesn't depend on anything but the snapshot.
        assert_eq!(document.render(), document.render());
    }

    #[test]
    fn write_creates_dir_and_overwrites() {
        let temp_dir = Utf8TempDir::new().unwrap();
        let path = temp_dir.path().join("Report").join("report.md");

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "stale contents from a previous run\n".repeat(200)).unwrap();

        let snapshot = snapshot();
        let document = ReportDocument::new(&snapshot);
        document.write_to(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), document.render());

        // Writing again produces the identical file.
        document.write_to(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), document.render());

        let fresh = temp_dir.path().join("nested").join("dir").join("report.md");
        document.write_to(&fresh).unwrap();
        assert_eq!(std::fs::read_to_string(&fresh).unwrap(), document.render());
    }

    #[test]
    fn write_failure_is_reported() {
        let temp_dir = Utf8TempDir::new().unwrap();
        let blocker = temp_dir.path().join("Report");
        std::fs::write(&blocker, "not a directory").unwrap();
        let path = blocker.join("report.md");

        let snapshot = snapshot();
        let error = ReportDocument::new(&snapshot)
            .write_to(&path)
            .unwrap_err();
        assert!(
            matches!(error, WriteReportError::CreateDir { ref dir, .. } if *dir == blocker),
            "unexpected error: {error:?}"
        );
        assert!(!path.exists());
    }
}
