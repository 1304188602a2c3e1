// Copyright (c) The translit-harness Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runs a case catalog across lanes and reports the results.
//!
//! The main structure in this module is [`RunController`].

use crate::{
    capture::{ACTUAL_LABEL, Annotation, CaseRecord, EXPECTED_LABEL, INPUT_LABEL, SideChannel},
    catalog::{CaptureMode, CaseCatalog, CaseDef, Suite},
    config::HarnessConfig,
    driver::InputDriver,
    errors::{PageError, RunError},
    outcome::{CaseId, TestStatus, UNKNOWN_LANE},
    page::{Browser, Page},
    reporter::{ReportDisplayer, ReportDocument},
    store::{RunHandle, RunStore, RunTotals},
};
use camino::Utf8PathBuf;
use futures::prelude::*;
use std::io::Write;
use swrite::{SWrite, swrite};
use tracing::{debug, info, warn};

/// One independent execution context, such as a browser engine.
///
/// Every case in the catalog runs once per lane.
#[derive(Clone, Debug)]
pub struct Lane<B> {
    name: Option<String>,
    browser: B,
}

impl<B: Browser> Lane<B> {
    /// Creates a new lane with the given name.
    pub fn new(name: impl Into<String>, browser: B) -> Self {
        Self {
            name: Some(name.into()),
            browser,
        }
    }

    /// Creates a lane that can't report its name.
    pub fn unnamed(browser: B) -> Self {
        Self {
            name: None,
            browser,
        }
    }

    /// The lane name, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// The result of a completed run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RunSummary {
    /// Pass/fail counts over every outcome recorded.
    pub totals: RunTotals,

    /// Where the report document was written.
    pub document_path: Utf8PathBuf,
}

/// Executes a [`CaseCatalog`] across one or more lanes.
///
/// The controller owns the run's [`RunStore`]. Each case gets a [`RunHandle`] and records its
/// outcome through it as soon as it completes, so outcomes are recorded in completion order.
/// Once every lane is done, the store is finished and rendered exactly once.
#[derive(Debug)]
pub struct RunController<'a> {
    config: &'a HarnessConfig,
    catalog: &'a CaseCatalog,
    run_root: Utf8PathBuf,
}

impl<'a> RunController<'a> {
    /// Creates a new controller. The report document is written relative to `run_root`.
    pub fn new(
        config: &'a HarnessConfig,
        catalog: &'a CaseCatalog,
        run_root: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            config,
            catalog,
            run_root: run_root.into(),
        }
    }

    /// Returns the path the report document will be written to.
    pub fn document_path(&self) -> Utf8PathBuf {
        self.config.report.document_path(&self.run_root)
    }

    /// Runs every case on every lane, then writes the report.
    ///
    /// Failing cases don't make this return an error; only console and report failures do.
    pub async fn run<B: Browser>(
        &self,
        lanes: &[Lane<B>],
        console: &mut dyn Write,
    ) -> Result<RunSummary, RunError> {
        let displayer = ReportDisplayer::new(self.config.report.colorize);
        displayer
            .write_run_started(console)
            .map_err(RunError::Console)?;

        let store = RunStore::new();
        info!(
            lanes = lanes.len(),
            cases = self.catalog.case_count(),
            max_concurrency = self.config.run.max_concurrency.get(),
            "starting run"
        );

        let cases = lanes.iter().flat_map(|lane| {
            self.catalog.suites().iter().flat_map(move |suite| {
                suite.cases.iter().map(move |case| (lane, suite, case))
            })
        });

        futures::stream::iter(cases)
            .map(|(lane, suite, case)| {
                let handle = store.handle();
                async move { self.run_case(lane, suite, case, handle).await }
            })
            .buffer_unordered(self.config.run.max_concurrency.get())
            .collect::<()>()
            .await;

        let snapshot = store.finish();
        let document_path = self.document_path();
        ReportDocument::new(&snapshot).write_to(&document_path)?;
        displayer
            .write_summary(&snapshot, &document_path, console)
            .map_err(RunError::Console)?;

        let totals = snapshot.totals();
        info!(
            total = totals.total,
            passed = totals.passed,
            failed = totals.failed,
            "run finished"
        );

        Ok(RunSummary {
            totals,
            document_path,
        })
    }

    async fn run_case<B: Browser>(
        &self,
        lane: &Lane<B>,
        suite: &Suite,
        case: &CaseDef,
        handle: RunHandle,
    ) {
        let case_id = CaseId::from_title(&case.title);
        let lane_name = lane.name().unwrap_or(UNKNOWN_LANE);
        debug!(lane = lane_name, %case_id, suite = %suite.name, "running case");

        let driver = InputDriver::new(suite.driver_config(&self.config.driver));
        let execution = tokio::time::timeout(
            self.config.run.case_timeout,
            execute_case(&lane.browser, &self.config.run.base_url, &driver, case),
        );

        let (verdict, side_channel) = match execution.await {
            Ok(Ok(actual)) => {
                // This comparison is the case's own assertion. From here on the verdict is only
                // ever copied.
                let verdict = if actual == case.expected {
                    TestStatus::Pass
                } else {
                    TestStatus::Fail
                };
                (verdict, side_channel(suite.capture, case, &actual))
            }
            Ok(Err(error)) => {
                warn!(
                    lane = lane_name,
                    %case_id,
                    operation = error.operation(),
                    error = &error as &(dyn std::error::Error + 'static),
                    "case failed before producing output"
                );
                (TestStatus::Fail, SideChannel::Empty)
            }
            Err(_) => {
                warn!(
                    lane = lane_name,
                    %case_id,
                    timeout = ?self.config.run.case_timeout,
                    "case timed out"
                );
                (TestStatus::Fail, SideChannel::Empty)
            }
        };

        let recorded = handle.capture(CaseRecord {
            title: case.title.clone(),
            verdict,
            lane: lane.name.clone(),
            side_channel,
        });
        debug!(lane = lane_name, %case_id, %verdict, ?recorded, "case finished");
    }
}

async fn execute_case<B: Browser>(
    browser: &B,
    base_url: &str,
    driver: &InputDriver,
    case: &CaseDef,
) -> Result<String, PageError> {
    let mut page = browser.new_page().await?;
    page.navigate(base_url).await?;
    driver.convert(&mut page, &case.input).await
}

/// Builds the side channel a case in the given mode emits once it has its output.
fn side_channel(mode: CaptureMode, case: &CaseDef, actual: &str) -> SideChannel {
    match mode {
        CaptureMode::Stdout => {
            let mut text = String::new();
            swrite!(text, "{INPUT_LABEL}: {}\n", case.input);
            swrite!(text, "{EXPECTED_LABEL}: {}\n", case.expected);
            swrite!(text, "{ACTUAL_LABEL}: {actual}\n");
            SideChannel::LabeledText(text)
        }
        CaptureMode::Annotations => SideChannel::KeyValue(vec![
            Annotation::new(INPUT_LABEL, case.input.as_str()),
            Annotation::new(EXPECTED_LABEL, case.expected.as_str()),
            Annotation::new(ACTUAL_LABEL, actual),
        ]),
    }
}
