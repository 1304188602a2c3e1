// Copyright (c) The translit-harness Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end runs over the Thanglish case catalog, using simulated widgets.

use camino_tempfile::Utf8TempDir;
use color_eyre::eyre::Result;
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::time::Duration;
use translit_harness::{
    catalog::CaptureMode,
    config::HarnessConfig,
    runner::{Lane, RunController},
    simulated::SimulatedBrowser,
    store::RunTotals,
};

mod fixtures;

use fixtures::*;

const POSITIVE_SUITE: &str = "Positive Functional Tests - Thanglish to Tamil Transliteration";

#[test]
fn fixture_catalog_loads() -> Result<()> {
    let catalog = load_catalog()?;
    assert_eq!(catalog.case_count(), 34);

    let [positive, negative] = catalog.suites() else {
        panic!("expected positive and negative suites");
    };
    assert_eq!(positive.name, POSITIVE_SUITE);
    assert_eq!(positive.capture, CaptureMode::Annotations);
    assert_eq!(positive.cases.len(), 24);
    assert_eq!(positive.keystroke_delay, None);

    assert_eq!(negative.capture, CaptureMode::Stdout);
    assert_eq!(negative.cases.len(), 10);
    assert_eq!(negative.keystroke_delay, Some(Duration::from_millis(100)));
    assert_eq!(negative.settle, Some(Duration::from_millis(800)));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn full_catalog_across_two_lanes() -> Result<()> {
    init_tracing();
    let catalog = load_catalog()?;
    let config = HarnessConfig::default();
    let temp_dir = Utf8TempDir::new()?;
    let controller = RunController::new(&config, &catalog, temp_dir.path());

    // The engine only knows how to render the positive suite.
    let lanes = [
        Lane::new("chromium", lookup_browser(&catalog, POSITIVE_SUITE)),
        Lane::new("firefox", lookup_browser(&catalog, POSITIVE_SUITE)),
    ];

    let mut console = Vec::new();
    let summary = controller.run(&lanes, &mut console).await?;

    // Totals count every lane's outcome.
    assert_eq!(
        summary.totals,
        RunTotals {
            total: 68,
            passed: 48,
            failed: 20,
        }
    );
    assert!(!summary.totals.is_success());

    // The document lists each case once, positives first, in id order.
    let document = std::fs::read_to_string(&summary.document_path)?;
    let headings: Vec<_> = document
        .lines()
        .filter_map(|line| line.strip_prefix("## "))
        .collect();
    assert_eq!(headings.len(), 34);
    assert_eq!(headings.first(), Some(&"Pos_Fun_0001"));
    assert_eq!(headings[23], "Pos_Fun_0024");
    assert_eq!(headings[24], "Neg_Fun_0001");
    assert_eq!(headings.last(), Some(&"Neg_Fun_0010"));
    assert!(document.contains("**Total Tests:** 68\n"));

    // Captured text survives both side channels.
    assert!(document.contains(indoc! {"
        **Input:** naan netru soru saappitten
        **Expect Output:** நான் நேற்று சோறு சாப்பிட்டேன்
        **Actual Output:** நான் நேற்று சோறு சாப்பிட்டேன்
        **Result:** ✅ PASS
    "}));
    assert!(document.contains(indoc! {r#"
        **Input:** avan enkidda sonaan, naalaikku naama "outing" povom endu.
        **Expect Output:** அவன் என்கிட்டே சொன்னான், நாளைக்கு நாம "outing" போவோம் எண்டு.
        **Actual Output:** avan enkidda sonaan, naalaikku naama "outing" povom endu.
        **Result:** ❌ FAIL
    "#}));

    let console = String::from_utf8(console)?;
    assert_eq!(console.matches(" - ✅ PASS\n").count(), 24);
    assert_eq!(console.matches(" - ❌ FAIL\n").count(), 10);
    assert!(console.contains("68 total | ✅ 48 passed | ❌ 20 failed\n"));
    assert!(console.ends_with(&format!("📄 Report: {}\n", summary.document_path)));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn configured_report_location() -> Result<()> {
    init_tracing();
    let temp_dir = Utf8TempDir::new()?;
    let config_path = temp_dir.path().join("harness.toml");
    std::fs::write(
        &config_path,
        indoc! {r#"
            [driver]
            keystroke-delay = "5ms"
            settle = "1s"

            [run]
            max-concurrency = 1

            [report]
            dir = "out/reports"
            file-name = "thanglish.md"
        "#},
    )?;
    let config = HarnessConfig::from_file(&config_path)?;
    let catalog = load_catalog()?;
    let controller = RunController::new(&config, &catalog, temp_dir.path());

    let lanes = [Lane::unnamed(SimulatedBrowser::pass_through(DEBOUNCE))];
    let mut console = Vec::new();
    let summary = controller.run(&lanes, &mut console).await?;

    assert_eq!(
        summary.document_path,
        temp_dir.path().join("out/reports/thanglish.md")
    );
    assert_eq!(summary.totals.total, 34);
    assert!(summary.document_path.is_file());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn rerun_overwrites_report() -> Result<()> {
    init_tracing();
    let catalog = load_catalog()?;
    let config = HarnessConfig::default();
    let temp_dir = Utf8TempDir::new()?;
    let controller = RunController::new(&config, &catalog, temp_dir.path());

    let first = controller
        .run(
            &[Lane::new("chromium", lookup_browser(&catalog, POSITIVE_SUITE))],
            &mut Vec::new(),
        )
        .await?;
    let second = controller
        .run(
            &[Lane::new("chromium", SimulatedBrowser::pass_through(DEBOUNCE))],
            &mut Vec::new(),
        )
        .await?;

    assert_eq!(first.document_path, second.document_path);
    assert_eq!(second.totals.passed, 0);

    // Only the second run's results remain.
    let document = std::fs::read_to_string(&second.document_path)?;
    assert!(document.contains("**Passed:** 0\n"));
    assert!(!document.contains("✅ PASS"));
    Ok(())
}
