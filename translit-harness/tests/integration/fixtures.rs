// Copyright (c) The translit-harness Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::eyre::{Context, Result};
use std::{collections::HashMap, sync::Arc, time::Duration};
use translit_harness::{catalog::CaseCatalog, simulated::SimulatedBrowser};

pub(crate) const DEBOUNCE: Duration = Duration::from_millis(300);

pub(crate) fn catalog_path() -> Utf8PathBuf {
    Utf8Path::new(env!("CARGO_MANIFEST_DIR")).join("../fixtures/thanglish-cases.toml")
}

pub(crate) fn load_catalog() -> Result<CaseCatalog> {
    let path = catalog_path();
    CaseCatalog::from_file(&path).wrap_err_with(|| format!("failed to load {path}"))
}

pub(crate) fn init_tracing() {
    // Other tests may have installed a subscriber already.
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// An engine that knows the expected rendering of every case in the named suite, and leaves
/// anything else untouched.
pub(crate) fn lookup_browser(catalog: &CaseCatalog, known_suite: &str) -> SimulatedBrowser {
    let table: HashMap<String, String> = catalog
        .suites()
        .iter()
        .filter(|suite| suite.name == known_suite)
        .flat_map(|suite| &suite.cases)
        .map(|case| (case.input.clone(), case.expected.clone()))
        .collect();
    let table = Arc::new(table);

    SimulatedBrowser::new(DEBOUNCE, move |text: &str| {
        table
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_owned())
    })
}
