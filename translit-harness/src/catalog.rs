// Copyright (c) The translit-harness Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Case catalogs: the suites of cases a run executes.
//!
//! A catalog is a TOML document with one or more suites:
//!
//! ```toml
//! [[suite]]
//! name = "Negative Functional Tests"
//! capture = "stdout"
//! keystroke-delay = "100ms"
//! settle = "800ms"
//!
//! [[suite.case]]
//! title = "Neg_Fun_0001 - Joined words without spaces"
//! input = "naanschoolpogiren"
//! expected = "நான்schoolபோகிறேன்"
//! ```

use crate::{config::DriverConfig, errors::CatalogParseError};
use camino::Utf8Path;
use serde::Deserialize;
use std::{collections::HashSet, time::Duration};

/// A set of suites to run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CaseCatalog {
    suites: Vec<Suite>,
}

impl CaseCatalog {
    /// Parses a catalog from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogParseError> {
        Self::parse(contents, None)
    }

    /// Reads and parses a catalog file.
    pub fn from_file(path: &Utf8Path) -> Result<Self, CatalogParseError> {
        let contents = std::fs::read_to_string(path).map_err(|error| CatalogParseError::Read {
            path: path.to_owned(),
            error,
        })?;
        Self::parse(&contents, Some(path))
    }

    fn parse(contents: &str, path: Option<&Utf8Path>) -> Result<Self, CatalogParseError> {
        let catalog: CatalogDeserialize =
            toml::from_str(contents).map_err(|error| CatalogParseError::Deserialize {
                path: path.map(Utf8Path::to_owned),
                error,
            })?;

        let mut names = HashSet::new();
        for suite in &catalog.suite {
            if suite.cases.is_empty() {
                return Err(CatalogParseError::EmptySuite {
                    suite: suite.name.clone(),
                });
            }
            if !names.insert(suite.name.as_str()) {
                return Err(CatalogParseError::DuplicateSuite {
                    suite: suite.name.clone(),
                });
            }
        }

        Ok(Self {
            suites: catalog.suite,
        })
    }

    /// The suites in this catalog, in declaration order.
    pub fn suites(&self) -> &[Suite] {
        &self.suites
    }

    /// The total number of cases across all suites.
    pub fn case_count(&self) -> usize {
        self.suites.iter().map(|suite| suite.cases.len()).sum()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDeserialize {
    #[serde(default)]
    suite: Vec<Suite>,
}

/// A group of cases sharing a capture mode and driver timings.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Suite {
    /// The suite name.
    pub name: String,

    /// How cases in this suite report their text fields.
    pub capture: CaptureMode,

    /// Overrides the configured keystroke delay.
    #[serde(default, with = "humantime_serde")]
    pub keystroke_delay: Option<Duration>,

    /// Overrides the configured settle interval.
    #[serde(default, with = "humantime_serde")]
    pub settle: Option<Duration>,

    /// The cases in this suite.
    #[serde(rename = "case")]
    pub cases: Vec<CaseDef>,
}

impl Suite {
    /// Returns the driver timings for this suite, starting from `base`.
    pub fn driver_config(&self, base: &DriverConfig) -> DriverConfig {
        DriverConfig {
            keystroke_delay: self.keystroke_delay.unwrap_or(base.keystroke_delay),
            settle: self.settle.unwrap_or(base.settle),
        }
    }
}

/// The side channel cases in a suite report through.
#[derive(Copy, Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum CaptureMode {
    /// Log `Input:`, `Expected:` and `Actual:` lines.
    Stdout,

    /// Attach `Input`, `Expected` and `Actual` annotations.
    Annotations,
}

/// A single case.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CaseDef {
    /// The case title, normally starting with its case id.
    pub title: String,

    /// The raw text typed into the widget.
    pub input: String,

    /// The output the widget is expected to settle on.
    pub expected: String,
}
