// Copyright (c) The translit-harness Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by the harness.
//!
//! Capture-time degradation (missing labels, missing case ids, missing lane names) is never an
//! error: it resolves to placeholder values. Mismatches between expected and actual output are
//! ordinary failed outcomes. The errors here are for the page collaborator, configuration, and
//! report storage.

use camino::Utf8PathBuf;
use std::{error, fmt};
use thiserror::Error;

/// An operation on the [`Page`](crate::page::Page) collaborator failed.
#[derive(Debug, Error)]
#[error("page operation `{operation}` failed")]
pub struct PageError {
    operation: &'static str,
    #[source]
    source: Box<dyn error::Error + Send + Sync>,
}

impl PageError {
    /// Creates a new `PageError` for the given operation.
    pub fn new(
        operation: &'static str,
        source: impl Into<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }

    /// Returns the name of the operation that failed.
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

/// An error that occurred while reading or parsing the harness config.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigParseError {
    /// The config file could not be read.
    #[error("failed to read harness config at `{path}`")]
    Read {
        /// The path that failed to be read.
        path: Utf8PathBuf,

        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },

    /// The config could not be deserialized.
    #[error("failed to parse harness config{}", DisplayPath(.path.as_ref()))]
    Deserialize {
        /// The path the config was read from, if any.
        path: Option<Utf8PathBuf>,

        /// The underlying deserialization error.
        #[source]
        error: toml::de::Error,
    },

    /// `run.max-concurrency` was set to zero.
    #[error("run.max-concurrency must be at least 1")]
    ZeroConcurrency,
}

/// An error that occurred while reading or parsing a case catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogParseError {
    /// The catalog file could not be read.
    #[error("failed to read case catalog at `{path}`")]
    Read {
        /// The path that failed to be read.
        path: Utf8PathBuf,

        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },

    /// The catalog could not be deserialized.
    #[error("failed to parse case catalog{}", DisplayPath(.path.as_ref()))]
    Deserialize {
        /// The path the catalog was read from, if any.
        path: Option<Utf8PathBuf>,

        /// The underlying deserialization error.
        #[source]
        error: toml::de::Error,
    },

    /// A suite had no cases.
    #[error("suite `{suite}` has no cases")]
    EmptySuite {
        /// The name of the suite.
        suite: String,
    },

    /// Two suites shared a name.
    #[error("suite name `{suite}` is defined more than once")]
    DuplicateSuite {
        /// The duplicated name.
        suite: String,
    },
}

/// An error that occurred while writing the report document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteReportError {
    /// The report document had no parent directory.
    #[error("report path `{path}` has no parent directory")]
    NoParent {
        /// The report path.
        path: Utf8PathBuf,
    },

    /// The directory containing the report could not be created.
    #[error("failed to create report directory `{dir}`")]
    CreateDir {
        /// The directory that failed to be created.
        dir: Utf8PathBuf,

        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },

    /// The report could not be written.
    #[error("failed to write report to `{path}`")]
    Write {
        /// The report path.
        path: Utf8PathBuf,

        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },
}

/// An error that aborted a run.
///
/// Only rendering and storage failures abort a run. Failed cases never do.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RunError {
    /// Writing to the console failed.
    #[error("error writing run summary to console")]
    Console(#[source] std::io::Error),

    /// Writing the report document failed.
    #[error("error writing report document")]
    Report(#[from] WriteReportError),
}

struct DisplayPath<'a>(Option<&'a Utf8PathBuf>);

impl fmt::Display for DisplayPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(path) => write!(f, " at `{path}`"),
            None => Ok(()),
        }
    }
}
