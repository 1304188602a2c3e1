// Copyright (c) The translit-harness Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Harness configuration.
//!
//! The config is a TOML document with three optional tables:
//!
//! ```toml
//! [driver]
//! keystroke-delay = "10ms"
//! settle = "2s"
//!
//! [run]
//! base-url = "/"
//! max-concurrency = 4
//! case-timeout = "60s"
//!
//! [report]
//! dir = "Report"
//! file-name = "report.md"
//! colorize = false
//! ```

use crate::errors::ConfigParseError;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::{num::NonZeroUsize, time::Duration};

/// The top-level harness configuration.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HarnessConfig {
    /// Input driver timings.
    pub driver: DriverConfig,

    /// Run scheduling.
    pub run: RunConfig,

    /// Report output.
    pub report: ReportConfig,
}

impl HarnessConfig {
    /// Parses a config from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigParseError> {
        Self::parse(contents, None)
    }

    /// Reads and parses a config file.
    pub fn from_file(path: &Utf8Path) -> Result<Self, ConfigParseError> {
        let contents = std::fs::read_to_string(path).map_err(|error| ConfigParseError::Read {
            path: path.to_owned(),
            error,
        })?;
        Self::parse(&contents, Some(path))
    }

    fn parse(contents: &str, path: Option<&Utf8Path>) -> Result<Self, ConfigParseError> {
        let config: HarnessConfigDeserialize =
            toml::from_str(contents).map_err(|error| ConfigParseError::Deserialize {
                path: path.map(Utf8Path::to_owned),
                error,
            })?;
        config.into_config()
    }
}

// Deserialized form of HarnessConfig; max-concurrency is validated afterwards.
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct HarnessConfigDeserialize {
    #[serde(default)]
    driver: DriverConfig,
    #[serde(default)]
    run: RunConfigDeserialize,
    #[serde(default)]
    report: ReportConfig,
}

impl HarnessConfigDeserialize {
    fn into_config(self) -> Result<HarnessConfig, ConfigParseError> {
        let max_concurrency = NonZeroUsize::new(self.run.max_concurrency)
            .ok_or(ConfigParseError::ZeroConcurrency)?;
        Ok(HarnessConfig {
            driver: self.driver,
            run: RunConfig {
                base_url: self.run.base_url,
                max_concurrency,
                case_timeout: self.run.case_timeout,
            },
            report: self.report,
        })
    }
}

/// Timings for the [`InputDriver`](crate::driver::InputDriver).
#[derive(Copy, Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DriverConfig {
    /// The delay between simulated keystrokes.
    ///
    /// Slower cadences are closer to real typing; faster ones get large suites through quicker.
    #[serde(default = "default_keystroke_delay", with = "humantime_serde")]
    pub keystroke_delay: Duration,

    /// How long to wait after the last keystroke before reading the output back.
    ///
    /// This must be longer than the widget's debounce window. If it isn't, reads race the widget
    /// and show up as spurious mismatches; nothing detects or corrects that.
    #[serde(default = "default_settle", with = "humantime_serde")]
    pub settle: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            keystroke_delay: default_keystroke_delay(),
            settle: default_settle(),
        }
    }
}

fn default_keystroke_delay() -> Duration {
    Duration::from_millis(10)
}

fn default_settle() -> Duration {
    Duration::from_secs(2)
}

/// Scheduling for a run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RunConfig {
    /// The URL each case navigates to before typing.
    pub base_url: String,

    /// The maximum number of cases in flight at once, across all lanes.
    pub max_concurrency: NonZeroUsize,

    /// The longest a single case may take before it is marked as failed.
    pub case_timeout: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        let run = RunConfigDeserialize::default();
        Self {
            base_url: run.base_url,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            case_timeout: run.case_timeout,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RunConfigDeserialize {
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_max_concurrency")]
    max_concurrency: usize,
    #[serde(default = "default_case_timeout", with = "humantime_serde")]
    case_timeout: Duration,
}

impl Default for RunConfigDeserialize {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_concurrency: default_max_concurrency(),
            case_timeout: default_case_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "/".to_owned()
}

const DEFAULT_MAX_CONCURRENCY: NonZeroUsize = NonZeroUsize::new(4).expect("4 is non-zero");

fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY.get()
}

fn default_case_timeout() -> Duration {
    Duration::from_secs(60)
}

/// Where and how the report is written.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ReportConfig {
    /// The report directory, relative to the run root.
    #[serde(default = "default_report_dir")]
    pub dir: Utf8PathBuf,

    /// The name of the report document within [`dir`](Self::dir).
    #[serde(default = "default_report_file_name")]
    pub file_name: String,

    /// Whether to colorize the console summary.
    #[serde(default)]
    pub colorize: bool,
}

impl ReportConfig {
    /// Returns the path of the report document for a run rooted at `run_root`.
    pub fn document_path(&self, run_root: &Utf8Path) -> Utf8PathBuf {
        run_root.join(&self.dir).join(&self.file_name)
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dir: default_report_dir(),
            file_name: default_report_file_name(),
            colorize: false,
        }
    }
}

fn default_report_dir() -> Utf8PathBuf {
    "Report".into()
}

fn default_report_file_name() -> String {
    "report.md".to_owned()
}
