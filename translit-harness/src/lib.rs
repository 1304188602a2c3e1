// Copyright (c) The translit-harness Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Black-box conformance harness for reactive transliteration widgets.
//!
//! The harness types romanized text into a widget through a [`page::Page`], waits for the
//! widget's debounced output to settle, and aggregates the outcomes of many concurrently running
//! cases into one deterministic report.
//!
//! The basic flow is:
//!
//! 1. [`runner::RunController`] creates a [`store::RunStore`] for the run.
//! 2. Each case is driven through [`driver::InputDriver`], which returns the settled output.
//! 3. The case's verdict and side channel are normalized into an [`outcome::Outcome`] by the
//!    [`capture`] adapter and recorded through a [`store::RunHandle`].
//! 4. At the end of the run, the [`store::RunSnapshot`] is rendered by the [`reporter`].

pub mod capture;
pub mod catalog;
pub mod config;
pub mod driver;
pub mod errors;
pub mod outcome;
pub mod page;
pub mod reporter;
pub mod runner;
pub mod simulated;
pub mod store;
