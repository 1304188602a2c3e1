// Copyright (c) The translit-harness Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The browser-automation capability the harness is driven through.
//!
//! The page under test holds exactly one multi-line text control, whose reactive behavior is the
//! system under test. The harness never reaches past these operations.

use crate::errors::PageError;
use std::time::Duration;

/// A single key press on the text control.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Key {
    /// The space bar.
    Space,

    /// The backspace key.
    Backspace,
}

/// A page containing the text control under test.
pub trait Page: Send {
    /// Navigates to the given URL.
    fn navigate(&mut self, url: &str) -> impl Future<Output = Result<(), PageError>> + Send;

    /// Clicks the text control, focusing it.
    fn click(&mut self) -> impl Future<Output = Result<(), PageError>> + Send;

    /// Clears the text control.
    fn clear(&mut self) -> impl Future<Output = Result<(), PageError>> + Send;

    /// Types `text` one character at a time, waiting `delay` between characters.
    fn type_sequence(
        &mut self,
        text: &str,
        delay: Duration,
    ) -> impl Future<Output = Result<(), PageError>> + Send;

    /// Presses a single key.
    fn press(&mut self, key: Key) -> impl Future<Output = Result<(), PageError>> + Send;

    /// Reads the current value of the text control.
    fn input_value(&mut self) -> impl Future<Output = Result<String, PageError>> + Send;

    /// Waits for the given duration.
    fn wait_for(
        &mut self,
        duration: Duration,
    ) -> impl Future<Output = Result<(), PageError>> + Send;
}

/// Opens pages within one execution lane, such as one browser engine.
pub trait Browser: Sync {
    /// The type of page this browser opens.
    type Page: Page;

    /// Opens a fresh page.
    fn new_page(&self) -> impl Future<Output = Result<Self::Page, PageError>> + Send;
}
