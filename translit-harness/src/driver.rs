// Copyright (c) The translit-harness Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Types raw input into the widget and reads back its settled output.

use crate::{
    config::DriverConfig,
    errors::PageError,
    page::{Key, Page},
};
use tracing::trace;

/// Feeds raw text into the widget and returns its settled output.
///
/// The widget renders incrementally: it debounces input, and it holds the trailing token in a
/// composing state until a boundary character arrives. To observe the final output, the driver:
///
/// 1. clears the control;
/// 2. types the raw text one character at a time, at the configured cadence;
/// 3. types a space and immediately deletes it, which commits the composing tail;
/// 4. waits for the settle interval;
/// 5. reads the value back.
///
/// The raw text is passed through as-is: multi-codepoint clusters, punctuation, digits and runs
/// of whitespace all reach the widget unchanged.
///
/// The settle interval is fixed. If it is shorter than the widget's debounce window, the read
/// races the widget and shows up as a mismatch at the call site.
#[derive(Copy, Clone, Debug)]
pub struct InputDriver {
    config: DriverConfig,
}

impl InputDriver {
    /// Creates a new driver with the given timings.
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    /// Returns the timings this driver uses.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Converts `raw` through the widget on `page`, returning the settled output.
    pub async fn convert<P: Page>(&self, page: &mut P, raw: &str) -> Result<String, PageError> {
        page.click().await?;
        page.clear().await?;

        trace!(
            chars = raw.chars().count(),
            delay = ?self.config.keystroke_delay,
            "typing input"
        );
        page.type_sequence(raw, self.config.keystroke_delay).await?;

        page.press(Key::Space).await?;
        page.press(Key::Backspace).await?;

        page.wait_for(self.config.settle).await?;
        page.input_value().await
    }
}

impl Default for InputDriver {
    fn default() -> Self {
        Self::new(DriverConfig::default())
    }
}
