// Copyright (c) The translit-harness Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::outcome::{PLACEHOLDER, TestStatus};
use owo_colors::Style;

#[derive(Debug, Default, Clone)]
pub(super) struct Styles {
    pub(super) count: Style,
    pub(super) heading: Style,
    pub(super) case_id: Style,
    pub(super) pass: Style,
    pub(super) fail: Style,
}

impl Styles {
    pub(super) fn colorize(&mut self) {
        self.count = Style::new().bold();
        self.heading = Style::new().bold().underline();
        self.case_id = Style::new().blue().bold();
        self.pass = Style::new().green().bold();
        self.fail = Style::new().red().bold();
    }

    pub(super) fn for_status(&self, status: TestStatus) -> Style {
        match status {
            TestStatus::Pass => self.pass,
            TestStatus::Fail => self.fail,
        }
    }
}

/// Returns the text to render for a captured field.
///
/// Empty fields are rendered as the placeholder, so every entry has the same shape.
pub(super) fn field_text(value: &str) -> &str {
    if value.is_empty() { PLACEHOLDER } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_text() {
        assert_eq!(field_text(""), PLACEHOLDER);
        assert_eq!(field_text("நான்"), "நான்");
        assert_eq!(field_text("  "), "  ");
    }
}
