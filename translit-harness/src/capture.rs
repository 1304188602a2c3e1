// Copyright (c) The translit-harness Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Normalizes what a finished case emitted into an [`Outcome`].
//!
//! A case reports its input, expected and actual text through exactly one side channel:
//! either free-form text with labeled lines, or a list of key/value annotations. Both normalize
//! to the same [`Outcome`] shape. Nothing here ever fails: anything that can't be found becomes
//! a placeholder.

use crate::outcome::{Outcome, OutcomeText, TestStatus};

/// The label (or annotation key) for the raw input.
pub const INPUT_LABEL: &str = "Input";

/// The label (or annotation key) for the expected output.
pub const EXPECTED_LABEL: &str = "Expected";

/// The label (or annotation key) for the actual output.
pub const ACTUAL_LABEL: &str = "Actual";

/// What a finished case reported.
#[derive(Clone, Debug)]
pub struct CaseRecord {
    /// The full case title.
    pub title: String,

    /// The verdict, as decided by the case.
    pub verdict: TestStatus,

    /// The name of the lane that ran the case, if the lane has one.
    pub lane: Option<String>,

    /// The side channel the case populated.
    pub side_channel: SideChannel,
}

/// The side channel a case used to report its text fields.
#[derive(Clone, Debug, Default)]
pub enum SideChannel {
    /// Unstructured text such as captured stdout, with lines like `Input: ...`.
    LabeledText(String),

    /// Structured key/value pairs attached to the case.
    KeyValue(Vec<Annotation>),

    /// The case emitted nothing, for example because it failed before logging.
    #[default]
    Empty,
}

/// A key/value pair attached to a case.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Annotation {
    /// The key, such as `Input`.
    pub key: String,

    /// The value.
    pub value: String,
}

impl Annotation {
    /// Creates a new annotation.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Builds the outcome for a finished case.
///
/// The status is copied from the record's verdict; it is never derived from the text fields.
pub fn capture(record: CaseRecord) -> Outcome {
    let text = match &record.side_channel {
        SideChannel::LabeledText(text) => OutcomeText {
            input: labeled_value(text, INPUT_LABEL),
            expected: labeled_value(text, EXPECTED_LABEL),
            actual: labeled_value(text, ACTUAL_LABEL),
        },
        SideChannel::KeyValue(annotations) => OutcomeText {
            input: annotation_value(annotations, INPUT_LABEL),
            expected: annotation_value(annotations, EXPECTED_LABEL),
            actual: annotation_value(annotations, ACTUAL_LABEL),
        },
        SideChannel::Empty => OutcomeText::default(),
    };

    Outcome::new(record.title, text, record.verdict, record.lane)
}

/// Returns the value of the first line starting with `label:`.
///
/// Surrounding whitespace is trimmed from the value; an empty value counts as missing.
fn labeled_value(text: &str, label: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let value = line.trim_start().strip_prefix(label)?.strip_prefix(':')?;
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_owned())
    })
}

fn annotation_value(annotations: &[Annotation], key: &str) -> Option<String> {
    annotations
        .iter()
        .find(|annotation| annotation.key == key)
        .map(|annotation| annotation.value.clone())
}
