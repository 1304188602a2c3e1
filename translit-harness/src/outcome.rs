// Copyright (c) The translit-harness Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The captured result of a single test case.

use regex::Regex;
use std::{cmp::Ordering, fmt, sync::LazyLock};

/// Rendered in place of any field that could not be captured.
pub const PLACEHOLDER: &str = "N/A";

/// The lane name used when the execution context cannot report one.
pub const UNKNOWN_LANE: &str = "unknown";

static LISTED_CASE_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:Pos|Neg)_Fun_[0-9]+").expect("case id regex is valid"));

static OTHER_CASE_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z]+_Fun_[0-9]+").expect("case id regex is valid"));

/// A short case identifier embedded in a test title, such as `Pos_Fun_0001`.
///
/// Case ids are the deduplication and sort key of the report. Titles without an id map to the
/// [`PLACEHOLDER`] id, which is always [`Category::Unclassified`].
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CaseId(String);

impl CaseId {
    /// Extracts the case id from `title`, or the placeholder id if there isn't one.
    ///
    /// A positive or negative id anywhere in the title takes precedence, even when it is preceded
    /// by another `*_Fun_*` token or glued to a stray prefix. Other ids are only used when the
    /// title has neither.
    pub fn from_title(title: &str) -> Self {
        let found = LISTED_CASE_ID_REGEX
            .find(title)
            .or_else(|| OTHER_CASE_ID_REGEX.find(title));
        match found {
            Some(m) => Self(m.as_str().to_owned()),
            None => Self::not_available(),
        }
    }

    /// The placeholder id.
    pub fn not_available() -> Self {
        Self(PLACEHOLDER.to_owned())
    }

    /// Returns the id as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the category this id belongs to, based on its prefix.
    pub fn category(&self) -> Category {
        if self.0.starts_with("Pos_Fun_") {
            Category::Positive
        } else if self.0.starts_with("Neg_Fun_") {
            Category::Negative
        } else {
            Category::Unclassified
        }
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The category of a case, derived from its id prefix.
///
/// Categories are ordered by rank: positive cases are listed before negative ones.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Category {
    /// A `Pos_Fun_*` case.
    Positive,

    /// A `Neg_Fun_*` case.
    Negative,

    /// Any other id. Counted in totals, never listed.
    Unclassified,
}

impl Category {
    /// Returns true if cases of this category appear in itemized listings.
    pub fn is_listed(self) -> bool {
        match self {
            Category::Positive | Category::Negative => true,
            Category::Unclassified => false,
        }
    }
}

/// The verdict of a test case, as decided by the case itself.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum TestStatus {
    /// The case passed.
    Pass,

    /// The case failed.
    Fail,
}

impl TestStatus {
    /// Returns true if this is [`TestStatus::Pass`].
    pub fn is_pass(self) -> bool {
        self == TestStatus::Pass
    }

    /// Returns the uppercase label for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            TestStatus::Pass => "PASS",
            TestStatus::Fail => "FAIL",
        }
    }

    /// Returns the glyph shown next to this status.
    pub fn glyph(self) -> &'static str {
        match self {
            TestStatus::Pass => "✅",
            TestStatus::Fail => "❌",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One captured test result.
///
/// Outcomes are immutable: they're created once by the [`capture`](crate::capture) adapter and
/// only read afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Outcome {
    id: CaseId,
    title: String,
    input: String,
    expected: String,
    actual: String,
    status: TestStatus,
    lane: String,
}

impl Outcome {
    /// Creates a new outcome.
    ///
    /// Text fields that are `None` are stored as the [`PLACEHOLDER`], as is a missing lane stored
    /// as [`UNKNOWN_LANE`].
    pub fn new(
        title: impl Into<String>,
        text: OutcomeText,
        status: TestStatus,
        lane: Option<String>,
    ) -> Self {
        let title = title.into();
        Self {
            id: CaseId::from_title(&title),
            title,
            input: text.input.unwrap_or_else(|| PLACEHOLDER.to_owned()),
            expected: text.expected.unwrap_or_else(|| PLACEHOLDER.to_owned()),
            actual: text.actual.unwrap_or_else(|| PLACEHOLDER.to_owned()),
            status,
            lane: lane.unwrap_or_else(|| UNKNOWN_LANE.to_owned()),
        }
    }

    /// The case id.
    pub fn id(&self) -> &CaseId {
        &self.id
    }

    /// The category of the case id.
    pub fn category(&self) -> Category {
        self.id.category()
    }

    /// The full case title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The raw input typed into the widget.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The expected widget output.
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// The observed widget output.
    pub fn actual(&self) -> &str {
        &self.actual
    }

    /// The case verdict.
    pub fn status(&self) -> TestStatus {
        self.status
    }

    /// The lane that produced this outcome.
    pub fn lane(&self) -> &str {
        &self.lane
    }

    /// Orders outcomes for itemized listings: by category rank, then by id.
    pub(crate) fn listing_cmp(&self, other: &Self) -> Ordering {
        self.category()
            .cmp(&other.category())
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// The text fields of an outcome, each of which may be missing.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OutcomeText {
    /// The raw input.
    pub input: Option<String>,

    /// The expected output.
    pub expected: Option<String>,

    /// The actual output.
    pub actual: Option<String>,
}
