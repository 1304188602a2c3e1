// Copyright (c) The translit-harness Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Run-scoped accumulation of outcomes.
//!
//! The main types here are [`RunStore`], which owns the outcomes of one run, [`RunHandle`],
//! which cases use to record their outcomes, and [`RunSnapshot`], the read-only view handed to
//! the reporter once the run is over.
//!
//! Two views are derived from the raw collection:
//!
//! * totals count every recorded outcome, including ones that share an id;
//! * the unique view keeps the first outcome recorded for each id.
//!
//! It is unclear whether counting repeated ids in the totals is intended (retried or
//! parameterized cases) or accidental; the behavior is kept as-is.

use crate::{
    capture::{CaseRecord, capture},
    outcome::{CaseId, Category, Outcome},
};
use chrono::{DateTime, FixedOffset, Local};
use indexmap::IndexMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

/// Owns the outcomes recorded during one run.
///
/// Created when the run begins. Cases record into it through [`RunHandle`]s, and it is read
/// exactly once through [`finish`](Self::finish).
#[derive(Debug)]
pub struct RunStore {
    started_at: DateTime<FixedOffset>,
    state: Arc<Mutex<RunState>>,
}

impl RunStore {
    /// Creates a new store for a run starting now.
    pub fn new() -> Self {
        Self::with_start_time(Local::now().fixed_offset())
    }

    /// Creates a new store for a run that started at the given time.
    pub fn with_start_time(started_at: DateTime<FixedOffset>) -> Self {
        Self {
            started_at,
            state: Arc::new(Mutex::new(RunState::default())),
        }
    }

    /// Returns a handle that cases can use to record outcomes.
    pub fn handle(&self) -> RunHandle {
        RunHandle {
            state: self.state.clone(),
        }
    }

    /// Ends the run, returning a snapshot of everything recorded.
    ///
    /// Handles that are still alive afterwards can no longer record anything.
    pub fn finish(self) -> RunSnapshot {
        let mut state = lock(&self.state);
        state.closed = true;
        let outcomes = std::mem::take(&mut state.outcomes);
        let first_by_id = std::mem::take(&mut state.first_by_id);

        debug!(
            total = outcomes.len(),
            unique = first_by_id.len(),
            "run finished"
        );

        RunSnapshot {
            started_at: self.started_at,
            outcomes,
            first_by_id,
        }
    }
}

impl Default for RunStore {
    fn default() -> Self {
        Self::new()
    }
}

/// A cloneable handle for recording outcomes into a [`RunStore`].
#[derive(Clone, Debug)]
pub struct RunHandle {
    state: Arc<Mutex<RunState>>,
}

impl RunHandle {
    /// Captures the outcome for a finished case and records it.
    pub fn capture(&self, record: CaseRecord) -> Recorded {
        self.record(capture(record))
    }

    /// Records an outcome.
    ///
    /// Appending the outcome and deciding whether it is the first for its id happen under a
    /// single lock, so the first outcome to complete for an id is the one kept in the unique
    /// view.
    pub fn record(&self, outcome: Outcome) -> Recorded {
        let mut state = lock(&self.state);
        if state.closed {
            warn!(
                case_id = %outcome.id(),
                lane = outcome.lane(),
                "outcome recorded after the run finished, ignoring"
            );
            return Recorded::Closed;
        }

        let index = state.outcomes.len();
        let recorded = match state.first_by_id.get(outcome.id()) {
            Some(&first) => Recorded::Duplicate {
                first_lane: state.outcomes[first].lane().to_owned(),
            },
            None => {
                state.first_by_id.insert(outcome.id().clone(), index);
                Recorded::Unique
            }
        };
        state.outcomes.push(outcome);
        recorded
    }
}

/// The result of recording an outcome.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Recorded {
    /// This was the first outcome recorded for its id.
    Unique,

    /// An outcome with the same id was recorded earlier. This outcome counts towards totals but
    /// is left out of the unique view.
    Duplicate {
        /// The lane that recorded the earlier outcome.
        first_lane: String,
    },

    /// The run had already finished, so the outcome was dropped.
    Closed,
}

#[derive(Debug, Default)]
struct RunState {
    outcomes: Vec<Outcome>,
    // Maps each id to the index of its first outcome.
    first_by_id: IndexMap<CaseId, usize>,
    closed: bool,
}

fn lock(state: &Mutex<RunState>) -> MutexGuard<'_, RunState> {
    // The state is consistent after every push, so a poisoned lock is still usable.
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A read-only view of a finished run.
#[derive(Clone, Debug)]
pub struct RunSnapshot {
    started_at: DateTime<FixedOffset>,
    outcomes: Vec<Outcome>,
    first_by_id: IndexMap<CaseId, usize>,
}

impl RunSnapshot {
    /// The time the run started.
    pub fn started_at(&self) -> DateTime<FixedOffset> {
        self.started_at
    }

    /// Every recorded outcome, in the order they were recorded.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Counts over every recorded outcome, including ones with repeated ids.
    pub fn totals(&self) -> RunTotals {
        let passed = self
            .outcomes
            .iter()
            .filter(|outcome| outcome.status().is_pass())
            .count();
        RunTotals {
            total: self.outcomes.len(),
            passed,
            failed: self.outcomes.len() - passed,
        }
    }

    /// The first outcome recorded for each listed id, sorted by category and then by id.
    ///
    /// Unclassified ids are left out.
    pub fn unique_view(&self) -> Vec<&Outcome> {
        let mut unique: Vec<_> = self
            .first_by_id
            .values()
            .map(|&index| &self.outcomes[index])
            .filter(|outcome| outcome.category().is_listed())
            .collect();
        unique.sort_by(|a, b| a.listing_cmp(b));
        unique
    }

    /// The unique view, restricted to positive cases.
    pub fn positive(&self) -> Vec<&Outcome> {
        self.in_category(Category::Positive)
    }

    /// The unique view, restricted to negative cases.
    pub fn negative(&self) -> Vec<&Outcome> {
        self.in_category(Category::Negative)
    }

    fn in_category(&self, category: Category) -> Vec<&Outcome> {
        self.unique_view()
            .into_iter()
            .filter(|outcome| outcome.category() == category)
            .collect()
    }
}

/// Pass/fail counts for a run.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct RunTotals {
    /// The number of outcomes recorded.
    pub total: usize,

    /// The number of passing outcomes.
    pub passed: usize,

    /// The number of failing outcomes.
    pub failed: usize,
}

impl RunTotals {
    /// Returns true if no outcome failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}
