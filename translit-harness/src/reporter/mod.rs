// Copyright (c) The translit-harness Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renders a finished run as a console summary and a durable document.
//!
//! Both renderers read a [`RunSnapshot`](crate::store::RunSnapshot) without modifying it, and
//! rendering the same snapshot twice produces the same bytes.

mod displayer;
mod document;
mod helpers;

pub use displayer::*;
pub use document::*;
