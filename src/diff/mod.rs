//! Shortest-edit-script diffing
//!
//! This module contains the diff half of the crate:
//!
//! - `edit_graph`: greedy edit-graph search recording one trace per step
//! - `extended`: move detection over a plain diff
//! - `nested`: two-level diffs of sectioned sequences
//! - `script`: path reconstruction and the plain insert/delete diff

pub(crate) mod edit_graph;
pub mod extended;
pub mod nested;
pub mod script;
