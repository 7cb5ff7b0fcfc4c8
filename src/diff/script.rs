//! Diff scripts reconstructed from recorded edit graph traces
//!
//! The search in [`edit_graph`](super::edit_graph) records every step it
//! takes; this module walks those records backwards to a single shortest
//! path and keeps its non-matching steps as the diff script.

use crate::diff::edit_graph::{self, Point, Trace, TraceType};
use std::fmt;

/// One scripted edit.
///
/// `Insert` carries two coordinates: `from` is the target-side offset of the
/// inserted element, `at` the position the insertion lands on. `Delete`
/// carries the source-side position to remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffElement {
    Insert { from: usize, at: usize },
    Delete { at: usize },
}

/// The shortest edit script between two sequences, insertions addressed
/// target-side and deletions source-side.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Diff {
    pub elements: Vec<DiffElement>,
}

impl DiffElement {
    fn from_trace(trace: &Trace) -> Option<DiffElement> {
        match trace.trace_type() {
            TraceType::Insertion => Some(DiffElement::Insert {
                from: trace.from.y,
                at: trace.to.x + trace.from.y - trace.from.x,
            }),
            TraceType::Deletion => Some(DiffElement::Delete { at: trace.from.x }),
            TraceType::MatchPoint => None,
        }
    }
}

impl fmt::Display for DiffElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffElement::Insert { from, at } => write!(f, "I({},{})", from, at),
            DiffElement::Delete { at } => write!(f, "D({})", at),
        }
    }
}

impl Diff {
    pub(crate) fn from_traces(path: &[Trace]) -> Diff {
        let elements = path.iter().filter_map(DiffElement::from_trace).collect();
        Diff { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffElement> {
        self.elements.iter()
    }
}

impl<'a> IntoIterator for &'a Diff {
    type Item = &'a DiffElement;
    type IntoIter = std::slice::Iter<'a, DiffElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Computes the shortest diff between two sequences of equatable elements.
///
/// # Examples
///
/// ```rust
/// use sift::diff;
///
/// let source: Vec<char> = "abcabba".chars().collect();
/// let target: Vec<char> = "cbabac".chars().collect();
/// let result = diff(&source, &target);
///
/// assert_eq!(result.len(), 5);
/// ```
pub fn diff<T: PartialEq>(source: &[T], target: &[T]) -> Diff {
    diff_by(source, target, |a, b| a == b)
}

/// Computes the shortest diff between two sequences under a caller-supplied
/// equality function.
pub fn diff_by<T>(source: &[T], target: &[T], is_equal: impl Fn(&T, &T) -> bool) -> Diff {
    Diff::from_traces(&diff_path_traces(source, target, &is_equal))
}

/// Runs the trace search and reduces the recorded traces to one shortest
/// path from the origin to `(N,M)`.
pub(crate) fn diff_path_traces<T, F>(source: &[T], target: &[T], is_equal: &F) -> Vec<Trace>
where
    F: Fn(&T, &T) -> bool,
{
    find_path(&edit_graph::diff_traces(source, target, is_equal))
}

/// Chains the recorded traces backwards from the terminal step, taking the
/// latest-recorded trace ending where the current one starts.
///
/// Panics when a non-empty record contains no chain back to the origin;
/// the search never produces such a record.
fn find_path(traces: &[Trace]) -> Vec<Trace> {
    let Some(&last) = traces.last() else {
        return Vec::new();
    };

    let origin = Point::new(0, 0);
    let mut path = vec![last];
    let mut item = last;

    if item.from != origin {
        for &trace in traces.iter().rev() {
            if trace.to == item.from {
                path.push(trace);
                item = trace;
                if trace.from == origin {
                    break;
                }
            }
        }
    }

    if item.from != origin {
        panic!("recorded traces contain no path back to the origin");
    }

    path.reverse();
    path
}
