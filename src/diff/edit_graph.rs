//! Shortest edit path search over the edit graph of two sequences
//!
//! This module implements the greedy shortest-edit-script search that every
//! diff in this crate is built on. Two sequences of lengths N and M span an
//! edit graph: moving right consumes one source element (a deletion), moving
//! down consumes one target element (an insertion), and a diagonal step is
//! free whenever the elements at that grid position compare equal. The
//! shortest path from `(0,0)` to `(N,M)` is the smallest edit script turning
//! the source into the target.
//!
//! ## Algorithm Overview
//!
//! The search explores the graph breadth-first over the edit depth `d`:
//!
//! ### Phase 1: Diagonal sweep
//!
//! For each depth, every reachable diagonal `k = x - y` is visited from
//! `-d` to `d` in steps of two. The furthest x reached on each diagonal is
//! kept in a working array indexed by `k + (N + M)`:
//! - at `k == -d` the only way in is an insertion from diagonal `k + 1`
//! - at `k == d` the only way in is a deletion from diagonal `k - 1`
//! - in between, the neighbour that reached further wins, with ties going
//!   to the deletion side
//!
//! ### Phase 2: Snakes
//!
//! After each step the walk slides down the diagonal for as long as the
//! sequences agree, recording one match trace per agreeing pair. The search
//! stops the moment a walk reaches `(N,M)`; the recorded traces then hold at
//! least one shortest path for the reconstruction pass.
//!
//! ## Recorded traces
//!
//! Every recorded trace is a single in-grid step: a horizontal step
//! (deletion), a vertical step (insertion) or a diagonal step (match). Steps
//! that would leave the grid, and steps out of a diagonal no in-bounds walk
//! has reached, record nothing. The depth-0 visit only seeds the walk at the
//! origin, so diffing a sequence against itself records matches alone and
//! yields an empty diff downstream.
//!
//! ## Debug Logging
//!
//! The sweep logs its progress when built with the `debug_diff` feature flag
//! (`cargo build --features debug_diff`). The output includes the input
//! lengths, the depth each sweep reaches and the final trace count.

use derive_new::new;

/// Macro for debug logging that is enabled with the debug_diff feature flag
///
/// # Usage
/// ```rust,ignore
/// debug_log!("Sweeping depth {}", d);
/// ```
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(any(feature = "debug_diff"))]
        {
            eprintln!($($arg)*);
        }
    };
}

/// One vertex of the edit graph: `x` source elements and `y` target elements
/// consumed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

/// A single step between two neighbouring vertices of the edit graph,
/// tagged with the depth of the sweep that recorded it.
///
/// Two traces are equal when they connect the same vertices; the depth is
/// bookkeeping for the search and does not take part in equality.
#[derive(Debug, Clone, Copy, Eq, new)]
pub struct Trace {
    pub from: Point,
    pub to: Point,
    pub edit_distance: usize,
}

impl PartialEq for Trace {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceType {
    Insertion,
    Deletion,
    MatchPoint,
}

impl Trace {
    /// Classifies the step: a diagonal move is a match, a vertical move an
    /// insertion and a horizontal move a deletion.
    pub fn trace_type(&self) -> TraceType {
        if self.from.x + 1 == self.to.x && self.from.y + 1 == self.to.y {
            TraceType::MatchPoint
        } else if self.from.y < self.to.y {
            TraceType::Insertion
        } else {
            TraceType::Deletion
        }
    }
}

/// Runs the shortest edit path search and returns every recorded trace,
/// ending with the step that reached `(N,M)`.
///
/// Empty inputs short-circuit: two empty sequences record nothing, a single
/// empty side records the obvious straight-line path.
pub(crate) fn diff_traces<T, F>(source: &[T], target: &[T], is_equal: &F) -> Vec<Trace>
where
    F: Fn(&T, &T) -> bool,
{
    if source.is_empty() && target.is_empty() {
        Vec::new()
    } else if target.is_empty() {
        traces_for_deletions(source.len())
    } else if source.is_empty() {
        traces_for_insertions(target.len())
    } else {
        myers_traces(source, target, is_equal)
    }
}

fn traces_for_deletions(count: usize) -> Vec<Trace> {
    (0..count)
        .map(|index| Trace::new(Point::new(index, 0), Point::new(index + 1, 0), 0))
        .collect()
}

fn traces_for_insertions(count: usize) -> Vec<Trace> {
    (0..count)
        .map(|index| Trace::new(Point::new(0, index), Point::new(0, index + 1), 0))
        .collect()
}

fn myers_traces<T, F>(source: &[T], target: &[T], is_equal: &F) -> Vec<Trace>
where
    F: Fn(&T, &T) -> bool,
{
    let n = source.len() as isize;
    let m = target.len() as isize;
    let max = n + m;
    let offset = max as usize;

    debug_log!("searching edit paths for n={} m={}", n, m);

    // Furthest-reaching x per diagonal k, stored at k + max.
    // -1 marks a diagonal no in-bounds walk has reached yet.
    let mut v = vec![-1_isize; 2 * offset + 1];
    let mut traces = Vec::new();

    for d in 0..=max {
        for k in (-d..=d).step_by(2) {
            let index = (k + max) as usize;
            let previous_x = index.checked_sub(1).and_then(|i| v.get(i)).copied();
            let next_x = v.get(index + 1).copied();

            // The depth-0 visit seeds the walk at the origin without an edit.
            let (step_from, reached_x) = if d == 0 {
                (None, 0)
            } else if next_step_is_insertion(d, k, previous_x, next_x) {
                let x = v[index + 1];
                if x < 0 {
                    // the diagonal above was never reached in bounds
                    continue;
                }
                (Some(Point::new(x as usize, (x - k - 1) as usize)), x)
            } else {
                let x = v[index - 1];
                if x < 0 {
                    continue;
                }
                (Some(Point::new(x as usize, (x + 1 - k) as usize)), x + 1)
            };

            let mut x = reached_x;
            let mut y = x - k;

            if x <= n && y <= m {
                if let Some(from) = step_from {
                    traces.push(Trace::new(from, Point::new(x as usize, y as usize), d as usize));
                }

                // Slide down the diagonal while the sequences agree.
                while x < n && y < m && is_equal(&source[x as usize], &target[y as usize]) {
                    x += 1;
                    y += 1;
                    traces.push(Trace::new(
                        Point::new(x as usize - 1, y as usize - 1),
                        Point::new(x as usize, y as usize),
                        d as usize,
                    ));
                }

                v[index] = x;

                if x >= n && y >= m {
                    debug_log!(
                        "reached (n,m) at depth {} with {} recorded traces",
                        d,
                        traces.len()
                    );
                    return traces;
                }
            }
        }

        debug_log!("depth {} swept without reaching (n,m)", d);
    }

    traces
}

fn next_step_is_insertion(
    d: isize,
    k: isize,
    previous_x: Option<isize>,
    next_x: Option<isize>,
) -> bool {
    if k == -d {
        return true;
    }
    if k != d
        && let (Some(previous_x), Some(next_x)) = (previous_x, next_x)
        && previous_x < next_x
    {
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn string_inputs() -> (Vec<char>, Vec<char>) {
        ("abcabba".chars().collect(), "cbabac".chars().collect())
    }

    fn eq(a: &char, b: &char) -> bool {
        a == b
    }

    #[rstest]
    fn test_search_depth_matches_edit_distance(string_inputs: (Vec<char>, Vec<char>)) {
        let (a, b) = string_inputs;
        let traces = diff_traces(&a, &b, &eq);

        let last = traces.last().unwrap();
        assert_eq!(last.edit_distance, 5);
        assert_eq!(last.to, Point::new(a.len(), b.len()));
    }

    #[rstest]
    fn test_identical_inputs_record_matches_only(string_inputs: (Vec<char>, Vec<char>)) {
        let (a, _) = string_inputs;
        let traces = diff_traces(&a, &a, &eq);

        assert!(
            traces
                .iter()
                .all(|trace| trace.trace_type() == TraceType::MatchPoint)
        );
        assert_eq!(traces.last().unwrap().to, Point::new(a.len(), a.len()));
    }

    #[rstest]
    fn test_empty_inputs_record_nothing() {
        let traces = diff_traces::<char, _>(&[], &[], &eq);
        assert_eq!(traces, vec![]);
    }

    #[rstest]
    fn test_empty_target_records_straight_deletions() {
        let a: Vec<char> = "abc".chars().collect();
        let traces = diff_traces(&a, &[], &eq);

        let expected = vec![
            Trace::new(Point::new(0, 0), Point::new(1, 0), 0),
            Trace::new(Point::new(1, 0), Point::new(2, 0), 0),
            Trace::new(Point::new(2, 0), Point::new(3, 0), 0),
        ];
        assert_eq!(traces, expected);
    }

    #[rstest]
    fn test_empty_source_records_straight_insertions() {
        let b: Vec<char> = "ab".chars().collect();
        let traces = diff_traces(&[], &b, &eq);

        let expected = vec![
            Trace::new(Point::new(0, 0), Point::new(0, 1), 0),
            Trace::new(Point::new(0, 1), Point::new(0, 2), 0),
        ];
        assert_eq!(traces, expected);
    }

    #[rstest]
    #[case(Point::new(2, 3), Point::new(3, 4), TraceType::MatchPoint)]
    #[case(Point::new(2, 3), Point::new(2, 4), TraceType::Insertion)]
    #[case(Point::new(2, 3), Point::new(3, 3), TraceType::Deletion)]
    fn test_trace_classification(
        #[case] from: Point,
        #[case] to: Point,
        #[case] expected: TraceType,
    ) {
        assert_eq!(Trace::new(from, to, 1).trace_type(), expected);
    }
}
