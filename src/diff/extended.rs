//! Move detection over plain diff scripts
//!
//! A deletion and an insertion of equal elements are two halves of one
//! relocation. This module pairs them up: every unclaimed element of the
//! plain diff is matched against the first later unclaimed element of the
//! opposite kind carrying an equal value, and each such pair collapses into
//! a single move. The pairing bookkeeping kept here drives the extended
//! patch builder.

use crate::diff::script::{Diff, DiffElement, diff_by};
use std::collections::HashSet;
use std::fmt;

/// One element of an extended diff: an insertion, a deletion, or a paired
/// relocation. `Move.from` addresses the source sequence, `Move.to` the
/// target sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendedDiffElement {
    Insert { at: usize },
    Delete { at: usize },
    Move { from: usize, to: usize },
}

/// A diff whose deletion/insertion pairs of equal elements are collapsed
/// into moves.
///
/// Alongside the visible elements the struct keeps the pairing bookkeeping:
/// the plain diff it was built from, the plain index of every flattened
/// element in extended order (moves contribute their deletion first), the
/// inverse of that permutation, and the plain indices of the deletions that
/// became move origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedDiff {
    pub elements: Vec<ExtendedDiffElement>,
    pub(crate) source: Diff,
    pub(crate) source_index: Vec<usize>,
    pub(crate) reordered_index: Vec<usize>,
    pub(crate) move_indices: HashSet<usize>,
}

impl From<DiffElement> for ExtendedDiffElement {
    fn from(element: DiffElement) -> Self {
        match element {
            DiffElement::Insert { at, .. } => ExtendedDiffElement::Insert { at },
            DiffElement::Delete { at } => ExtendedDiffElement::Delete { at },
        }
    }
}

impl fmt::Display for ExtendedDiffElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtendedDiffElement::Insert { at } => write!(f, "I({})", at),
            ExtendedDiffElement::Delete { at } => write!(f, "D({})", at),
            ExtendedDiffElement::Move { from, to } => write!(f, "M({},{})", from, to),
        }
    }
}

impl ExtendedDiff {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExtendedDiffElement> {
        self.elements.iter()
    }

    pub(crate) fn from_diff<T, F>(
        diff: Diff,
        source: &[T],
        target: &[T],
        is_equal: &F,
    ) -> ExtendedDiff
    where
        F: Fn(&T, &T) -> bool,
    {
        let mut elements = Vec::new();
        let mut move_origin_indices = HashSet::new();
        let mut move_target_indices = HashSet::new();
        let mut source_index = Vec::new();

        for (candidate_index, candidate) in diff.elements.iter().enumerate() {
            if move_origin_indices.contains(&candidate_index)
                || move_target_indices.contains(&candidate_index)
            {
                continue;
            }

            let matched = first_match(
                &diff,
                candidate,
                candidate_index,
                &move_origin_indices,
                &move_target_indices,
                source,
                target,
                is_equal,
            );

            match matched {
                Some((moved, match_index)) => {
                    // The deletion half is the move origin whichever side
                    // was encountered first.
                    let (origin_index, target_index) = match candidate {
                        DiffElement::Delete { .. } => (candidate_index, match_index),
                        DiffElement::Insert { .. } => (match_index, candidate_index),
                    };
                    source_index.push(origin_index);
                    source_index.push(target_index);
                    move_origin_indices.insert(origin_index);
                    move_target_indices.insert(target_index);
                    elements.push(moved);
                }
                None => {
                    source_index.push(candidate_index);
                    elements.push(ExtendedDiffElement::from(*candidate));
                }
            }
        }

        let reordered_index = flip(&source_index);

        ExtendedDiff {
            elements,
            source: diff,
            source_index,
            reordered_index,
            move_indices: move_origin_indices,
        }
    }
}

impl<'a> IntoIterator for &'a ExtendedDiff {
    type Item = &'a ExtendedDiffElement;
    type IntoIter = std::slice::Iter<'a, ExtendedDiffElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Computes a diff between two sequences with relocations reported as moves.
///
/// # Examples
///
/// ```rust
/// use sift::{ExtendedDiffElement, extended_diff};
///
/// let result = extended_diff(&['a', 'b', 'c'], &['c', 'a', 'b']);
///
/// assert_eq!(result.elements, vec![ExtendedDiffElement::Move { from: 2, to: 0 }]);
/// ```
pub fn extended_diff<T: PartialEq>(source: &[T], target: &[T]) -> ExtendedDiff {
    extended_diff_by(source, target, |a, b| a == b)
}

/// Computes a move-aware diff under a caller-supplied equality function.
pub fn extended_diff_by<T>(
    source: &[T],
    target: &[T],
    is_equal: impl Fn(&T, &T) -> bool,
) -> ExtendedDiff {
    ExtendedDiff::from_diff(diff_by(source, target, &is_equal), source, target, &is_equal)
}

#[allow(clippy::too_many_arguments)]
fn first_match<T, F>(
    diff: &Diff,
    candidate: &DiffElement,
    candidate_index: usize,
    claimed_origins: &HashSet<usize>,
    claimed_targets: &HashSet<usize>,
    source: &[T],
    target: &[T],
    is_equal: &F,
) -> Option<(ExtendedDiffElement, usize)>
where
    F: Fn(&T, &T) -> bool,
{
    for match_index in candidate_index + 1..diff.len() {
        if claimed_origins.contains(&match_index) || claimed_targets.contains(&match_index) {
            continue;
        }
        if let Some(moved) = create_match(
            candidate,
            &diff.elements[match_index],
            source,
            target,
            is_equal,
        ) {
            return Some((moved, match_index));
        }
    }
    None
}

fn create_match<T, F>(
    candidate: &DiffElement,
    other: &DiffElement,
    source: &[T],
    target: &[T],
    is_equal: &F,
) -> Option<ExtendedDiffElement>
where
    F: Fn(&T, &T) -> bool,
{
    match (candidate, other) {
        (
            DiffElement::Delete { at },
            DiffElement::Insert {
                from,
                at: insertion_at,
            },
        )
        | (
            DiffElement::Insert {
                from,
                at: insertion_at,
            },
            DiffElement::Delete { at },
        ) if is_equal(&source[*at], &target[*from]) => Some(ExtendedDiffElement::Move {
            from: *at,
            to: *insertion_at,
        }),
        _ => None,
    }
}

/// Inverts a permutation: `flip(p)[p[i]] == i`.
pub(crate) fn flip(source_index: &[usize]) -> Vec<usize> {
    let mut flipped = vec![0; source_index.len()];
    for (position, &index) in source_index.iter().enumerate() {
        flipped[index] = position;
    }
    flipped
}
