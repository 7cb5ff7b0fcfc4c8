//! Patch generation from diff scripts
//!
//! A diff addresses both sequences at once; a patch flattens it into steps
//! against a single evolving sequence, each step addressed relative to the
//! state every earlier step left behind.

use crate::diff::extended::flip;
use crate::diff::script::{Diff, DiffElement, diff};
use crate::patch::reorder::{SortedPatchElement, shifted_patch_elements};
use std::cmp::Ordering;
use std::fmt;

/// One sequential patch step. Indices address the sequence as it stands
/// when the step is applied, not the original input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Insertion { index: usize, element: T },
    Deletion { index: usize },
}

impl<T> Patch<T> {
    pub fn index(&self) -> usize {
        match self {
            Patch::Insertion { index, .. } | Patch::Deletion { index } => *index,
        }
    }

    pub(crate) fn shift_index(&mut self, delta: isize) {
        match self {
            Patch::Insertion { index, .. } | Patch::Deletion { index } => {
                *index = (*index as isize + delta) as usize;
            }
        }
    }
}

impl<T: fmt::Display> fmt::Display for Patch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Patch::Insertion { index, element } => write!(f, "I({},{})", index, element),
            Patch::Deletion { index } => write!(f, "D({})", index),
        }
    }
}

impl Diff {
    /// Converts the diff into sequential patch steps, copying inserted
    /// elements out of the target sequence.
    ///
    /// A running shift keeps the indices valid against the sequence as the
    /// steps before each one leave it: deletions pull the later source
    /// positions back, insertions push them forward.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sift::{Patch, diff};
    ///
    /// let source: Vec<char> = "abc".chars().collect();
    /// let target: Vec<char> = "ac".chars().collect();
    /// let patch = diff(&source, &target).patch(&target);
    ///
    /// assert_eq!(patch, vec![Patch::Deletion { index: 1 }]);
    /// ```
    pub fn patch<T: Clone>(&self, target: &[T]) -> Vec<Patch<T>> {
        let mut shift: isize = 0;
        self.elements
            .iter()
            .map(|element| match *element {
                DiffElement::Delete { at } => {
                    shift -= 1;
                    Patch::Deletion {
                        index: (at as isize + shift + 1) as usize,
                    }
                }
                DiffElement::Insert { at, .. } => {
                    let step = Patch::Insertion {
                        index: at,
                        element: target[at].clone(),
                    };
                    shift += 1;
                    step
                }
            })
            .collect()
    }

    /// Converts the diff into patch steps applied in the order the
    /// comparator requests instead of generated order, with every index
    /// corrected for the changed order. The sort is stable: elements the
    /// comparator ties keep their generated order.
    pub fn patch_ordered<T: Clone>(
        &self,
        target: &[T],
        order: impl FnMut(&DiffElement, &DiffElement) -> Ordering,
    ) -> Vec<Patch<T>> {
        shifted_patch_elements(self.sorted_patch_elements(target, order))
            .into_iter()
            .map(|element| element.value)
            .collect()
    }

    /// Tags every patch step with its generated position and its position
    /// in the requested order, keeping the result in generated order.
    pub(crate) fn sorted_patch_elements<T: Clone>(
        &self,
        target: &[T],
        mut order: impl FnMut(&DiffElement, &DiffElement) -> Ordering,
    ) -> Vec<SortedPatchElement<T>> {
        let mut indices: Vec<usize> = (0..self.len()).collect();
        indices.sort_by(|&a, &b| order(&self.elements[a], &self.elements[b]));
        let sorted_position = flip(&indices);

        self.patch(target)
            .into_iter()
            .enumerate()
            .map(|(index, value)| SortedPatchElement::new(value, index, sorted_position[index]))
            .collect()
    }
}

/// Computes the sequential patch turning `source` into `target`.
pub fn patch<T: PartialEq + Clone>(source: &[T], target: &[T]) -> Vec<Patch<T>> {
    diff(source, target).patch(target)
}
