//! Patch generation for move-aware diffs
//!
//! An extended patch keeps each detected move as one step instead of a
//! deletion/insertion pair. Internally the pair halves travel through the
//! same index-correction pass as plain steps, boxed together so a caller's
//! ordering can never split them, and collapse into a single move when the
//! steps are finally emitted.

use crate::diff::extended::{ExtendedDiff, ExtendedDiffElement, extended_diff};
use crate::patch::reorder::{SortedPatchElement, shifted_patch_elements};
use crate::patch::step::Patch;
use std::cmp::Ordering;
use std::fmt;

/// One sequential patch step of a move-aware patch. `Move` removes the
/// element at `from` and reinserts it at `to` in the shortened sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtendedPatch<T> {
    Insertion { index: usize, element: T },
    Deletion { index: usize },
    Move { from: usize, to: usize },
}

impl<T: fmt::Display> fmt::Display for ExtendedPatch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtendedPatch::Insertion { index, element } => write!(f, "I({},{})", index, element),
            ExtendedPatch::Deletion { index } => write!(f, "D({})", index),
            ExtendedPatch::Move { from, to } => write!(f, "M({},{})", from, to),
        }
    }
}

/// A diff element boxed together with the patch halves it owns, so sorting
/// by diff element carries the halves along as one unit.
enum BoxedDiffAndPatchElement<T> {
    Move {
        diff_element: ExtendedDiffElement,
        deletion: SortedPatchElement<T>,
        insertion: SortedPatchElement<T>,
    },
    Single {
        diff_element: ExtendedDiffElement,
        element: SortedPatchElement<T>,
    },
}

impl<T> BoxedDiffAndPatchElement<T> {
    fn diff_element(&self) -> &ExtendedDiffElement {
        match self {
            BoxedDiffAndPatchElement::Move { diff_element, .. }
            | BoxedDiffAndPatchElement::Single { diff_element, .. } => diff_element,
        }
    }

    /// Unboxes in application order: a move always contributes its deletion
    /// half first.
    fn into_sorted_elements(self) -> Vec<SortedPatchElement<T>> {
        match self {
            BoxedDiffAndPatchElement::Move {
                deletion,
                insertion,
                ..
            } => vec![deletion, insertion],
            BoxedDiffAndPatchElement::Single { element, .. } => vec![element],
        }
    }
}

impl ExtendedDiff {
    /// Converts the diff into sequential patch steps with moves kept whole.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sift::{ExtendedPatch, extended_diff};
    ///
    /// let source = vec!['a', 'b', 'c'];
    /// let target = vec!['c', 'a', 'b'];
    /// let patch = extended_diff(&source, &target).patch(&target);
    ///
    /// assert_eq!(patch, vec![ExtendedPatch::Move { from: 2, to: 0 }]);
    /// ```
    pub fn patch<T: Clone>(&self, target: &[T]) -> Vec<ExtendedPatch<T>> {
        let shifted = shifted_patch_elements(self.sorted_pair_elements(target));
        self.emit_steps(&shifted)
    }

    /// Converts the diff into patch steps applied in the order the
    /// comparator requests. The comparator sees whole diff elements, so a
    /// move is ordered as one unit; ties keep their generated order.
    pub fn patch_ordered<T: Clone>(
        &self,
        target: &[T],
        order: impl FnMut(&ExtendedDiffElement, &ExtendedDiffElement) -> Ordering,
    ) -> Vec<ExtendedPatch<T>> {
        let shifted = shifted_patch_elements(self.sorted_elements_ordered(target, order));
        self.emit_steps(&shifted)
    }

    /// Tags the plain patch steps with their slot in the extended element
    /// order, where a move's halves sit next to each other.
    fn sorted_pair_elements<T: Clone>(&self, target: &[T]) -> Vec<SortedPatchElement<T>> {
        self.source
            .patch(target)
            .into_iter()
            .enumerate()
            .map(|(index, value)| SortedPatchElement::new(value, index, self.reordered_index[index]))
            .collect()
    }

    fn sorted_elements_ordered<T: Clone>(
        &self,
        target: &[T],
        mut order: impl FnMut(&ExtendedDiffElement, &ExtendedDiffElement) -> Ordering,
    ) -> Vec<SortedPatchElement<T>> {
        let mut boxed = self.box_diff_and_patch_elements(target);
        boxed.sort_by(|a, b| order(a.diff_element(), b.diff_element()));

        let mut unboxed: Vec<SortedPatchElement<T>> = boxed
            .into_iter()
            .flat_map(BoxedDiffAndPatchElement::into_sorted_elements)
            .collect();
        for (index, element) in unboxed.iter_mut().enumerate() {
            element.sorted_index = index;
        }
        unboxed.sort_by_key(|element| element.source_index);
        unboxed
    }

    /// Pairs every extended element with its one or two patch halves. An
    /// extended element at position `i` preceded by `m` moves (itself
    /// included when it is one) owns the flattened slots `i + m - 1` and
    /// `i + m`; singles own just `i + m`.
    fn box_diff_and_patch_elements<T: Clone>(
        &self,
        target: &[T],
    ) -> Vec<BoxedDiffAndPatchElement<T>> {
        let source_patch = self.sorted_pair_elements(target);
        let mut index_diff = 0;

        self.elements
            .iter()
            .enumerate()
            .map(|(index, element)| match *element {
                ExtendedDiffElement::Move { .. } => {
                    index_diff += 1;
                    BoxedDiffAndPatchElement::Move {
                        diff_element: *element,
                        deletion: source_patch[self.source_index[index + index_diff - 1]].clone(),
                        insertion: source_patch[self.source_index[index + index_diff]].clone(),
                    }
                }
                _ => BoxedDiffAndPatchElement::Single {
                    diff_element: *element,
                    element: source_patch[self.source_index[index + index_diff]].clone(),
                },
            })
            .collect()
    }

    /// Walks the corrected steps in application order and folds each move
    /// pair into one step.
    ///
    /// Panics when a move origin is not directly followed by its partner
    /// of the opposite kind; the pairing upstream keeps the halves adjacent,
    /// so a mismatch means the bookkeeping is broken.
    fn emit_steps<T: Clone>(&self, result: &[SortedPatchElement<T>]) -> Vec<ExtendedPatch<T>> {
        let mut steps = Vec::new();

        for (i, element) in result.iter().enumerate() {
            if self.move_indices.contains(&element.source_index) {
                let Some(target) = result.get(i + 1) else {
                    panic!("move origin without its paired insertion");
                };
                match (&element.value, &target.value) {
                    (
                        Patch::Deletion { index },
                        Patch::Insertion {
                            index: to_index, ..
                        },
                    ) => steps.push(ExtendedPatch::Move {
                        from: *index,
                        to: *to_index,
                    }),
                    (
                        Patch::Insertion { index, .. },
                        Patch::Deletion { index: from_index },
                    ) => steps.push(ExtendedPatch::Move {
                        from: *from_index,
                        to: *index,
                    }),
                    _ => panic!("move halves did not resolve to a deletion and an insertion"),
                }
            } else if i > 0 && self.move_indices.contains(&result[i - 1].source_index) {
                // the partner step one back was folded into its move
            } else {
                match &element.value {
                    Patch::Insertion { index, element } => steps.push(ExtendedPatch::Insertion {
                        index: *index,
                        element: element.clone(),
                    }),
                    Patch::Deletion { index } => {
                        steps.push(ExtendedPatch::Deletion { index: *index })
                    }
                }
            }
        }

        steps
    }
}

/// Computes the move-aware sequential patch turning `source` into `target`.
pub fn extended_patch<T: PartialEq + Clone>(source: &[T], target: &[T]) -> Vec<ExtendedPatch<T>> {
    extended_diff(source, target).patch(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn singles_first(a: &ExtendedDiffElement, b: &ExtendedDiffElement) -> Ordering {
        match (a, b) {
            (ExtendedDiffElement::Move { .. }, ExtendedDiffElement::Move { .. }) => Ordering::Equal,
            (ExtendedDiffElement::Move { .. }, _) => Ordering::Greater,
            (_, ExtendedDiffElement::Move { .. }) => Ordering::Less,
            _ => Ordering::Equal,
        }
    }

    #[rstest]
    fn test_rotation_patches_to_one_move() {
        let source = vec!['a', 'b', 'c'];
        let target = vec!['c', 'a', 'b'];
        let result = extended_patch(&source, &target);

        assert_eq!(result, vec![ExtendedPatch::Move { from: 2, to: 0 }]);
    }

    #[rstest]
    fn test_swap_patches_to_one_move() {
        let result = extended_patch(&['a', 'b'], &['b', 'a']);

        assert_eq!(result, vec![ExtendedPatch::Move { from: 0, to: 1 }]);
    }

    #[rstest]
    fn test_move_and_insertion_mix() {
        let source = vec!['a', 'b'];
        let target = vec!['b', 'a', 'c'];
        let result = extended_patch(&source, &target);

        assert_eq!(
            result,
            vec![
                ExtendedPatch::Move { from: 0, to: 1 },
                ExtendedPatch::Insertion {
                    index: 2,
                    element: 'c'
                },
            ]
        );
    }

    #[rstest]
    fn test_patch_without_moves_matches_plain_steps() {
        let source: Vec<char> = "abc".chars().collect();
        let target: Vec<char> = "axc".chars().collect();
        let result = extended_patch(&source, &target);

        assert_eq!(
            result,
            vec![
                ExtendedPatch::Deletion { index: 1 },
                ExtendedPatch::Insertion {
                    index: 1,
                    element: 'x'
                },
            ]
        );
    }

    #[rstest]
    fn test_patch_ordered_keeps_move_pairs_whole() {
        let source = vec!['a', 'b'];
        let target = vec!['b', 'a', 'c'];
        let result = extended_diff(&source, &target).patch_ordered(&target, singles_first);

        assert_eq!(
            result,
            vec![
                ExtendedPatch::Insertion {
                    index: 2,
                    element: 'c'
                },
                ExtendedPatch::Move { from: 0, to: 1 },
            ]
        );
    }

    #[rstest]
    fn test_patch_ordered_with_generated_order_changes_nothing() {
        let source = vec!['a', 'b'];
        let target = vec!['b', 'a', 'c'];
        let diff = extended_diff(&source, &target);
        let plain = diff.patch(&target);
        let ordered = diff.patch_ordered(&target, |_, _| Ordering::Equal);

        assert_eq!(ordered, plain);
    }

    #[rstest]
    fn test_step_rendering() {
        assert_eq!(
            ExtendedPatch::<char>::Move { from: 1, to: 3 }.to_string(),
            "M(1,3)"
        );
        assert_eq!(ExtendedPatch::<char>::Deletion { index: 0 }.to_string(), "D(0)");
        assert_eq!(
            ExtendedPatch::Insertion {
                index: 2,
                element: 'z'
            }
            .to_string(),
            "I(2,z)"
        );
    }
}
