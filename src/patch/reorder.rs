//! Index correction for caller-ordered patches
//!
//! Patch indices are only meaningful in the order the steps were generated
//! in. When a caller asks for a different application order, every step
//! whose former predecessors now apply after it must compensate for the
//! shifts those predecessors no longer contribute. This pass applies that
//! compensation and hands the steps back in application order.

use crate::patch::step::Patch;
use derive_new::new;
use std::cmp::Ordering;

/// A patch step tagged with where it came from (`source_index`, its position
/// in generated order) and where it is headed (`sorted_index`, its position
/// in the requested application order).
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub(crate) struct SortedPatchElement<T> {
    pub value: Patch<T>,
    pub source_index: usize,
    pub sorted_index: usize,
}

/// Corrects the index of every step for the predecessors that now apply
/// after it, then reorders the steps by `sorted_index`.
///
/// The input must arrive in generated order. A predecessor that moved past
/// the current step stops contributing its shift: a deletion that no longer
/// precedes leaves the sequence one element longer than the step was
/// generated for, an insertion one element shorter.
///
/// Panics when two steps claim the same application slot; positions in a
/// requested order are unique by construction, so a duplicate means the
/// tagging upstream is broken.
pub(crate) fn shifted_patch_elements<T>(
    mut elements: Vec<SortedPatchElement<T>>,
) -> Vec<SortedPatchElement<T>> {
    for current in 1..elements.len() {
        for predecessor in (0..current).rev() {
            match elements[predecessor]
                .sorted_index
                .cmp(&elements[current].sorted_index)
            {
                Ordering::Equal => panic!(
                    "two patch steps resolved to application slot {}",
                    elements[current].sorted_index
                ),
                Ordering::Greater => {
                    let delta = match elements[predecessor].value {
                        Patch::Deletion { .. } => 1,
                        Patch::Insertion { .. } => -1,
                    };
                    elements[current].value.shift_index(delta);
                }
                Ordering::Less => {}
            }
        }
    }

    elements.sort_by_key(|element| element.sorted_index);
    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_generated_order_passes_through_unchanged() {
        let elements = vec![
            SortedPatchElement::new(Patch::<char>::Deletion { index: 0 }, 0, 0),
            SortedPatchElement::new(
                Patch::Insertion {
                    index: 1,
                    element: 'a',
                },
                1,
                1,
            ),
        ];

        let shifted = shifted_patch_elements(elements.clone());
        assert_eq!(shifted, elements);
    }

    #[rstest]
    fn test_deletion_moved_after_insertion_extends_its_reach() {
        // Generated order deletes at 0 and then inserts at 1; applying the
        // insertion first means it lands past the still-present element.
        let elements = vec![
            SortedPatchElement::new(Patch::<char>::Deletion { index: 0 }, 0, 1),
            SortedPatchElement::new(
                Patch::Insertion {
                    index: 1,
                    element: 'a',
                },
                1,
                0,
            ),
        ];

        let shifted = shifted_patch_elements(elements);
        let values: Vec<Patch<char>> = shifted.into_iter().map(|element| element.value).collect();

        assert_eq!(
            values,
            vec![
                Patch::Insertion {
                    index: 2,
                    element: 'a'
                },
                Patch::Deletion { index: 0 },
            ]
        );
    }

    #[rstest]
    fn test_insertion_moved_after_deletion_pulls_it_back() {
        let elements = vec![
            SortedPatchElement::new(
                Patch::Insertion {
                    index: 1,
                    element: 'b',
                },
                0,
                1,
            ),
            SortedPatchElement::new(Patch::<char>::Deletion { index: 3 }, 1, 0),
        ];

        let shifted = shifted_patch_elements(elements);
        let values: Vec<Patch<char>> = shifted.into_iter().map(|element| element.value).collect();

        assert_eq!(
            values,
            vec![
                Patch::Deletion { index: 2 },
                Patch::Insertion {
                    index: 1,
                    element: 'b'
                },
            ]
        );
    }

    #[rstest]
    #[should_panic(expected = "application slot")]
    fn test_duplicate_application_slot_panics() {
        let elements = vec![
            SortedPatchElement::new(Patch::<char>::Deletion { index: 0 }, 0, 1),
            SortedPatchElement::new(Patch::<char>::Deletion { index: 1 }, 1, 1),
        ];

        shifted_patch_elements(elements);
    }
}
