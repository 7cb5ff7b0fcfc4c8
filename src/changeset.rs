//! Partitioned index sets for batch reconcilers
//!
//! Consumers driving a batch update (view reconcilers, collection adapters)
//! want every deletion, insertion and move grouped by kind rather than one
//! interleaved element stream. The types here partition a computed diff into
//! those groups without reinterpreting any index.

use crate::diff::extended::{ExtendedDiff, ExtendedDiffElement};
use crate::diff::nested::{ItemIndex, NestedDiffElement, NestedExtendedDiff};

/// The elements of a flat move-aware diff, partitioned by kind.
///
/// Indices are diff coordinates: source-side for deletions and move origins,
/// target-side for insertions and move targets. Consumers batch the groups
/// in this order: `deletions`, then `insertions`, then `moves`, each in the
/// order the diff produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changeset {
    pub deletions: Vec<usize>,
    pub insertions: Vec<usize>,
    pub moves: Vec<(usize, usize)>,
}

impl Changeset {
    pub fn from_diff(diff: &ExtendedDiff) -> Changeset {
        let mut changeset = Changeset::default();

        for element in diff {
            match *element {
                ExtendedDiffElement::Insert { at } => changeset.insertions.push(at),
                ExtendedDiffElement::Delete { at } => changeset.deletions.push(at),
                ExtendedDiffElement::Move { from, to } => changeset.moves.push((from, to)),
            }
        }

        changeset
    }
}

/// The elements of a two-level diff, partitioned into section and item
/// groups. The same ordering contract as [`Changeset`] applies within each
/// level, sections before items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NestedChangeset {
    pub section_deletions: Vec<usize>,
    pub section_insertions: Vec<usize>,
    pub section_moves: Vec<(usize, usize)>,
    pub item_deletions: Vec<ItemIndex>,
    pub item_insertions: Vec<ItemIndex>,
    pub item_moves: Vec<(ItemIndex, ItemIndex)>,
}

impl NestedChangeset {
    pub fn from_diff(diff: &NestedExtendedDiff) -> NestedChangeset {
        let mut changeset = NestedChangeset::default();

        for element in diff {
            match *element {
                NestedDiffElement::InsertSection { at } => {
                    changeset.section_insertions.push(at)
                }
                NestedDiffElement::DeleteSection { at } => changeset.section_deletions.push(at),
                NestedDiffElement::MoveSection { from, to } => {
                    changeset.section_moves.push((from, to))
                }
                NestedDiffElement::InsertItem { at, section } => {
                    changeset.item_insertions.push(ItemIndex::new(section, at))
                }
                NestedDiffElement::DeleteItem { at, section } => {
                    changeset.item_deletions.push(ItemIndex::new(section, at))
                }
                NestedDiffElement::MoveItem { from, to } => {
                    changeset.item_moves.push((from, to))
                }
            }
        }

        changeset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::extended::extended_diff;
    use crate::diff::nested::nested_extended_diff_by;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_changeset_partitions_by_kind() {
        let diff = extended_diff(&['a', 'b'], &['b', 'a', 'c']);
        let changeset = Changeset::from_diff(&diff);

        assert_eq!(changeset.deletions, vec![]);
        assert_eq!(changeset.insertions, vec![2]);
        assert_eq!(changeset.moves, vec![(0, 1)]);
    }

    #[rstest]
    fn test_changeset_collects_deletions() {
        let diff = extended_diff(&['a', 'b', 'c'], &['a', 'c']);
        let changeset = Changeset::from_diff(&diff);

        assert_eq!(
            changeset,
            Changeset {
                deletions: vec![1],
                ..Changeset::default()
            }
        );
    }

    #[rstest]
    fn test_changeset_of_identity_is_empty() {
        let diff = extended_diff(&[1, 2, 3], &[1, 2, 3]);

        assert_eq!(Changeset::from_diff(&diff), Changeset::default());
    }

    #[rstest]
    fn test_nested_changeset_partitions_sections_and_items() {
        let source = vec![vec![1, 2], vec![9]];
        let target = vec![vec![9], vec![1, 2, 3]];
        let diff = nested_extended_diff_by(
            &source,
            &target,
            |a: &Vec<i32>, b: &Vec<i32>| a.first() == b.first(),
            |a, b| a == b,
        );
        let changeset = NestedChangeset::from_diff(&diff);

        assert_eq!(changeset.section_moves, vec![(0, 1)]);
        assert_eq!(changeset.item_insertions, vec![ItemIndex::new(1, 2)]);
        assert_eq!(changeset.section_deletions, vec![]);
        assert_eq!(changeset.item_deletions, vec![]);
        assert_eq!(changeset.item_moves, vec![]);
    }

    #[rstest]
    fn test_nested_changeset_keeps_section_coordinates_for_items() {
        let source = vec![vec![1, 2], vec![3]];
        let target = vec![vec![1], vec![4], vec![3]];
        let diff = nested_extended_diff_by(
            &source,
            &target,
            |a: &Vec<i32>, b: &Vec<i32>| a.first() == b.first(),
            |a, b| a == b,
        );
        let changeset = NestedChangeset::from_diff(&diff);

        assert_eq!(changeset.section_insertions, vec![1]);
        assert_eq!(changeset.item_deletions, vec![ItemIndex::new(0, 1)]);
    }
}
