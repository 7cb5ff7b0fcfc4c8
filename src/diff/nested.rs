//! Two-tier diffs over sequences of sections
//!
//! The outer tier diffs the sections themselves, moves included; the inner
//! tier diffs the items of every section present on both sides, whether the
//! section stayed in place or moved. Inserted and deleted sections are
//! atomic: their items are never diffed.

use crate::diff::edit_graph::TraceType;
use crate::diff::extended::{ExtendedDiff, ExtendedDiffElement, extended_diff_by};
use crate::diff::script::{Diff, diff_path_traces};
use derive_new::new;
use std::fmt;

/// Address of one item of one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct ItemIndex {
    pub section: usize,
    pub item: usize,
}

/// One element of a nested diff. Section operations carry section indices;
/// item operations carry an item position and the section it belongs to,
/// source-side for deletions and move origins, target-side for insertions
/// and move targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestedDiffElement {
    InsertSection { at: usize },
    DeleteSection { at: usize },
    MoveSection { from: usize, to: usize },
    InsertItem { at: usize, section: usize },
    DeleteItem { at: usize, section: usize },
    MoveItem { from: ItemIndex, to: ItemIndex },
}

/// The combined change set of a two-tier diff: section operations first,
/// then the item operations of moved sections, then the item operations of
/// sections that stayed in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NestedExtendedDiff {
    pub elements: Vec<NestedDiffElement>,
}

impl NestedExtendedDiff {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NestedDiffElement> {
        self.elements.iter()
    }
}

impl<'a> IntoIterator for &'a NestedExtendedDiff {
    type Item = &'a NestedDiffElement;
    type IntoIter = std::slice::Iter<'a, NestedDiffElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl fmt::Display for NestedDiffElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NestedDiffElement::InsertSection { at } => write!(f, "IS({})", at),
            NestedDiffElement::DeleteSection { at } => write!(f, "DS({})", at),
            NestedDiffElement::MoveSection { from, to } => write!(f, "MS({},{})", from, to),
            NestedDiffElement::InsertItem { at, section } => write!(f, "I({},{})", at, section),
            NestedDiffElement::DeleteItem { at, section } => write!(f, "D({},{})", at, section),
            NestedDiffElement::MoveItem { from, to } => write!(
                f,
                "M(({},{}),({},{}))",
                from.item, from.section, to.item, to.section
            ),
        }
    }
}

/// Computes a two-tier diff of two sequences of sections, matching sections
/// and items by `PartialEq`.
pub fn nested_extended_diff<S, T>(source: &[S], target: &[S]) -> NestedExtendedDiff
where
    S: AsRef<[T]> + PartialEq,
    T: PartialEq,
{
    nested_extended_diff_by(source, target, |a, b| a == b, |a, b| a == b)
}

/// Computes a two-tier diff under caller-supplied section and item equality
/// functions.
///
/// Custom section equality is what keeps a section "the same section" when
/// its items changed; with plain value equality any edited section shows up
/// as a deletion plus an insertion instead.
pub fn nested_extended_diff_by<S, T, FS, FT>(
    source: &[S],
    target: &[S],
    is_equal_section: FS,
    is_equal_item: FT,
) -> NestedExtendedDiff
where
    S: AsRef<[T]>,
    FS: Fn(&S, &S) -> bool,
    FT: Fn(&T, &T) -> bool,
{
    let path = diff_path_traces(source, target, &is_equal_section);
    let section_diff =
        ExtendedDiff::from_diff(Diff::from_traces(&path), source, target, &is_equal_section);

    let mut elements: Vec<NestedDiffElement> = section_diff
        .iter()
        .map(|element| match *element {
            ExtendedDiffElement::Delete { at } => NestedDiffElement::DeleteSection { at },
            ExtendedDiffElement::Insert { at } => NestedDiffElement::InsertSection { at },
            ExtendedDiffElement::Move { from, to } => NestedDiffElement::MoveSection { from, to },
        })
        .collect();

    // Items of moved sections diff against the section's relocated content.
    for element in &section_diff {
        if let ExtendedDiffElement::Move { from, to } = *element {
            let inner =
                extended_diff_by(source[from].as_ref(), target[to].as_ref(), &is_equal_item);
            elements.extend(inner.iter().map(|item| match *item {
                ExtendedDiffElement::Delete { at } => NestedDiffElement::DeleteItem {
                    at,
                    section: from,
                },
                ExtendedDiffElement::Insert { at } => NestedDiffElement::InsertItem {
                    at,
                    section: to,
                },
                ExtendedDiffElement::Move {
                    from: item_from,
                    to: item_to,
                } => NestedDiffElement::MoveItem {
                    from: ItemIndex::new(from, item_from),
                    to: ItemIndex::new(to, item_to),
                },
            }));
        }
    }

    // Items of sections matched in place.
    for trace in path
        .iter()
        .filter(|trace| trace.trace_type() == TraceType::MatchPoint)
    {
        let source_section = trace.from.x;
        let target_section = trace.from.y;
        let inner = extended_diff_by(
            source[source_section].as_ref(),
            target[target_section].as_ref(),
            &is_equal_item,
        );
        elements.extend(inner.iter().map(|item| match *item {
            ExtendedDiffElement::Delete { at } => NestedDiffElement::DeleteItem {
                at,
                section: source_section,
            },
            ExtendedDiffElement::Insert { at } => NestedDiffElement::InsertItem {
                at,
                section: target_section,
            },
            ExtendedDiffElement::Move { from, to } => NestedDiffElement::MoveItem {
                from: ItemIndex::new(source_section, from),
                to: ItemIndex::new(target_section, to),
            },
        }));
    }

    NestedExtendedDiff { elements }
}
