//! Sequence diffing and patching with move detection
//!
//! `sift` computes the difference between two sequences as the shortest
//! script of insertions and deletions, then turns that script into patches
//! a consumer can replay step by step:
//!
//! - [`diff`] / [`diff_by`] compute the plain insert/delete diff
//! - [`extended_diff`] / [`extended_diff_by`] collapse matching
//!   insertion/deletion pairs of the plain diff into moves
//! - [`nested_extended_diff`] / [`nested_extended_diff_by`] diff sequences
//!   of sections on two levels at once
//! - [`Diff::patch`] and [`ExtendedDiff::patch`] turn a diff into sequential
//!   patch steps; the `patch_ordered` variants honour a caller-chosen
//!   application order and correct every index for it
//! - [`apply`] / [`apply_extended`] replay patch steps against a sequence
//! - [`Changeset`] / [`NestedChangeset`] partition a diff for batch
//!   reconcilers
//! - [`text`] wraps the above for `&str`, one character per element
//!
//! # Examples
//!
//! ```rust
//! use sift::{apply, patch};
//!
//! let source = vec!['a', 'b', 'c', 'a', 'b', 'b', 'a'];
//! let target = vec!['c', 'b', 'a', 'b', 'a', 'c'];
//! let steps = patch(&source, &target);
//!
//! assert_eq!(apply(&source, &steps).unwrap(), target);
//! ```
//!
//! A move keeps the element's identity across the sequence instead of
//! reporting it deleted in one place and inserted in another:
//!
//! ```rust
//! use sift::{ExtendedPatch, extended_patch};
//!
//! let steps = extended_patch(&['a', 'b', 'c'], &['c', 'a', 'b']);
//!
//! assert_eq!(steps, vec![ExtendedPatch::Move { from: 2, to: 0 }]);
//! ```

pub mod changeset;
pub mod diff;
pub mod patch;
pub mod text;

pub use changeset::{Changeset, NestedChangeset};
pub use diff::extended::{ExtendedDiff, ExtendedDiffElement, extended_diff, extended_diff_by};
pub use diff::nested::{
    ItemIndex, NestedDiffElement, NestedExtendedDiff, nested_extended_diff,
    nested_extended_diff_by,
};
pub use diff::script::{Diff, DiffElement, diff, diff_by};
pub use patch::apply::{apply, apply_extended};
pub use patch::extended::{ExtendedPatch, extended_patch};
pub use patch::step::{Patch, patch};
