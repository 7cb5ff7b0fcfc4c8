//! Replaying patches against a sequence
//!
//! Each step is checked against the current length of the working copy
//! before it mutates anything, so a patch generated for a different source
//! fails with an error instead of panicking.

use crate::patch::extended::ExtendedPatch;
use crate::patch::step::Patch;
use anyhow::Result;

/// Applies sequential patch steps to a copy of `source`.
///
/// # Examples
///
/// ```rust
/// use sift::{apply, patch};
///
/// let source = vec!['a', 'b', 'c'];
/// let target = vec!['a', 'c'];
/// let steps = patch(&source, &target);
///
/// assert_eq!(apply(&source, &steps).unwrap(), target);
/// ```
pub fn apply<T: Clone>(source: &[T], patch: &[Patch<T>]) -> Result<Vec<T>> {
    let mut result: Vec<T> = source.to_vec();

    for step in patch {
        match step {
            Patch::Insertion { index, element } => {
                if *index > result.len() {
                    anyhow::bail!(
                        "insertion index {} is past the end of a sequence of length {}",
                        index,
                        result.len()
                    );
                }
                result.insert(*index, element.clone());
            }
            Patch::Deletion { index } => {
                if *index >= result.len() {
                    anyhow::bail!(
                        "deletion index {} is out of bounds for a sequence of length {}",
                        index,
                        result.len()
                    );
                }
                result.remove(*index);
            }
        }
    }

    Ok(result)
}

/// Applies move-aware patch steps to a copy of `source`. A move removes
/// the origin element first and reinserts it, so its destination index is
/// checked against the shortened sequence.
pub fn apply_extended<T: Clone>(source: &[T], patch: &[ExtendedPatch<T>]) -> Result<Vec<T>> {
    let mut result: Vec<T> = source.to_vec();

    for step in patch {
        match step {
            ExtendedPatch::Insertion { index, element } => {
                if *index > result.len() {
                    anyhow::bail!(
                        "insertion index {} is past the end of a sequence of length {}",
                        index,
                        result.len()
                    );
                }
                result.insert(*index, element.clone());
            }
            ExtendedPatch::Deletion { index } => {
                if *index >= result.len() {
                    anyhow::bail!(
                        "deletion index {} is out of bounds for a sequence of length {}",
                        index,
                        result.len()
                    );
                }
                result.remove(*index);
            }
            ExtendedPatch::Move { from, to } => {
                if *from >= result.len() {
                    anyhow::bail!(
                        "move origin {} is out of bounds for a sequence of length {}",
                        from,
                        result.len()
                    );
                }
                let element = result.remove(*from);
                if *to > result.len() {
                    anyhow::bail!(
                        "move destination {} is past the end of a sequence of length {}",
                        to,
                        result.len()
                    );
                }
                result.insert(*to, element);
            }
        }
    }

    Ok(result)
}
