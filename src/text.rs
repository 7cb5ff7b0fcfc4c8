//! Character-level conveniences for string diffing
//!
//! Wrappers that view a `&str` as its character sequence. Equal strings are
//! recognised before the edit-graph search runs, so diffing two references
//! to the same text costs one comparison.

use crate::diff::extended::ExtendedDiff;
use crate::diff::script::Diff;
use crate::patch::extended::ExtendedPatch;
use crate::patch::step::Patch;
use anyhow::Result;

/// Computes the character diff between two strings.
///
/// # Examples
///
/// ```rust
/// use sift::text;
///
/// assert_eq!(text::diff("abcabba", "cbabac").len(), 5);
/// assert!(text::diff("same", "same").is_empty());
/// ```
pub fn diff(source: &str, target: &str) -> Diff {
    if source == target {
        return Diff::default();
    }

    let source: Vec<char> = source.chars().collect();
    let target: Vec<char> = target.chars().collect();
    crate::diff::script::diff(&source, &target)
}

/// Computes the character diff between two strings, with insertion/deletion
/// pairs of the same character collapsed into moves.
pub fn extended_diff(source: &str, target: &str) -> ExtendedDiff {
    if source == target {
        return crate::diff::extended::extended_diff::<char>(&[], &[]);
    }

    let source: Vec<char> = source.chars().collect();
    let target: Vec<char> = target.chars().collect();
    crate::diff::extended::extended_diff(&source, &target)
}

/// Applies character patch steps to a string.
pub fn apply(text: &str, patch: &[Patch<char>]) -> Result<String> {
    let chars: Vec<char> = text.chars().collect();
    let patched = crate::patch::apply::apply(&chars, patch)?;
    Ok(patched.into_iter().collect())
}

/// Applies move-aware character patch steps to a string.
pub fn apply_extended(text: &str, patch: &[ExtendedPatch<char>]) -> Result<String> {
    let chars: Vec<char> = text.chars().collect();
    let patched = crate::patch::apply::apply_extended(&chars, patch)?;
    Ok(patched.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::extended::ExtendedDiffElement;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_diff_counts_edits_between_strings() {
        assert_eq!(diff("abcabba", "cbabac").len(), 5);
    }

    #[rstest]
    fn test_equal_strings_short_circuit_to_an_empty_diff() {
        assert!(diff("same", "same").is_empty());
        assert!(extended_diff("same", "same").is_empty());
    }

    #[rstest]
    fn test_diff_operates_on_characters_not_bytes() {
        let result = diff("héllo", "hello");

        assert_eq!(result.len(), 2);
    }

    #[rstest]
    fn test_extended_diff_detects_character_moves() {
        let result = extended_diff("abc", "cab");
        let elements: Vec<ExtendedDiffElement> = result.iter().copied().collect();

        assert_eq!(elements, vec![ExtendedDiffElement::Move { from: 2, to: 0 }]);
    }

    #[rstest]
    fn test_apply_round_trips_a_generated_patch() {
        let target: Vec<char> = "cbabac".chars().collect();
        let steps = diff("abcabba", "cbabac").patch(&target);

        assert_eq!(apply("abcabba", &steps).unwrap(), "cbabac");
    }

    #[rstest]
    fn test_apply_extended_round_trips_moves() {
        let target: Vec<char> = "cab".chars().collect();
        let steps = extended_diff("abc", "cab").patch(&target);

        assert_eq!(apply_extended("abc", &steps).unwrap(), "cab");
    }

    #[rstest]
    fn test_apply_rejects_steps_that_do_not_fit() {
        let steps = vec![Patch::<char>::Deletion { index: 10 }];

        assert!(apply("ab", &steps).is_err());
    }
}
