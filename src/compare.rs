//! Order-independent collection comparison.
//!
//! The service does not guarantee the order of list responses, so plain
//! sequence equality over responses is the wrong check. Collections are
//! compared as multisets instead: same elements, same multiplicities, any
//! order.

use std::collections::HashMap;
use std::fmt;

use crate::error::{HarnessError, HarnessResult};
use crate::model::Post;

/// The difference between two collections compared as multisets.
#[derive(Debug, Clone)]
pub struct SetDiff {
    /// Number of elements in the expected collection.
    pub expected_count: usize,
    /// Number of elements in the actual collection.
    pub actual_count: usize,
    /// Elements of the expected collection absent from the actual one,
    /// with multiplicity.
    pub missing: Vec<Post>,
    /// Elements of the actual collection absent from the expected one,
    /// with multiplicity.
    pub unexpected: Vec<Post>,
}

impl SetDiff {
    /// True when both collections held the same multiset of posts.
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

impl fmt::Display for SetDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.expected_count != self.actual_count {
            writeln!(
                f,
                "count mismatch: expected {} elements, actual {}",
                self.expected_count, self.actual_count
            )?;
        }
        if !self.missing.is_empty() {
            writeln!(f, "expected but missing from the response:")?;
            for post in &self.missing {
                writeln!(f, "  {}", post)?;
            }
        }
        if !self.unexpected.is_empty() {
            writeln!(f, "returned but not expected:")?;
            for post in &self.unexpected {
                writeln!(f, "  {}", post)?;
            }
        }
        Ok(())
    }
}

/// Computes the multiset difference between `expected` and `actual`.
pub fn diff(expected: &[Post], actual: &[Post]) -> SetDiff {
    let mut counts: HashMap<&Post, i64> = HashMap::new();
    for post in expected {
        *counts.entry(post).or_insert(0) += 1;
    }
    for post in actual {
        *counts.entry(post).or_insert(0) -= 1;
    }

    let mut missing = Vec::new();
    let mut unexpected = Vec::new();
    for (post, count) in counts {
        if count > 0 {
            for _ in 0..count {
                missing.push(post.clone());
            }
        } else {
            for _ in 0..-count {
                unexpected.push(post.clone());
            }
        }
    }
    // Hash order is not stable; sort so failure output is.
    missing.sort_by_key(|p| (p.id, p.user_id));
    unexpected.sort_by_key(|p| (p.id, p.user_id));

    SetDiff {
        expected_count: expected.len(),
        actual_count: actual.len(),
        missing,
        unexpected,
    }
}

/// Fails with a descriptive [`HarnessError::Mismatch`] when the two
/// collections do not hold the same multiset of posts.
pub fn assert_same_elements(
    expected: &[Post],
    actual: &[Post],
    message: &str,
) -> HarnessResult<()> {
    let diff = diff(expected, actual);
    if diff.is_empty() {
        Ok(())
    } else {
        Err(HarnessError::Mismatch {
            message: message.to_string(),
            diff,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(user_id: u64, id: u64) -> Post {
        Post::new(user_id, id, format!("title {id}"), format!("body {id}"))
    }

    #[test]
    fn test_equal_singletons_compare_equal() {
        let a = vec![Post::new(1, 1, "a", "b")];
        let b = vec![Post::new(1, 1, "a", "b")];
        assert!(assert_same_elements(&a, &b, "singleton").is_ok());
    }

    #[test]
    fn test_order_does_not_matter() {
        let expected = vec![post(1, 1), post(1, 2), post(2, 3)];
        let actual = vec![post(2, 3), post(1, 1), post(1, 2)];
        assert!(assert_same_elements(&expected, &actual, "reordered").is_ok());
    }

    #[test]
    fn test_empty_collections_compare_equal() {
        assert!(assert_same_elements(&[], &[], "empty").is_ok());
    }

    #[test]
    fn test_count_mismatch_is_reported() {
        let expected = vec![Post::new(1, 1, "a", "b")];
        let err = assert_same_elements(&expected, &[], "against empty").unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("against empty"), "got: {rendered}");
        assert!(
            rendered.contains("count mismatch: expected 1 elements, actual 0"),
            "got: {rendered}"
        );
    }

    #[test]
    fn test_missing_and_unexpected_are_enumerated() {
        let expected = vec![post(1, 1), post(1, 2)];
        let actual = vec![post(1, 2), post(9, 99)];
        let d = diff(&expected, &actual);
        assert_eq!(d.missing, vec![post(1, 1)]);
        assert_eq!(d.unexpected, vec![post(9, 99)]);

        let rendered = d.to_string();
        assert!(rendered.contains("expected but missing from the response:"));
        assert!(rendered.contains("returned but not expected:"));
    }

    #[test]
    fn test_multiplicity_is_respected() {
        let expected = vec![post(1, 1), post(1, 1)];
        let actual = vec![post(1, 1)];
        let d = diff(&expected, &actual);
        assert_eq!(d.missing, vec![post(1, 1)]);
        assert!(d.unexpected.is_empty());
        assert!(!d.is_empty());
    }

    #[test]
    fn test_equal_multisets_with_duplicates() {
        let expected = vec![post(1, 1), post(1, 1), post(2, 2)];
        let actual = vec![post(2, 2), post(1, 1), post(1, 1)];
        assert!(diff(&expected, &actual).is_empty());
    }
}
