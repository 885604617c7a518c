//! Set difference between two ACL snapshots.
//!
//! Algorithm:
//! 1. `added`: every element of `expected` with no equivalent in `current`
//! 2. `removed`: every element of `current` with no equivalent in `expected`
//!
//! The two scans are independent and quadratic. Per-resource ACLs are small,
//! and equivalence only holds pairwise, so there is no sorting or hashing.
//! Mutually equivalent duplicates on one side are all satisfied by a single
//! match on the other.

use crate::equivalence::Equivalent;
use crate::types::{LinkShare, Permission};

/// The grants to add and remove to move from one snapshot to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclDelta<T> {
    /// Present in `expected`, missing from `current`.
    pub added: Vec<T>,
    /// Present in `current`, missing from `expected`.
    pub removed: Vec<T>,
}

impl<T> Default for AclDelta<T> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl<T> AclDelta<T> {
    /// Check if the snapshots are equivalent.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// The delta of the reversed comparison.
    pub fn inverse(self) -> Self {
        Self {
            added: self.removed,
            removed: self.added,
        }
    }
}

impl<T: Clone> AclDelta<&T> {
    /// Clone the borrowed elements into an owned delta.
    pub fn cloned(self) -> AclDelta<T> {
        AclDelta {
            added: self.added.into_iter().cloned().collect(),
            removed: self.removed.into_iter().cloned().collect(),
        }
    }
}

/// Diff two snapshots under an arbitrary equivalence predicate.
///
/// The predicate is always called as `eq(current_item, expected_item)`.
pub fn diff_by<T, F>(current: &[T], expected: &[T], eq: F) -> AclDelta<T>
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    let added = expected
        .iter()
        .filter(|e| !current.iter().any(|c| eq(c, *e)))
        .cloned()
        .collect();

    let removed = current
        .iter()
        .filter(|c| !expected.iter().any(|e| eq(*c, e)))
        .cloned()
        .collect();

    AclDelta { added, removed }
}

/// Diff two snapshots under their [`Equivalent`] relation.
pub fn diff<T: Equivalent + Clone>(current: &[T], expected: &[T]) -> AclDelta<T> {
    diff_by(current, expected, |c, e| c.equivalent(e))
}

/// Diff two direct-grant snapshots.
pub fn diff_permissions(current: &[Permission], expected: &[Permission]) -> AclDelta<Permission> {
    diff(current, expected)
}

/// Diff two link-share snapshots.
///
/// Shares nobody has redeemed are dropped from both sides first. Restoring
/// always mints a new link, so an unredeemed share has nothing to restore.
pub fn diff_link_shares(current: &[LinkShare], expected: &[LinkShare]) -> AclDelta<LinkShare> {
    let current: Vec<&LinkShare> = current.iter().filter(|ls| ls.has_entities()).collect();
    let expected: Vec<&LinkShare> = expected.iter().filter(|ls| ls.has_entities()).collect();

    diff(&current, &expected).cloned()
}
