//! ACL equivalence: when two grants describe the same access.

use crate::types::{present, LinkShare, Permission, Role};

/// An equality relation that ignores record identity and ordering.
///
/// Unlike `PartialEq` this is not structural. It only needs to hold
/// pairwise; the diff engine does not rely on transitivity.
pub trait Equivalent {
    fn equivalent(&self, other: &Self) -> bool;
}

impl<T: Equivalent + ?Sized> Equivalent for &T {
    fn equivalent(&self, other: &Self) -> bool {
        (**self).equivalent(*other)
    }
}

impl Equivalent for Permission {
    /// Same entity type, same principal, same role set.
    ///
    /// The principal is compared by entity ID when both sides have one and
    /// by email when neither does. A grant identified by ID never matches
    /// one identified only by email.
    fn equivalent(&self, other: &Self) -> bool {
        if self.entity_type != other.entity_type {
            return false;
        }

        match (present(&self.entity_id), present(&other.entity_id)) {
            (Some(a), Some(b)) => {
                if a != b {
                    return false;
                }
            }
            (None, None) => {
                if let (Some(a), Some(b)) = (present(&self.email), present(&other.email)) {
                    if a != b {
                        return false;
                    }
                }
            }
            _ => return false,
        }

        same_roles(&self.roles, &other.roles)
    }
}

impl Equivalent for LinkShare {
    /// Link shares are the same grant when they point at the same URL.
    fn equivalent(&self, other: &Self) -> bool {
        self.link.web_url == other.link.web_url
    }
}

fn same_roles(a: &[Role], b: &[Role]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort();
    b.sort();

    a == b
}
