//! Verification of a restored ACL against its snapshot.

use std::collections::BTreeSet;

use acl_reconcile_core::{diff, diff_by, AclDelta, EntityType, Equivalent, LinkShare, Permission};

/// Outcome of comparing a restored ACL with the captured one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport<T> {
    /// Captured grants with no equivalent on the restored item.
    pub missing: Vec<T>,
    /// Restored grants with no equivalent in the capture.
    pub unexpected: Vec<T>,
}

impl<T> VerificationReport<T> {
    /// Check if the restored ACL matches.
    pub fn is_match(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

impl<T> From<AclDelta<T>> for VerificationReport<T> {
    fn from(delta: AclDelta<T>) -> Self {
        Self {
            missing: delta.added,
            unexpected: delta.removed,
        }
    }
}

fn verify<T: Equivalent + Clone>(restored: &[T], expected: &[T]) -> VerificationReport<T> {
    diff(restored, expected).into()
}

/// Compare restored direct grants with the captured ones, ignoring order.
pub fn verify_permissions(
    restored: &[Permission],
    expected: &[Permission],
) -> VerificationReport<Permission> {
    verify(restored, expected)
}

/// Compare restored link shares with the captured ones.
///
/// A restore always mints a new link, so the URL never carries over. Shares
/// match on link type, scope, password flag, role set and the principals
/// that redeemed them. Unredeemed shares are ignored on both sides.
pub fn verify_link_shares(
    restored: &[LinkShare],
    expected: &[LinkShare],
) -> VerificationReport<LinkShare> {
    let restored: Vec<&LinkShare> = restored.iter().filter(|ls| ls.has_entities()).collect();
    let expected: Vec<&LinkShare> = expected.iter().filter(|ls| ls.has_entities()).collect();

    diff_by(&restored, &expected, |r, e| same_restored_share(r, e))
        .cloned()
        .into()
}

fn same_restored_share(restored: &LinkShare, expected: &LinkShare) -> bool {
    restored.link.link_type == expected.link.link_type
        && restored.link.scope == expected.link.scope
        && restored.has_password == expected.has_password
        && role_set(restored) == role_set(expected)
        && principals(restored) == principals(expected)
}

fn role_set(share: &LinkShare) -> BTreeSet<&str> {
    share.roles.iter().map(|role| role.as_str()).collect()
}

/// Redeeming principals by ID, or by email when the ID is unknown.
fn principals(share: &LinkShare) -> BTreeSet<(EntityType, &str)> {
    share
        .entities
        .iter()
        .filter_map(|entity| {
            let key = entity.id.as_deref().or(entity.email.as_deref())?;
            Some((entity.entity_type, key))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use acl_reconcile_core::{Entity, LinkShareLink, Role};

    fn perm(id: &str, roles: Vec<Role>, entity_id: &str) -> Permission {
        Permission {
            id: id.into(),
            roles,
            entity_id: Some(entity_id.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_reordered_restore_matches() {
        let captured = vec![
            perm("p1", vec![Role::Read, Role::Write], "u1"),
            perm("p2", vec![Role::Read], "u2"),
        ];
        // New grant IDs and role order on the restored item.
        let restored = vec![
            perm("n2", vec![Role::Read], "u2"),
            perm("n1", vec![Role::Write, Role::Read], "u1"),
        ];

        assert!(verify_permissions(&restored, &captured).is_match());
    }

    fn link(url: &str, entity_ids: &[&str]) -> LinkShare {
        LinkShare {
            id: url.into(),
            link: LinkShareLink {
                scope: "users".into(),
                link_type: "view".into(),
                web_url: url.into(),
                prevents_download: false,
            },
            roles: vec![Role::Read],
            entities: entity_ids
                .iter()
                .map(|id| Entity {
                    id: Some(id.to_string()),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_restored_link_matches_under_new_url() {
        let captured = vec![link("https://captured-secret", &["user-id2"])];
        let restored = vec![link("https://restored-new-secret", &["user-id2"])];

        let report = verify_link_shares(&restored, &captured);

        assert!(report.is_match(), "{report:?}");
    }

    #[test]
    fn test_link_share_mismatches() {
        let captured = vec![link("https://captured", &["u1", "u2"])];

        let fewer = vec![link("https://restored", &["u1"])];
        let edit = vec![LinkShare {
            link: LinkShareLink {
                link_type: "edit".into(),
                ..link("https://restored", &[]).link
            },
            ..link("https://restored", &["u1", "u2"])
        }];
        let locked = vec![LinkShare {
            has_password: true,
            ..link("https://restored", &["u2", "u1"])
        }];

        for restored in [fewer, edit, locked] {
            let report = verify_link_shares(&restored, &captured);
            assert_eq!(report.missing, captured);
            assert_eq!(report.unexpected, restored);
        }
    }

    #[test]
    fn test_unredeemed_links_ignored_in_verification() {
        let captured = vec![link("https://captured", &[])];

        assert!(verify_link_shares(&[], &captured).is_match());
    }

    #[test]
    fn test_reports_missing_and_unexpected() {
        let captured = vec![perm("p1", vec![Role::Read], "u1")];
        let restored = vec![perm("n1", vec![Role::Write], "u1")];

        let report = verify_permissions(&restored, &captured);

        assert!(!report.is_match());
        assert_eq!(report.missing, captured);
        assert_eq!(report.unexpected, restored);
    }
}
