//! The Reconciler: one entry point over normalization, diffing and planning.

use std::collections::HashMap;

use acl_reconcile_core::{
    diff_link_shares, diff_permissions, filter_link_shares, filter_permissions,
    parse_permissions, AclDelta, LinkShare, Permission, RawPermission,
};
use acl_reconcile_restore::{
    plan_restore, previous_link_shares, previous_metadata, AvailableEntities, Metadata,
    RestoreConfig, RestorePlan,
};

use crate::error::Result;

/// Configuration for the Reconciler.
#[derive(Debug, Clone, Default)]
pub struct ReconcileConfig {
    /// Restore planning configuration.
    pub restore: RestoreConfig,
}

/// The canonical ACL of one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedAcl {
    pub permissions: Vec<Permission>,
    pub link_shares: Vec<LinkShare>,
}

/// Changes between two snapshots of one item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDelta {
    pub permissions: AclDelta<Permission>,
    pub link_shares: AclDelta<LinkShare>,
}

impl ItemDelta {
    /// Check if the item's ACL is unchanged.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty() && self.link_shares.is_empty()
    }
}

/// Stateless front end to the reconciliation engine.
///
/// Holds only configuration, so a single instance can be shared across
/// workers.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    config: ReconcileConfig,
}

impl Reconciler {
    /// Create a new reconciler.
    pub fn new(config: ReconcileConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Normalization
    // ─────────────────────────────────────────────────────────────────────────

    /// Normalize raw provider records.
    pub fn normalize(&self, records: &[RawPermission]) -> NormalizedAcl {
        NormalizedAcl {
            permissions: filter_permissions(records),
            link_shares: filter_link_shares(records),
        }
    }

    /// Decode and normalize a provider permission listing.
    pub fn normalize_payload(&self, payload: &[u8]) -> Result<NormalizedAcl> {
        let records = parse_permissions(payload)?;
        Ok(self.normalize(&records))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Diffing
    // ─────────────────────────────────────────────────────────────────────────

    /// Compare two snapshots of the same item.
    ///
    /// `added` holds what `current` has and `previous` lacks.
    pub fn delta(&self, previous: &NormalizedAcl, current: &NormalizedAcl) -> ItemDelta {
        ItemDelta {
            permissions: diff_permissions(&previous.permissions, &current.permissions),
            link_shares: diff_link_shares(&previous.link_shares, &current.link_shares),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Restore
    // ─────────────────────────────────────────────────────────────────────────

    /// Plan the restore of one item's ACL.
    ///
    /// `ancestors` maps every parent folder of `item_path` (relative to the
    /// drive root) to its metadata. Items that inherit their ACL do not
    /// consult it. `available` lists the users and groups that still exist;
    /// without it every principal is assumed to.
    pub fn plan_item(
        &self,
        item_path: &str,
        current: &Metadata,
        ancestors: &HashMap<String, Metadata>,
        available: Option<&AvailableEntities>,
    ) -> Result<RestorePlan> {
        if !self.config.restore.restore_permissions || !current.is_custom() {
            return Ok(RestorePlan::default());
        }

        let previous = previous_metadata(item_path, ancestors)?;
        let previous_shares = previous_link_shares(item_path, ancestors)?;

        let plan = plan_restore(
            current,
            &previous.permissions,
            &previous_shares,
            available,
            &self.config.restore,
        );

        tracing::debug!(
            item = item_path,
            link_shares = plan.link_shares.len(),
            revocations = plan.revocations.len(),
            grants = plan.grants.len(),
            skipped = plan.skipped.len(),
            resets_inheritance = plan.resets_inheritance,
            "planned permission restore"
        );

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acl_reconcile_core::Role;
    use acl_reconcile_restore::RestoreError;

    use crate::error::ReconcileError;

    fn perm(id: &str, role: Role, entity_id: &str) -> Permission {
        Permission {
            id: id.into(),
            roles: vec![role],
            entity_id: Some(entity_id.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_inherited_item_skips_ancestor_lookup() {
        let reconciler = Reconciler::default();

        let plan = reconciler
            .plan_item("a/b/file", &Metadata::inherited(), &HashMap::new(), None)
            .unwrap();

        assert!(plan.is_empty());
    }

    #[test]
    fn test_missing_ancestor_surfaces() {
        let reconciler = Reconciler::default();
        let current = Metadata::custom(vec![perm("p1", Role::Read, "u1")], vec![]);

        let err = reconciler
            .plan_item("a/b/file", &current, &HashMap::new(), None)
            .unwrap_err();

        assert!(matches!(
            err,
            ReconcileError::Restore(RestoreError::MissingAncestor { .. })
        ));
    }

    #[test]
    fn test_plan_against_custom_parent() {
        let reconciler = Reconciler::default();
        let ancestors: HashMap<String, Metadata> = [
            ("a".to_string(), Metadata::inherited()),
            (
                "a/b".to_string(),
                Metadata::custom(vec![perm("p0", Role::Write, "u0")], vec![]),
            ),
        ]
        .into_iter()
        .collect();
        let current = Metadata::custom(
            vec![perm("p0", Role::Write, "u0"), perm("p1", Role::Read, "u1")],
            vec![],
        );

        let plan = reconciler
            .plan_item("a/b/file", &current, &ancestors, None)
            .unwrap();

        assert!(plan.revocations.is_empty());
        assert_eq!(plan.grants.len(), 1);
        assert_eq!(plan.grants[0].previous_id, "p1");
    }

    #[test]
    fn test_delta_between_snapshots() {
        let reconciler = Reconciler::default();
        let previous = NormalizedAcl {
            permissions: vec![perm("p0", Role::Write, "u0")],
            link_shares: vec![],
        };
        let current = NormalizedAcl {
            permissions: vec![perm("p0", Role::Read, "u0")],
            link_shares: vec![],
        };

        let delta = reconciler.delta(&previous, &current);

        assert_eq!(delta.permissions.added, current.permissions);
        assert_eq!(delta.permissions.removed, previous.permissions);
        assert!(reconciler.delta(&current, &current).is_empty());
    }
}
