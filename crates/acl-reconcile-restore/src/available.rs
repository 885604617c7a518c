//! Principals that can still receive a grant.
//!
//! Users and groups deleted since the backup cannot be invited again, so
//! their grants are dropped before planning. Only users and groups are
//! tracked; every other kind passes through.

use std::collections::HashSet;

use acl_reconcile_core::{Entity, EntityType, LinkShare, Permission};

/// The users and groups that exist in the tenant at restore time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableEntities {
    /// User object IDs.
    pub users: HashSet<String>,
    /// Group object IDs.
    pub groups: HashSet<String>,
}

impl AvailableEntities {
    pub fn new<U, G>(users: U, groups: G) -> Self
    where
        U: IntoIterator,
        U::Item: Into<String>,
        G: IntoIterator,
        G::Item: Into<String>,
    {
        Self {
            users: users.into_iter().map(Into::into).collect(),
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a principal can be granted access.
    ///
    /// Principals without an object ID cannot be looked up and are kept.
    pub fn contains(&self, entity_type: EntityType, id: Option<&str>) -> bool {
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            return true;
        };

        match entity_type {
            EntityType::User => self.users.contains(id),
            EntityType::Group => self.groups.contains(id),
            EntityType::SiteUser
            | EntityType::SiteGroup
            | EntityType::Application
            | EntityType::Device => true,
        }
    }

    fn contains_entity(&self, entity: &Entity) -> bool {
        self.contains(entity.entity_type, entity.id.as_deref())
    }
}

/// Records that survived an availability filter, and the IDs of those that
/// did not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Available<T> {
    pub kept: Vec<T>,
    pub skipped: Vec<String>,
}

/// Drop direct grants whose principal no longer exists.
pub fn filter_unavailable_permissions(
    permissions: &[Permission],
    available: &AvailableEntities,
) -> Available<Permission> {
    let mut kept = Vec::with_capacity(permissions.len());
    let mut skipped = Vec::new();

    for perm in permissions {
        if available.contains(perm.entity_type, perm.entity_id.as_deref()) {
            kept.push(perm.clone());
        } else {
            tracing::debug!(
                permission_id = %perm.id,
                entity_type = %perm.entity_type,
                "skipping permission for unavailable principal"
            );
            skipped.push(perm.id.clone());
        }
    }

    Available { kept, skipped }
}

/// Drop unavailable principals from link shares.
///
/// A share that loses every principal is dropped. A share nobody redeemed
/// is kept as is.
pub fn filter_unavailable_link_shares(
    link_shares: &[LinkShare],
    available: &AvailableEntities,
) -> Available<LinkShare> {
    let mut kept = Vec::with_capacity(link_shares.len());
    let mut skipped = Vec::new();

    for share in link_shares {
        let entities: Vec<Entity> = share
            .entities
            .iter()
            .filter(|entity| available.contains_entity(entity))
            .cloned()
            .collect();

        if share.has_entities() && entities.is_empty() {
            tracing::debug!(
                link_share_id = %share.id,
                "skipping link share with no available principal"
            );
            skipped.push(share.id.clone());
            continue;
        }

        kept.push(LinkShare {
            entities,
            ..share.clone()
        });
    }

    Available { kept, skipped }
}
