//! Restore planning.
//!
//! Turns the permission and link-share deltas of an item into the ordered
//! actions an orchestrator performs against the provider. Nothing here
//! talks to the provider; the orchestrator owns execution and the mapping
//! from previous grant IDs to the IDs the provider hands back.
//!
//! Planning order:
//! 1. Drop grants to principals that no longer exist, when availability is known
//! 2. Link shares, since creating one can reset inherited grants
//! 3. Permission revocations
//! 4. Permission grants

use acl_reconcile_core::{
    diff_link_shares, diff_permissions, EntityType, LinkShare, Permission, Role,
};
use chrono::{DateTime, Utc};

use crate::available::{
    filter_unavailable_link_shares, filter_unavailable_permissions, AvailableEntities,
};
use crate::config::RestoreConfig;
use crate::metadata::{Metadata, SharingMode};

/// Who a recreated grant is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// Provider object ID.
    ObjectId(String),
    /// Older snapshots only recorded an email.
    Email(String),
}

/// A direct grant to recreate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGrant {
    /// ID of the grant in the snapshot.
    pub previous_id: String,
    pub roles: Vec<Role>,
    pub recipient: Recipient,
    pub entity_type: EntityType,
    pub expiration: Option<DateTime<Utc>>,
    pub send_invitation: bool,
    pub require_sign_in: bool,
}

/// A direct grant to delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRevocation {
    /// ID of the grant in the snapshot; the orchestrator maps it to the live ID.
    pub previous_id: String,
    pub entity_type: EntityType,
}

/// A sharing link to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkShareRequest {
    /// ID of the link share in the snapshot. Empty for the placeholder.
    pub previous_id: String,
    pub link_type: String,
    pub scope: String,
    pub expiration: Option<DateTime<Utc>>,
    /// Object IDs of the principals to share with.
    pub recipients: Vec<String>,
    /// Whether inherited grants survive the creation. Only the first
    /// request on an item may carry it.
    pub retain_inherited: Option<bool>,
}

impl LinkShareRequest {
    /// A recipient-less `users` link that drops every inherited link share
    /// when created. The orchestrator deletes it right after.
    pub fn placeholder() -> Self {
        Self {
            previous_id: String::new(),
            link_type: "view".to_string(),
            scope: "users".to_string(),
            expiration: None,
            recipients: Vec::new(),
            retain_inherited: Some(false),
        }
    }
}

/// The actions needed to bring one item's ACL to its snapshot state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestorePlan {
    pub link_shares: Vec<LinkShareRequest>,
    /// Create-then-delete link that clears inherited link shares.
    pub placeholder_reset: Option<LinkShareRequest>,
    /// Whether the link-share actions drop inherited grants.
    pub resets_inheritance: bool,
    pub revocations: Vec<PermissionRevocation>,
    pub grants: Vec<PermissionGrant>,
    /// Snapshot IDs of grants and link shares dropped because their
    /// principals no longer exist. Not an action.
    pub skipped: Vec<String>,
}

impl RestorePlan {
    /// Check if the plan has nothing to do.
    pub fn is_empty(&self) -> bool {
        self.link_shares.is_empty()
            && self.placeholder_reset.is_none()
            && self.revocations.is_empty()
            && self.grants.is_empty()
    }
}

/// Plan the restore of one item.
///
/// `previous_permissions` and `previous_link_shares` are what the item
/// inherits before its own ACL is applied. With `available` set, the item's
/// grants to deleted users and groups are dropped first.
pub fn plan_restore(
    current: &Metadata,
    previous_permissions: &[Permission],
    previous_link_shares: &[LinkShare],
    available: Option<&AvailableEntities>,
    config: &RestoreConfig,
) -> RestorePlan {
    if !config.restore_permissions || current.sharing_mode == SharingMode::Inherited {
        return RestorePlan::default();
    }

    let mut plan = RestorePlan::default();

    let (permissions, link_shares) = match available {
        Some(available) => {
            let perms = filter_unavailable_permissions(&current.permissions, available);
            let shares = filter_unavailable_link_shares(&current.link_shares, available);

            plan.skipped.extend(perms.skipped);
            plan.skipped.extend(shares.skipped);
            (perms.kept, shares.kept)
        }
        None => (current.permissions.clone(), current.link_shares.clone()),
    };

    let ls_delta = diff_link_shares(previous_link_shares, &link_shares);

    for share in &ls_delta.added {
        let Some(mut request) = link_share_request(share, config) else {
            continue;
        };

        if plan.link_shares.is_empty() {
            request.retain_inherited = Some(ls_delta.removed.is_empty());
        }

        plan.link_shares.push(request);
    }

    if !ls_delta.removed.is_empty() && ls_delta.added.is_empty() {
        plan.placeholder_reset = Some(LinkShareRequest::placeholder());
    }

    plan.resets_inheritance = !plan.link_shares.is_empty() || plan.placeholder_reset.is_some();

    let mut perm_delta = diff_permissions(previous_permissions, &permissions);

    if plan.resets_inheritance {
        tracing::debug!("link share creation resets inherited permissions");
        perm_delta.removed.clear();
        perm_delta.added = permissions;
    }

    plan.revocations = perm_delta
        .removed
        .iter()
        .map(|p| PermissionRevocation {
            previous_id: p.id.clone(),
            entity_type: p.entity_type,
        })
        .collect();

    plan.grants = perm_delta
        .added
        .iter()
        .filter_map(|p| permission_grant(p, config))
        .collect();

    plan
}

fn link_share_request(share: &LinkShare, config: &RestoreConfig) -> Option<LinkShareRequest> {
    // The password is never returned by the provider, so the link cannot
    // be reproduced.
    if share.has_password {
        tracing::debug!(link_share_id = %share.id, "skipping password protected link share");
        return None;
    }

    let recipients = share
        .entities
        .iter()
        .filter(|entity| {
            !(config.skip_site_groups && entity.entity_type == EntityType::SiteGroup)
        })
        .filter_map(|entity| entity.id.clone().filter(|id| !id.is_empty()))
        .collect();

    Some(LinkShareRequest {
        previous_id: share.id.clone(),
        link_type: share.link.link_type.clone(),
        scope: share.link.scope.clone(),
        expiration: share.expiration,
        recipients,
        retain_inherited: None,
    })
}

fn permission_grant(perm: &Permission, config: &RestoreConfig) -> Option<PermissionGrant> {
    // Owner cannot be granted through an invitation.
    let roles: Vec<Role> = perm
        .roles
        .iter()
        .filter(|role| **role != Role::Owner)
        .cloned()
        .collect();

    if roles.is_empty() {
        tracing::debug!(permission_id = %perm.id, "skipping permission without grantable roles");
        return None;
    }

    if config.skip_site_groups && perm.entity_type == EntityType::SiteGroup {
        tracing::debug!(permission_id = %perm.id, "skipping site group permission");
        return None;
    }

    let entity_id = perm.entity_id.as_deref().filter(|id| !id.is_empty());
    let email = perm.email.as_deref().filter(|email| !email.is_empty());

    let recipient = match (entity_id, email) {
        (Some(id), _) => Recipient::ObjectId(id.to_string()),
        (None, Some(email)) => Recipient::Email(email.to_string()),
        (None, None) => {
            tracing::debug!(permission_id = %perm.id, "skipping permission without principal");
            return None;
        }
    };

    Some(PermissionGrant {
        previous_id: perm.id.clone(),
        roles,
        recipient,
        entity_type: perm.entity_type,
        expiration: perm.expiration,
        send_invitation: config.send_invitation,
        require_sign_in: config.require_sign_in,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use acl_reconcile_core::{Entity, LinkShareLink};

    fn perm(id: &str, roles: &[Role], entity_id: &str) -> Permission {
        Permission {
            id: id.into(),
            roles: roles.to_vec(),
            entity_id: Some(entity_id.into()),
            ..Default::default()
        }
    }

    fn share(id: &str, entity_ids: &[&str]) -> LinkShare {
        LinkShare {
            id: id.into(),
            link: LinkShareLink {
                scope: "users".into(),
                link_type: "edit".into(),
                web_url: format!("https://{id}"),
                prevents_download: false,
            },
            roles: vec![Role::Write],
            entities: entity_ids
                .iter()
                .map(|e| Entity {
                    id: Some(e.to_string()),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_inherited_item_has_empty_plan() {
        let current = Metadata {
            permissions: vec![perm("p1", &[Role::Read], "u1")],
            ..Metadata::inherited()
        };

        let plan = plan_restore(&current, &[], &[], None, &RestoreConfig::default());
        assert!(plan.is_empty());
    }

    #[test]
    fn test_restore_disabled() {
        let current = Metadata::custom(vec![perm("p1", &[Role::Read], "u1")], vec![]);
        let config = RestoreConfig {
            restore_permissions: false,
            ..Default::default()
        };

        assert!(plan_restore(&current, &[], &[], None, &config).is_empty());
    }

    #[test]
    fn test_grants_and_revocations() {
        let previous = vec![perm("p0", &[Role::Write], "u0"), perm("p1", &[Role::Read], "u1")];
        let current = Metadata::custom(
            vec![perm("p1", &[Role::Read], "u1"), perm("p2", &[Role::Read, Role::Write], "u2")],
            vec![],
        );

        let plan = plan_restore(&current, &previous, &[], None, &RestoreConfig::default());

        assert!(!plan.resets_inheritance);
        assert_eq!(
            plan.revocations,
            vec![PermissionRevocation {
                previous_id: "p0".into(),
                entity_type: EntityType::User,
            }]
        );
        assert_eq!(plan.grants.len(), 1);
        assert_eq!(plan.grants[0].previous_id, "p2");
        assert_eq!(plan.grants[0].recipient, Recipient::ObjectId("u2".into()));
        assert!(!plan.grants[0].send_invitation);
        assert!(plan.grants[0].require_sign_in);
    }

    #[test]
    fn test_owner_role_stripped() {
        let current = Metadata::custom(
            vec![
                perm("p1", &[Role::Owner], "u1"),
                perm("p2", &[Role::Owner, Role::Read], "u2"),
                perm("p3", &[], "u3"),
            ],
            vec![],
        );

        let plan = plan_restore(&current, &[], &[], None, &RestoreConfig::default());

        assert_eq!(plan.grants.len(), 1);
        assert_eq!(plan.grants[0].previous_id, "p2");
        assert_eq!(plan.grants[0].roles, vec![Role::Read]);
    }

    #[test]
    fn test_site_groups_and_email_fallback() {
        let site_group = Permission {
            entity_type: EntityType::SiteGroup,
            ..perm("p1", &[Role::Read], "4")
        };
        let legacy = Permission {
            id: "p2".into(),
            roles: vec![Role::Read],
            email: Some("legacy@provider.com".into()),
            ..Default::default()
        };
        let current = Metadata::custom(vec![site_group.clone(), legacy], vec![]);

        let plan = plan_restore(&current, &[], &[], None, &RestoreConfig::default());
        assert_eq!(plan.grants.len(), 1);
        assert_eq!(
            plan.grants[0].recipient,
            Recipient::Email("legacy@provider.com".into())
        );

        let config = RestoreConfig {
            skip_site_groups: false,
            ..Default::default()
        };
        let plan = plan_restore(&current, &[], &[], None, &config);
        assert_eq!(plan.grants.len(), 2);
        assert_eq!(plan.grants[0].entity_type, EntityType::SiteGroup);
    }

    #[test]
    fn test_first_link_carries_retain_flag() {
        let current = Metadata::custom(vec![], vec![share("l1", &["u1"]), share("l2", &["u2"])]);

        let plan = plan_restore(&current, &[], &[], None, &RestoreConfig::default());

        assert_eq!(plan.link_shares.len(), 2);
        assert_eq!(plan.link_shares[0].retain_inherited, Some(true));
        assert_eq!(plan.link_shares[1].retain_inherited, None);
        assert_eq!(plan.link_shares[0].recipients, vec!["u1".to_string()]);
        assert!(plan.placeholder_reset.is_none());
        assert!(plan.resets_inheritance);
    }

    #[test]
    fn test_removed_links_drop_inherited() {
        let inherited = vec![share("l0", &["u0"])];
        let current = Metadata::custom(vec![], vec![share("l1", &["u1"])]);

        let plan = plan_restore(&current, &[], &inherited, None, &RestoreConfig::default());

        assert_eq!(plan.link_shares.len(), 1);
        assert_eq!(plan.link_shares[0].retain_inherited, Some(false));
    }

    #[test]
    fn test_password_links_skipped() {
        let locked = LinkShare {
            has_password: true,
            ..share("l1", &["u1"])
        };
        let current = Metadata::custom(vec![], vec![locked, share("l2", &["u2"])]);

        let plan = plan_restore(&current, &[], &[], None, &RestoreConfig::default());

        assert_eq!(plan.link_shares.len(), 1);
        assert_eq!(plan.link_shares[0].previous_id, "l2");
        assert_eq!(plan.link_shares[0].retain_inherited, Some(true));
    }

    #[test]
    fn test_placeholder_reset_when_only_removed() {
        let inherited = vec![share("l0", &["u0"])];
        let previous = vec![perm("p0", &[Role::Read], "u0")];
        let current = Metadata::custom(
            vec![perm("p0", &[Role::Read], "u0"), perm("p1", &[Role::Write], "u1")],
            vec![],
        );

        let config = RestoreConfig::default();
        let plan = plan_restore(&current, &previous, &inherited, None, &config);

        assert!(plan.link_shares.is_empty());
        assert_eq!(plan.placeholder_reset, Some(LinkShareRequest::placeholder()));
        assert!(plan.resets_inheritance);

        // The reset dropped inherited grants, so every current grant is recreated.
        assert!(plan.revocations.is_empty());
        let ids: Vec<_> = plan.grants.iter().map(|g| g.previous_id.as_str()).collect();
        assert_eq!(ids, vec!["p0", "p1"]);
    }

    #[test]
    fn test_unavailable_principals_skipped() {
        let available = AvailableEntities::new(["u1"], ["g1"]);
        let group = Permission {
            entity_type: EntityType::Group,
            ..perm("p2", &[Role::Write], "g1")
        };
        let current = Metadata::custom(
            vec![perm("p1", &[Role::Read], "u1"), group, perm("p3", &[Role::Read], "gone")],
            vec![share("l1", &["gone"]), share("l2", &["u1", "gone"])],
        );

        let plan = plan_restore(
            &current,
            &[],
            &[],
            Some(&available),
            &RestoreConfig::default(),
        );

        assert_eq!(plan.skipped, vec!["p3".to_string(), "l1".to_string()]);
        assert_eq!(plan.link_shares.len(), 1);
        assert_eq!(plan.link_shares[0].previous_id, "l2");
        assert_eq!(plan.link_shares[0].recipients, vec!["u1".to_string()]);

        let ids: Vec<_> = plan.grants.iter().map(|g| g.previous_id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[test]
    fn test_every_principal_unavailable() {
        let previous = vec![perm("p0", &[Role::Read], "u0")];
        let current = Metadata::custom(vec![perm("p1", &[Role::Read], "gone")], vec![]);

        let plan = plan_restore(
            &current,
            &previous,
            &[],
            Some(&AvailableEntities::default()),
            &RestoreConfig::default(),
        );

        assert_eq!(plan.skipped, vec!["p1".to_string()]);
        assert!(plan.grants.is_empty());
        assert_eq!(plan.revocations.len(), 1);
        assert_eq!(plan.revocations[0].previous_id, "p0");
    }

    #[test]
    fn test_unredeemed_links_plan_nothing() {
        let current = Metadata::custom(vec![], vec![share("l1", &[])]);

        let inherited = vec![share("l0", &[])];
        let plan = plan_restore(&current, &[], &inherited, None, &RestoreConfig::default());
        assert!(plan.is_empty());
    }
}
