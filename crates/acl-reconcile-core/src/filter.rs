//! Normalizers: raw permission records to canonical entities.
//!
//! Both passes preserve input order and drop what they cannot use. A bad
//! record never stops the rest of the list from being normalized.

use crate::graph::RawPermission;
use crate::identity::resolve_identity;
use crate::types::{LinkShare, LinkShareLink, Permission};

/// Extract the direct grants from a permission listing.
///
/// Records without a granted identity are link-share residue and are dropped
/// silently. Records whose identity cannot be resolved are dropped and logged.
pub fn filter_permissions(records: &[RawPermission]) -> Vec<Permission> {
    records
        .iter()
        .filter_map(|record| {
            let granted = record.granted_to_v2.as_ref()?;

            let Some(entity) = resolve_identity(granted) else {
                tracing::info!(
                    permission_id = %record.id,
                    "unsupported identity in permission, skipping"
                );
                return None;
            };

            Some(Permission::new(
                record.id.clone(),
                record.roles.clone(),
                entity,
                record.expiration_date_time,
            ))
        })
        .collect()
}

/// Extract the sharing-link grants from a permission listing.
///
/// Each attached principal is resolved on its own; the ones that fail are
/// dropped and the share keeps the rest.
pub fn filter_link_shares(records: &[RawPermission]) -> Vec<LinkShare> {
    records
        .iter()
        .filter_map(|record| {
            let link = record.link.as_ref()?;

            let entities = record
                .granted_to_identities_v2
                .iter()
                .filter_map(|set| {
                    let entity = resolve_identity(set);
                    if entity.is_none() {
                        tracing::info!(
                            link_share_id = %record.id,
                            "unsupported identity in link share, skipping entity"
                        );
                    }
                    entity
                })
                .collect();

            Some(LinkShare {
                id: record.id.clone(),
                link: LinkShareLink {
                    scope: link.scope.clone().unwrap_or_default(),
                    link_type: link.link_type.clone().unwrap_or_default(),
                    web_url: link.web_url.clone().unwrap_or_default(),
                    prevents_download: link.prevents_download,
                },
                roles: record.roles.clone(),
                entities,
                has_password: record.has_password,
                expiration: record.expiration_date_time,
            })
        })
        .collect()
}
