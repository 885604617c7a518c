//! Fixtures for provider payloads and canonical records.

use std::collections::HashMap;

use acl_reconcile_core::{Entity, EntityType, LinkShare, LinkShareLink, Permission, Role};
use acl_reconcile_restore::Metadata;
use serde_json::{json, Value};

/// Provider key of an identity-set member.
pub fn identity_key(entity_type: EntityType) -> &'static str {
    match entity_type {
        EntityType::User => "user",
        EntityType::Group => "group",
        EntityType::SiteUser => "siteUser",
        EntityType::SiteGroup => "siteGroup",
        EntityType::Application => "application",
        EntityType::Device => "device",
    }
}

/// A provider identity set with one populated member.
pub fn identity_set(entity_type: EntityType, id: Option<&str>, email: Option<&str>) -> Value {
    let mut identity = serde_json::Map::new();
    if let Some(id) = id {
        identity.insert("id".into(), json!(id));
    }
    if let Some(email) = email {
        identity.insert("email".into(), json!(email));
    }

    let mut set = serde_json::Map::new();
    set.insert(identity_key(entity_type).to_string(), Value::Object(identity));
    Value::Object(set)
}

/// A provider direct-grant record.
pub fn grant_record(id: &str, roles: &[&str], granted_to: Value) -> Value {
    json!({
        "id": id,
        "roles": roles,
        "grantedToV2": granted_to,
    })
}

/// A provider sharing-link record.
pub fn link_record(id: &str, web_url: &str, roles: &[&str], redeemed_by: Vec<Value>) -> Value {
    json!({
        "id": id,
        "roles": roles,
        "hasPassword": false,
        "grantedToIdentitiesV2": redeemed_by,
        "link": {
            "scope": "users",
            "type": "view",
            "webUrl": web_url,
            "preventsDownload": false,
        },
    })
}

/// Wrap records in a list page.
pub fn page(records: Vec<Value>) -> Vec<u8> {
    json!({ "value": records }).to_string().into_bytes()
}

/// A user grant identified by entity ID.
pub fn permission(id: &str, roles: &[Role], entity_id: &str) -> Permission {
    Permission {
        id: id.to_string(),
        roles: roles.to_vec(),
        entity_id: Some(entity_id.to_string()),
        ..Default::default()
    }
}

/// A user grant from an older snapshot, identified by email only.
pub fn email_permission(id: &str, roles: &[Role], email: &str) -> Permission {
    Permission {
        id: id.to_string(),
        roles: roles.to_vec(),
        email: Some(email.to_string()),
        ..Default::default()
    }
}

/// A link share redeemed by the given user IDs.
pub fn link_share(id: &str, web_url: &str, entity_ids: &[&str]) -> LinkShare {
    LinkShare {
        id: id.to_string(),
        link: LinkShareLink {
            scope: "users".to_string(),
            link_type: "view".to_string(),
            web_url: web_url.to_string(),
            prevents_download: false,
        },
        roles: vec![Role::Read],
        entities: entity_ids
            .iter()
            .map(|e| Entity {
                id: Some(e.to_string()),
                email: None,
                entity_type: EntityType::User,
            })
            .collect(),
        has_password: false,
        expiration: None,
    }
}

/// An ancestor map from `(folder path, metadata)` pairs.
pub fn ancestors(entries: Vec<(&str, Metadata)>) -> HashMap<String, Metadata> {
    entries
        .into_iter()
        .map(|(path, meta)| (path.to_string(), meta))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use acl_reconcile_core::{filter_permissions, parse_permissions};

    #[test]
    fn test_fixture_payload_normalizes() {
        let payload = page(vec![grant_record(
            "p1",
            &["read"],
            identity_set(EntityType::SiteUser, Some("su1"), None),
        )]);

        let perms = filter_permissions(&parse_permissions(&payload).unwrap());

        assert_eq!(perms.len(), 1);
        assert_eq!(perms[0].entity_type, EntityType::SiteUser);
        assert_eq!(perms[0].entity_id.as_deref(), Some("su1"));
    }

    #[test]
    fn test_ancestor_map() {
        let map = ancestors(vec![
            ("a", Metadata::inherited()),
            ("a/b", Metadata::custom(vec![], vec![])),
        ]);

        assert_eq!(map.len(), 2);
        assert!(map["a/b"].is_custom());
    }
}
