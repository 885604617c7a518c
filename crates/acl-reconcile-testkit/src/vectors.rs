//! Golden provider payloads.
//!
//! Each vector pairs a provider permission listing with the canonical
//! records it must normalize to. The expected records are stored as
//! metadata-document JSON so they double as a check on field names.

use acl_reconcile_core::{
    filter_link_shares, filter_permissions, parse_permissions, LinkShare, Permission,
};

/// A golden normalization vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Provider payload.
    pub payload: &'static str,
    /// Expected direct grants, as a JSON array.
    pub permissions: &'static str,
    /// Expected link shares, as a JSON array.
    pub link_shares: &'static str,
}

/// Get all golden vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "mixed listing",
            payload: r#"{"value": [
                {"id": "p1", "roles": ["owner"],
                 "grantedToV2": {"user": {"id": "user-id1", "displayName": "One", "email": "id1@provider.com"}}},
                {"id": "p2", "roles": ["write"],
                 "grantedToV2": {"siteGroup": {"id": "4", "displayName": "Members", "loginName": "Members"}}},
                {"id": "l1", "roles": ["read"], "hasPassword": false,
                 "grantedToIdentitiesV2": [{"user": {"id": "user-id2", "email": "id2@provider.com"}}],
                 "link": {"scope": "users", "type": "view", "webUrl": "https://link1", "preventsDownload": true}}
            ]}"#,
            permissions: r#"[
                {"id": "p1", "roles": ["owner"], "email": "id1@provider.com", "entityId": "user-id1", "entityType": "user"},
                {"id": "p2", "roles": ["write"], "entityId": "4", "entityType": "site_group"}
            ]"#,
            link_shares: r#"[
                {"id": "l1", "roles": ["read"], "hasPassword": false,
                 "link": {"scope": "users", "type": "view", "webUrl": "https://link1", "preventsDownload": true},
                 "entities": [{"id": "user-id2", "email": "id2@provider.com", "entityType": "user"}]}
            ]"#,
        },
        GoldenVector {
            name: "unsupported and partial identities",
            payload: r#"[
                {"id": "p1", "roles": ["read"], "grantedToV2": {}},
                {"id": "p2", "roles": ["read"], "grantedToV2": {"user": {"displayName": "Nobody"}}},
                {"id": "p3", "roles": ["read"], "expirationDateTime": "2026-06-01T00:00:00Z",
                 "grantedToV2": {"application": {"id": "app-1", "displayName": "Sync"}}},
                {"id": "l1", "roles": ["write"],
                 "grantedToIdentitiesV2": [{}, {"user": {"email": "legacy@provider.com"}}],
                 "link": {"scope": "organization", "type": "edit", "webUrl": "https://link2"}}
            ]"#,
            permissions: r#"[
                {"id": "p3", "roles": ["read"], "entityId": "app-1", "entityType": "application",
                 "expiration": "2026-06-01T00:00:00Z"}
            ]"#,
            link_shares: r#"[
                {"id": "l1", "roles": ["write"],
                 "link": {"scope": "organization", "type": "edit", "webUrl": "https://link2", "preventsDownload": false},
                 "entities": [{"email": "legacy@provider.com", "entityType": "user"}]}
            ]"#,
        },
        GoldenVector {
            name: "unredeemed link",
            payload: r#"{"value": [
                {"id": "l1", "roles": ["read"], "hasPassword": true,
                 "link": {"scope": "anonymous", "type": "view", "webUrl": "https://link3"}}
            ]}"#,
            permissions: "[]",
            link_shares: r#"[
                {"id": "l1", "roles": ["read"], "hasPassword": true, "entities": [],
                 "link": {"scope": "anonymous", "type": "view", "webUrl": "https://link3"}}
            ]"#,
        },
    ]
}

/// Normalize a vector's payload and compare against its expectations.
pub fn check_vector(vector: &GoldenVector) -> Result<(), String> {
    let records = parse_permissions(vector.payload.as_bytes()).map_err(|e| e.to_string())?;

    let expected_perms: Vec<Permission> =
        serde_json::from_str(vector.permissions).map_err(|e| e.to_string())?;
    let expected_shares: Vec<LinkShare> =
        serde_json::from_str(vector.link_shares).map_err(|e| e.to_string())?;

    let perms = filter_permissions(&records);
    if perms != expected_perms {
        return Err(format!("permissions: expected {expected_perms:?}, got {perms:?}"));
    }

    let shares = filter_link_shares(&records);
    if shares != expected_shares {
        return Err(format!("link shares: expected {expected_shares:?}, got {shares:?}"));
    }

    Ok(())
}

/// Check every golden vector, returning the failures.
pub fn verify_all_vectors() -> Vec<(&'static str, String)> {
    all_vectors()
        .iter()
        .filter_map(|v| check_vector(v).err().map(|err| (v.name, err)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_hold() {
        let failures = verify_all_vectors();
        assert!(failures.is_empty(), "{failures:#?}");
    }
}
