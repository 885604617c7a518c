//! Per-item metadata documents.
//!
//! A backup stores one document next to every file and folder, holding the
//! item's sharing mode, direct grants and link shares. This module only
//! reads them.

use std::io::Read;

use acl_reconcile_core::de::null_as_default;
use acl_reconcile_core::{LinkShare, Permission};
use serde::{Deserialize, Serialize};

use crate::error::{RestoreError, Result};

/// Whether an item carries its own ACL or inherits its parent's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SharingMode {
    #[default]
    Inherited,
    Custom,
}

impl TryFrom<u8> for SharingMode {
    type Error = RestoreError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(SharingMode::Inherited),
            1 => Ok(SharingMode::Custom),
            other => Err(RestoreError::UnknownSharingMode(other)),
        }
    }
}

impl From<SharingMode> for u8 {
    fn from(mode: SharingMode) -> Self {
        match mode {
            SharingMode::Inherited => 0,
            SharingMode::Custom => 1,
        }
    }
}

/// The ACL snapshot of a single item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, rename = "filename", skip_serializing_if = "String::is_empty")]
    pub file_name: String,

    #[serde(default, rename = "permissionMode")]
    pub sharing_mode: SharingMode,

    #[serde(default, deserialize_with = "null_as_default")]
    pub permissions: Vec<Permission>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub link_shares: Vec<LinkShare>,
}

impl Metadata {
    /// Metadata of an item with its own ACL.
    pub fn custom(permissions: Vec<Permission>, link_shares: Vec<LinkShare>) -> Self {
        Self {
            sharing_mode: SharingMode::Custom,
            permissions,
            link_shares,
            ..Default::default()
        }
    }

    /// Metadata of an item that inherits its parent's ACL.
    pub fn inherited() -> Self {
        Self::default()
    }

    pub fn is_custom(&self) -> bool {
        self.sharing_mode == SharingMode::Custom
    }

    /// Decode a metadata document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Decode a metadata document from a reader.
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Self::from_slice(&buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acl_reconcile_core::{EntityType, Role};

    #[test]
    fn test_decode_document() {
        let doc = br#"{
            "filename": "report.docx",
            "permissionMode": 1,
            "permissions": [
                {"id": "p1", "roles": ["write"], "entityId": "user-id1", "entityType": "user"},
                {"id": "p2", "roles": ["read"], "email": "legacy@provider.com"}
            ],
            "linkShares": [
                {
                    "id": "l1",
                    "link": {"scope": "users", "type": "view", "webUrl": "https://link1"},
                    "roles": ["read"],
                    "entities": [{"id": "user-id2", "entityType": "user"}],
                    "hasPassword": false
                }
            ]
        }"#;

        let meta = Metadata::from_slice(doc).unwrap();

        assert_eq!(meta.file_name, "report.docx");
        assert!(meta.is_custom());
        assert_eq!(meta.permissions.len(), 2);
        assert_eq!(meta.permissions[0].roles, vec![Role::Write]);
        assert_eq!(meta.permissions[1].entity_type, EntityType::User);
        assert_eq!(meta.link_shares[0].link.web_url, "https://link1");
    }

    #[test]
    fn test_decode_null_lists() {
        let doc = br#"{"permissionMode":0,"permissions":null,"linkShares":null}"#;
        let meta = Metadata::from_reader(&doc[..]).unwrap();

        assert_eq!(meta, Metadata::inherited());
    }

    #[test]
    fn test_unknown_sharing_mode_rejected() {
        let err = Metadata::from_slice(br#"{"permissionMode":7}"#).unwrap_err();
        assert!(err.to_string().contains("unknown sharing mode"));
    }
}
