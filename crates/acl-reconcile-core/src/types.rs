//! Canonical access-control entities.
//!
//! These are the normalized forms every snapshot is reduced to before
//! comparison. They are plain value objects: built once per provider
//! response or metadata read, never mutated afterwards.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

/// The kind of principal a grant is bound to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// Older metadata documents predate the entity type and only ever
    /// described users, so a missing value reads as `user`.
    #[default]
    User,
    Group,
    SiteUser,
    SiteGroup,
    Application,
    Device,
}

impl EntityType {
    /// The stable token used in metadata documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::User => "user",
            EntityType::Group => "group",
            EntityType::SiteUser => "site_user",
            EntityType::SiteGroup => "site_group",
            EntityType::Application => "application",
            EntityType::Device => "device",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role token carried by a grant.
///
/// Tokens outside the known vocabulary are kept verbatim so they survive a
/// normalize/compare pass untouched. Build roles from tokens with
/// [`Role::from`]; equality, hashing and ordering all go through the token,
/// so a hand-built `Role::Other("read")` is the same role as `Role::Read`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Owner,
    Write,
    Read,
    Other(String),
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Role {}

impl Hash for Role {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Owner => "owner",
            Role::Write => "write",
            Role::Read => "read",
            Role::Other(token) => token,
        }
    }
}

impl From<String> for Role {
    fn from(token: String) -> Self {
        match token.as_str() {
            "owner" => Role::Owner,
            "write" => Role::Write,
            "read" => Role::Read,
            _ => Role::Other(token),
        }
    }
}

impl From<&str> for Role {
    fn from(token: &str) -> Self {
        Role::from(token.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(token) => token,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the value when it is present and non-empty.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// A normalized principal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Provider object ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default)]
    pub entity_type: EntityType,
}

impl Entity {
    /// Build an entity, or `None` when neither an ID nor an email is known.
    ///
    /// Empty strings count as absent.
    pub fn new(entity_type: EntityType, id: Option<String>, email: Option<String>) -> Option<Self> {
        let id = non_empty(id);
        let email = non_empty(email);

        if id.is_none() && email.is_none() {
            return None;
        }

        Some(Self {
            id,
            email,
            entity_type,
        })
    }
}

/// A single principal's direct grant on a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    #[serde(default)]
    pub id: String,

    /// Role tokens. Order is not significant.
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<Role>,

    /// Identifying field of older snapshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Identifying field of newer snapshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,

    #[serde(default)]
    pub entity_type: EntityType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

impl Permission {
    /// Bind a grant record to its resolved principal.
    pub fn new(
        id: impl Into<String>,
        roles: Vec<Role>,
        entity: Entity,
        expiration: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: id.into(),
            roles,
            email: entity.email,
            entity_id: entity.id,
            entity_type: entity.entity_type,
            expiration,
        }
    }

    /// Whether the grant names its principal by ID or by email.
    pub fn has_identity(&self) -> bool {
        present(&self.entity_id).is_some() || present(&self.email).is_some()
    }
}

/// Link metadata of a sharing-link grant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkShareLink {
    #[serde(default)]
    pub scope: String,

    #[serde(default, rename = "type")]
    pub link_type: String,

    #[serde(default)]
    pub web_url: String,

    #[serde(default)]
    pub prevents_download: bool,
}

/// A shareable-URL grant and the principals known to have redeemed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkShare {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub link: LinkShareLink,

    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<Role>,

    /// May be empty when nobody has redeemed the link yet.
    #[serde(default, deserialize_with = "null_as_default")]
    pub entities: Vec<Entity>,

    #[serde(default)]
    pub has_password: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

impl LinkShare {
    /// Whether any principal is attached to this share.
    pub fn has_entities(&self) -> bool {
        !self.entities.is_empty()
    }
}
