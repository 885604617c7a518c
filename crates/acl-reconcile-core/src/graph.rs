//! Raw permission records as returned by the provider API.
//!
//! Only deserialization lives here. The polymorphic identity set is
//! collapsed into [`IdentitySet`] while decoding, so later stages match on
//! a single variant instead of probing six optional members.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::de::null_as_default;
use crate::error::{CoreError, Result};
use crate::types::{EntityType, Role};

/// One member of an identity set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: Option<String>,

    pub display_name: Option<String>,

    /// Every other key the provider sent. User emails arrive here.
    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Attach an email to the extension data.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.additional_data
            .insert("email".to_string(), Value::String(email.into()));
        self
    }

    /// The `email` value from the extension data, if it is a string.
    pub fn email(&self) -> Option<&str> {
        self.additional_data.get("email").and_then(Value::as_str)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentitySetFields {
    user: Option<Identity>,
    site_user: Option<Identity>,
    group: Option<Identity>,
    site_group: Option<Identity>,
    application: Option<Identity>,
    device: Option<Identity>,
}

/// The principal an identity set refers to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "IdentitySetFields")]
pub enum IdentitySet {
    User(Identity),
    SiteUser(Identity),
    Group(Identity),
    SiteGroup(Identity),
    Application(Identity),
    Device(Identity),
    /// None of the known members was populated.
    Unrecognized,
}

impl From<IdentitySetFields> for IdentitySet {
    fn from(fields: IdentitySetFields) -> Self {
        // Precedence when the provider populates several members.
        if let Some(identity) = fields.user {
            IdentitySet::User(identity)
        } else if let Some(identity) = fields.site_user {
            IdentitySet::SiteUser(identity)
        } else if let Some(identity) = fields.group {
            IdentitySet::Group(identity)
        } else if let Some(identity) = fields.site_group {
            IdentitySet::SiteGroup(identity)
        } else if let Some(identity) = fields.application {
            IdentitySet::Application(identity)
        } else if let Some(identity) = fields.device {
            IdentitySet::Device(identity)
        } else {
            IdentitySet::Unrecognized
        }
    }
}

impl IdentitySet {
    /// The entity type of the populated member.
    pub fn entity_type(&self) -> Option<EntityType> {
        match self {
            IdentitySet::User(_) => Some(EntityType::User),
            IdentitySet::SiteUser(_) => Some(EntityType::SiteUser),
            IdentitySet::Group(_) => Some(EntityType::Group),
            IdentitySet::SiteGroup(_) => Some(EntityType::SiteGroup),
            IdentitySet::Application(_) => Some(EntityType::Application),
            IdentitySet::Device(_) => Some(EntityType::Device),
            IdentitySet::Unrecognized => None,
        }
    }
}

/// Sharing-link sub-object of a permission record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharingLink {
    pub scope: Option<String>,

    #[serde(rename = "type")]
    pub link_type: Option<String>,

    pub web_url: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub prevents_download: bool,
}

impl SharingLink {
    pub fn new(web_url: impl Into<String>) -> Self {
        Self {
            web_url: Some(web_url.into()),
            ..Default::default()
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_type(mut self, link_type: impl Into<String>) -> Self {
        self.link_type = Some(link_type.into());
        self
    }
}

/// A permission resource, either a direct grant or a sharing link.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPermission {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<Role>,

    pub expiration_date_time: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub has_password: bool,

    /// The principal of a direct grant. Absent on link-share records.
    pub granted_to_v2: Option<IdentitySet>,

    /// Principals that redeemed a sharing link.
    #[serde(default, deserialize_with = "null_as_default")]
    pub granted_to_identities_v2: Vec<IdentitySet>,

    pub link: Option<SharingLink>,
}

impl RawPermission {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_roles<R: Into<Role>>(mut self, roles: impl IntoIterator<Item = R>) -> Self {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn granted_to(mut self, identity: IdentitySet) -> Self {
        self.granted_to_v2 = Some(identity);
        self
    }

    pub fn granted_to_identities(mut self, identities: Vec<IdentitySet>) -> Self {
        self.granted_to_identities_v2 = identities;
        self
    }

    pub fn with_link(mut self, link: SharingLink) -> Self {
        self.link = Some(link);
        self
    }

    pub fn with_expiration(mut self, expiration: DateTime<Utc>) -> Self {
        self.expiration_date_time = Some(expiration);
        self
    }

    pub fn with_password(mut self) -> Self {
        self.has_password = true;
        self
    }
}

/// Decode permission records from a JSON array or a `{"value": [...]}` page.
pub fn parse_permissions(bytes: &[u8]) -> Result<Vec<RawPermission>> {
    let payload: Value = serde_json::from_slice(bytes)?;

    let records = match payload {
        Value::Array(records) => Value::Array(records),
        Value::Object(mut page) => page
            .remove("value")
            .ok_or_else(|| CoreError::UnexpectedPayload("page has no `value` member".into()))?,
        other => {
            return Err(CoreError::UnexpectedPayload(format!(
                "expected array or page, got {}",
                json_kind(&other)
            )))
        }
    };

    Ok(serde_json::from_value(records)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
