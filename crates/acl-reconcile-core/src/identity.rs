//! Identity resolution: identity set to normalized [`Entity`].

use crate::graph::{Identity, IdentitySet};
use crate::types::{Entity, EntityType};

/// Resolve an identity set to the principal it names.
///
/// Returns `None` for an unrecognized set, or when the populated member has
/// neither an ID nor an email. Only user identities read an email from the
/// extension data; a missing email is not a failure.
pub fn resolve_identity(set: &IdentitySet) -> Option<Entity> {
    match set {
        IdentitySet::User(identity) => Entity::new(
            EntityType::User,
            identity.id.clone(),
            identity.email().map(str::to_string),
        ),
        IdentitySet::SiteUser(identity) => by_id(EntityType::SiteUser, identity),
        IdentitySet::Group(identity) => by_id(EntityType::Group, identity),
        IdentitySet::SiteGroup(identity) => by_id(EntityType::SiteGroup, identity),
        IdentitySet::Application(identity) => by_id(EntityType::Application, identity),
        IdentitySet::Device(identity) => by_id(EntityType::Device, identity),
        IdentitySet::Unrecognized => None,
    }
}

fn by_id(entity_type: EntityType, identity: &Identity) -> Option<Entity> {
    Entity::new(entity_type, identity.id.clone(), None)
}
