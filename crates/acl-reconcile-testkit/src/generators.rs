//! Proptest generators for property-based testing.
//!
//! IDs and emails are drawn from small pools so generated snapshots
//! overlap often enough to exercise matching.

use proptest::prelude::*;

use acl_reconcile_core::{
    Entity, EntityType, Identity, IdentitySet, LinkShare, LinkShareLink, Permission,
    RawPermission, Role, SharingLink,
};

/// Generate an EntityType.
pub fn entity_type() -> impl Strategy<Value = EntityType> {
    prop_oneof![
        Just(EntityType::User),
        Just(EntityType::Group),
        Just(EntityType::SiteUser),
        Just(EntityType::SiteGroup),
        Just(EntityType::Application),
        Just(EntityType::Device),
    ]
}

/// Generate a Role, occasionally outside the known vocabulary.
pub fn role() -> impl Strategy<Value = Role> {
    prop_oneof![
        3 => Just(Role::Read),
        3 => Just(Role::Write),
        1 => Just(Role::Owner),
        1 => "[a-z]{4,8}".prop_map(Role::from),
    ]
}

/// Generate a role list of up to three tokens.
pub fn roles() -> impl Strategy<Value = Vec<Role>> {
    prop::collection::vec(role(), 0..=3)
}

/// Generate an entity ID from a small pool.
pub fn entity_id() -> impl Strategy<Value = String> {
    "user-id[0-3]".prop_map(String::from)
}

/// Generate an email from a small pool.
pub fn email() -> impl Strategy<Value = String> {
    "id[0-3]@provider\\.com".prop_map(String::from)
}

/// Generate an (entity ID, email) pair with at least one side present.
pub fn principal() -> impl Strategy<Value = (Option<String>, Option<String>)> {
    prop_oneof![
        entity_id().prop_map(|id| (Some(id), None)),
        email().prop_map(|email| (None, Some(email))),
        (entity_id(), email()).prop_map(|(id, email)| (Some(id), Some(email))),
    ]
}

/// Generate a well-formed Permission.
pub fn permission() -> impl Strategy<Value = Permission> {
    ("p[0-9]{1,2}", roles(), principal(), entity_type()).prop_map(
        |(id, roles, (entity_id, email), entity_type)| Permission {
            id,
            roles,
            email,
            entity_id,
            entity_type,
            expiration: None,
        },
    )
}

/// Generate a permission snapshot.
pub fn permissions(max_len: usize) -> impl Strategy<Value = Vec<Permission>> {
    prop::collection::vec(permission(), 0..=max_len)
}

/// Generate a resolvable Entity.
pub fn entity() -> impl Strategy<Value = Entity> {
    (principal(), entity_type()).prop_map(|((id, email), entity_type)| Entity {
        id,
        email,
        entity_type,
    })
}

/// Generate a LinkShare, possibly unredeemed.
pub fn link_share() -> impl Strategy<Value = LinkShare> {
    (
        "l[0-9]{1,2}",
        "https://link[0-3]",
        roles(),
        prop::collection::vec(entity(), 0..=3),
        any::<bool>(),
    )
        .prop_map(|(id, web_url, roles, entities, has_password)| LinkShare {
            id,
            link: LinkShareLink {
                scope: "users".to_string(),
                link_type: "view".to_string(),
                web_url,
                prevents_download: false,
            },
            roles,
            entities,
            has_password,
            expiration: None,
        })
}

/// Generate a link-share snapshot.
pub fn link_shares(max_len: usize) -> impl Strategy<Value = Vec<LinkShare>> {
    prop::collection::vec(link_share(), 0..=max_len)
}

/// Generate an identity set, including unrecognized and empty shapes.
pub fn identity_set() -> impl Strategy<Value = IdentitySet> {
    let populated = (
        entity_type(),
        prop::option::of(entity_id()),
        prop::option::of(email()),
    )
        .prop_map(|(entity_type, id, email)| {
            let mut identity = Identity {
                id,
                ..Default::default()
            };
            if let Some(email) = email {
                identity = identity.with_email(email);
            }

            match entity_type {
                EntityType::User => IdentitySet::User(identity),
                EntityType::Group => IdentitySet::Group(identity),
                EntityType::SiteUser => IdentitySet::SiteUser(identity),
                EntityType::SiteGroup => IdentitySet::SiteGroup(identity),
                EntityType::Application => IdentitySet::Application(identity),
                EntityType::Device => IdentitySet::Device(identity),
            }
        });

    prop_oneof![
        4 => populated,
        1 => Just(IdentitySet::Unrecognized),
    ]
}

/// Generate a raw provider record: direct grant, link share, or residue.
pub fn raw_permission() -> impl Strategy<Value = RawPermission> {
    (
        "r[0-9]{1,2}",
        roles(),
        prop::option::of(identity_set()),
        prop::collection::vec(identity_set(), 0..=3),
        prop::option::of("https://link[0-3]"),
    )
        .prop_map(|(id, roles, granted, redeemed, url)| {
            let mut record = RawPermission::new(id).with_roles(roles);
            if let Some(granted) = granted {
                record = record.granted_to(granted);
            }
            if let Some(url) = url {
                record = record
                    .with_link(SharingLink::new(url))
                    .granted_to_identities(redeemed);
            }
            record
        })
}
