//! # ACL Reconcile
//!
//! Permission and sharing-link reconciliation between ACL snapshots.
//!
//! ## Overview
//!
//! Backup and restore of a drive item's access-control list comes down to
//! three steps:
//!
//! - **Normalize**: Turn raw provider permission records into canonical grants
//! - **Diff**: Compute what was added and removed relative to an expected state
//! - **Plan**: Derive the ordered actions that bring an item back to its snapshot
//!
//! ## Key Concepts
//!
//! - **Direct grant**: A permission bound to exactly one principal.
//! - **Link share**: A sharing link and the principals that redeemed it.
//! - **Equivalence**: Two grants are the same ACL entry if they name the same
//!   principal with the same roles, regardless of grant ID or role order.
//! - **Inheritance**: An item with no custom ACL takes its parent's.
//!
//! ## Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use acl_reconcile::{Metadata, ReconcileConfig, Reconciler};
//!
//! let reconciler = Reconciler::new(ReconcileConfig::default());
//!
//! let payload = br#"{"value": [
//!     {"id": "p1", "roles": ["write"],
//!      "grantedToV2": {"user": {"id": "user-id1", "email": "id1@provider.com"}}}
//! ]}"#;
//! let acl = reconciler.normalize_payload(payload).unwrap();
//!
//! let current = Metadata::custom(acl.permissions, acl.link_shares);
//! let ancestors: HashMap<String, Metadata> =
//!     [("folder".to_string(), Metadata::inherited())].into_iter().collect();
//!
//! let plan = reconciler
//!     .plan_item("folder/file.txt", &current, &ancestors, None)
//!     .unwrap();
//! assert_eq!(plan.grants.len(), 1);
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `acl_reconcile::core` - Normalization, equivalence and diffing
//! - `acl_reconcile::restore` - Metadata documents, inheritance and restore planning

pub mod error;
pub mod reconciler;
pub mod verify;

// Re-export component crates
pub use acl_reconcile_core as core;
pub use acl_reconcile_restore as restore;

// Re-export main types for convenience
pub use error::{ReconcileError, Result};
pub use reconciler::{ItemDelta, NormalizedAcl, ReconcileConfig, Reconciler};
pub use verify::{verify_link_shares, verify_permissions, VerificationReport};

// Re-export commonly used component types
pub use acl_reconcile_core::{
    diff_link_shares, diff_permissions, AclDelta, Entity, EntityType, Equivalent, LinkShare,
    LinkShareLink, Permission, RawPermission, Role,
};
pub use acl_reconcile_restore::{
    AvailableEntities, Metadata, PermissionGrant, PermissionRevocation, Recipient, RestoreConfig,
    RestorePlan, SharingMode,
};
