//! # ACL Reconcile Restore
//!
//! Restore-side use of the reconciliation engine.
//!
//! ## Overview
//!
//! Restoring an item's ACL means moving it from what it inherits to what the
//! snapshot recorded. This crate computes both sides and the actions in
//! between:
//!
//! - [`Metadata`] - The per-item ACL document stored by a backup
//! - [`previous_metadata`] / [`previous_link_shares`] - What an item inherits from its ancestors
//! - [`AvailableEntities`] - The users and groups that can still be granted access
//! - [`plan_restore`] - The ordered link-share and permission actions to apply
//!
//! Execution against the provider belongs to the caller.
//!
//! ## Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use acl_reconcile_restore::{
//!     plan_restore, previous_link_shares, previous_metadata, Metadata, RestoreConfig,
//! };
//!
//! let ancestors: HashMap<String, Metadata> =
//!     [("folder".to_string(), Metadata::inherited())].into_iter().collect();
//! let current = Metadata::custom(vec![], vec![]);
//!
//! let inherited = previous_metadata("folder/file.txt", &ancestors).unwrap();
//! let shares = previous_link_shares("folder/file.txt", &ancestors).unwrap();
//! let config = RestoreConfig::default();
//! let plan = plan_restore(&current, &inherited.permissions, &shares, None, &config);
//!
//! assert!(plan.is_empty());
//! ```

pub mod available;
pub mod config;
pub mod error;
pub mod inherit;
pub mod metadata;
pub mod plan;

pub use available::{
    filter_unavailable_link_shares, filter_unavailable_permissions, Available, AvailableEntities,
};
pub use config::RestoreConfig;
pub use error::{RestoreError, Result};
pub use inherit::{previous_link_shares, previous_metadata};
pub use metadata::{Metadata, SharingMode};
pub use plan::{
    plan_restore, LinkShareRequest, PermissionGrant, PermissionRevocation, Recipient, RestorePlan,
};
