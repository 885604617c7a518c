//! # ACL Reconcile Core
//!
//! Normalization and diffing of resource access-control lists.
//!
//! This crate contains no I/O. It turns raw permission records from the
//! provider API into canonical entities and computes the add/remove delta
//! between two snapshots of the same resource.
//!
//! ## Key Types
//!
//! - [`Entity`] - A normalized principal (user, group, site user/group, application, device)
//! - [`Permission`] - A direct grant bound to one principal
//! - [`LinkShare`] - A sharing-link grant and the principals that redeemed it
//! - [`AclDelta`] - The grants added and removed between two snapshots
//!
//! ## Pipeline
//!
//! 1. [`parse_permissions`] decodes the provider payload into [`RawPermission`]s
//! 2. [`filter_permissions`] / [`filter_link_shares`] normalize them
//! 3. [`diff_permissions`] / [`diff_link_shares`] compare a current and an expected snapshot
//!
//! ```rust
//! use acl_reconcile_core::{diff_permissions, Permission, Role};
//!
//! let before: Vec<Permission> = vec![];
//! let after = vec![Permission {
//!     id: "id1".into(),
//!     roles: vec![Role::Read],
//!     entity_id: Some("user-id1".into()),
//!     ..Default::default()
//! }];
//!
//! let delta = diff_permissions(&before, &after);
//! assert_eq!(delta.added, after);
//! assert!(delta.removed.is_empty());
//! ```

pub mod de;
pub mod diff;
pub mod equivalence;
pub mod error;
pub mod filter;
pub mod graph;
pub mod identity;
pub mod types;

pub use diff::{diff, diff_by, diff_link_shares, diff_permissions, AclDelta};
pub use equivalence::Equivalent;
pub use error::{CoreError, Result};
pub use filter::{filter_link_shares, filter_permissions};
pub use graph::{parse_permissions, Identity, IdentitySet, RawPermission, SharingLink};
pub use identity::resolve_identity;
pub use types::{Entity, EntityType, LinkShare, LinkShareLink, Permission, Role};
