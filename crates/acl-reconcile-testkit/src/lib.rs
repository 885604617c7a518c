//! # ACL Reconcile Testkit
//!
//! Testing utilities for the ACL reconciliation crates.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Provider payloads with the canonical records they must normalize to
//! - **Generators**: Proptest strategies for permissions, link shares and raw records
//! - **Fixtures**: Builders for provider JSON and canonical records
//!
//! ## Golden Vectors
//!
//! ```rust
//! use acl_reconcile_testkit::vectors::verify_all_vectors;
//!
//! assert!(verify_all_vectors().is_empty());
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use acl_reconcile_core::diff_permissions;
//! use acl_reconcile_testkit::generators::permissions;
//!
//! proptest! {
//!     #[test]
//!     fn diff_is_idempotent(snapshot in permissions(8)) {
//!         prop_assert!(diff_permissions(&snapshot, &snapshot).is_empty());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{email_permission, link_share, permission};
pub use vectors::{all_vectors, check_vector, verify_all_vectors, GoldenVector};
