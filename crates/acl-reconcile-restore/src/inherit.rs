//! Inherited ACL resolution.
//!
//! Before an item's own ACL can be restored we need the ACL it would
//! inherit from its ancestors. That is the "expected" side of the diff.
//!
//! - Direct grants come from the nearest ancestor with a custom ACL.
//! - Link shares accumulate across every ancestor with a custom ACL.
//!
//! Paths are `/`-separated and relative to the drive root. The root itself
//! never carries permissions.

use std::collections::HashMap;

use acl_reconcile_core::LinkShare;

use crate::error::{RestoreError, Result};
use crate::metadata::Metadata;

/// Parent folders of an item, nearest first, excluding the drive root.
fn ancestors_of(item_path: &str) -> Result<Vec<&str>> {
    let trimmed = item_path.trim_matches('/');

    if trimmed.is_empty() || trimmed.split('/').any(str::is_empty) {
        return Err(RestoreError::InvalidPath(item_path.to_string()));
    }

    Ok(trimmed
        .rmatch_indices('/')
        .map(|(idx, _)| &trimmed[..idx])
        .collect())
}

fn lookup<'a>(ancestors: &'a HashMap<String, Metadata>, path: &str) -> Result<&'a Metadata> {
    ancestors
        .get(path)
        .ok_or_else(|| RestoreError::MissingAncestor {
            path: path.to_string(),
        })
}

/// The metadata an item inherits its direct grants from.
///
/// Returns the nearest ancestor with a custom ACL, or empty metadata when
/// every ancestor up to the root inherits.
pub fn previous_metadata(
    item_path: &str,
    ancestors: &HashMap<String, Metadata>,
) -> Result<Metadata> {
    for path in ancestors_of(item_path)? {
        let meta = lookup(ancestors, path)?;
        if meta.is_custom() {
            return Ok(meta.clone());
        }
    }

    Ok(Metadata::default())
}

/// The link shares an item inherits, nearest ancestor first.
pub fn previous_link_shares(
    item_path: &str,
    ancestors: &HashMap<String, Metadata>,
) -> Result<Vec<LinkShare>> {
    let mut link_shares = Vec::new();

    for path in ancestors_of(item_path)? {
        let meta = lookup(ancestors, path)?;
        if meta.is_custom() {
            link_shares.extend(meta.link_shares.iter().cloned());
        }
    }

    Ok(link_shares)
}
