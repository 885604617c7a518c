//! Restore configuration.

/// Configuration for restore planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreConfig {
    /// Whether permissions and link shares are restored at all.
    pub restore_permissions: bool,
    /// Skip site-group principals. Their numeric IDs cannot be resolved
    /// as invitation recipients.
    pub skip_site_groups: bool,
    /// Whether recreated grants notify their recipient.
    pub send_invitation: bool,
    /// Whether recreated grants require the recipient to sign in.
    pub require_sign_in: bool,
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            restore_permissions: true,
            skip_site_groups: true,
            send_invitation: false,
            require_sign_in: true,
        }
    }
}
