//! User/session seam

/// Accessor for the current user's session facts.
pub trait UserSession: Send + Sync {
    /// Whether the current user holds an elevated (staff) role
    fn elevated(&self) -> bool;

    /// Group names the current user belongs to
    fn group_names(&self) -> Vec<String>;

    /// Whether the host's shared-drafts feature is enabled.
    ///
    /// `None` means the host cannot verify it right now (the relevant
    /// record is not loaded); the gate treats that as permitted rather
    /// than blocking on an unreliable check.
    fn shared_drafts_enabled(&self) -> Option<bool>;
}
