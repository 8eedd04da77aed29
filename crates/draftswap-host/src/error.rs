//! Host-call error type

/// Failure reported by a host seam.
///
/// These never cross the library boundary raw: lookup failures feed the
/// retry ladder, launch failures feed the fallback chain, and only chain
/// exhaustion surfaces (as a `LaunchError`).
#[derive(Debug, Clone, thiserror::Error)]
pub enum HostError {
    /// The host does not expose this capability at all
    #[error("capability not supported by this host")]
    Unsupported,

    /// A lookup (control, service, element) came back empty
    #[error("host lookup failed: {0}")]
    LookupFailed(String),

    /// The composer rejected an open request
    #[error("composer open rejected: {0}")]
    OpenRejected(String),

    /// Any other failing host call
    #[error("host call failed: {0}")]
    CallFailed(String),
}
