//! Engine error taxonomy
//!
//! Nothing here crosses the library boundary unhandled: reconcile errors
//! feed the scheduler's retry ladder, and launch errors are returned once
//! to the activation caller so the host can surface them through its own
//! error UI.

use draftswap_host::HostError;

/// A reconciliation pass could not reach the decided state.
///
/// Always retryable: the scheduler's backoff ladder and the mutation
/// observer exist precisely because the control may not be rendered yet.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ReconcileError {
    /// The original create control is not in the document yet
    #[error("create control not found in document")]
    ControlNotFound,

    /// The override control could not be inserted next to the original
    #[error("could not insert override control: {0}")]
    InsertFailed(#[from] HostError),
}

/// The launch sequence could not open the authoring surface.
///
/// Terminal for this activation; never retried in the background, because
/// re-opening the composer is a user-initiated action.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LaunchError {
    /// Page state changed since the button was shown; the activation was
    /// aborted and the control reverted
    #[error("page state changed; override no longer applies")]
    StaleDecision,

    /// No lookup path produced a composer handle
    #[error("no composer handle could be acquired")]
    ComposerUnavailable,

    /// Every open strategy failed
    #[error("all launch strategies failed")]
    Exhausted,
}
