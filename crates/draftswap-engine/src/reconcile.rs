//! Button-state reconciliation
//!
//! Applies a [`Decision`] to the live control as a two-state machine:
//!
//! ```text
//! Original --Show--> Overridden     (hide original, insert labeled clone)
//! Overridden --Hide--> Original     (remove clone, restore original)
//!      *    --Unknown-->  *         (no transition)
//! ```
//!
//! The override control's element id and the hidden-marker on the original
//! are the single source of truth for the current state; label text is
//! never inspected to infer state. Controls are re-acquired by id on every
//! call — the host may have re-rendered them since the last pass — and
//! every operation is an idempotent no-op when the document is already in
//! the target state.

use crate::error::ReconcileError;
use draftswap_core::{Decision, Settings};
use draftswap_host::{Activation, DocumentView};

/// Element id of the host's create-topic control.
pub const CREATE_CONTROL_ID: &str = "create-topic";

/// Element id given to the cloned override control.
pub const OVERRIDE_CONTROL_ID: &str = "create-shared-draft-button";

/// Marker recorded on the hidden original so the hide is exactly
/// reversible.
pub const HIDDEN_MARKER: &str = "hidden-by-shared-draft";

/// Observable state of the create control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    /// The host's own control, untouched
    Original,
    /// The override control is in place and the original is hidden
    Overridden,
}

/// Current state, derived from the live document.
#[must_use]
pub fn current_state(document: &dyn DocumentView) -> ControlState {
    if document.control(OVERRIDE_CONTROL_ID).is_some() {
        ControlState::Overridden
    } else {
        ControlState::Original
    }
}

/// Apply a decision to the live control.
///
/// # Errors
/// Only `Show` can fail, and only when the original control is missing or
/// the clone cannot be inserted; both leave the document unchanged and are
/// retried by the scheduler. `Hide` and `Unknown` always succeed.
pub fn reconcile(
    document: &dyn DocumentView,
    settings: &Settings,
    decision: Decision,
) -> Result<ControlState, ReconcileError> {
    match decision {
        Decision::Unknown => Ok(current_state(document)),
        Decision::Hide => {
            revert(document);
            Ok(ControlState::Original)
        }
        Decision::Show => apply(document, settings),
    }
}

fn apply(document: &dyn DocumentView, settings: &Settings) -> Result<ControlState, ReconcileError> {
    if document.control(OVERRIDE_CONTROL_ID).is_some() {
        // already in target state; overlapping passes collapse here
        return Ok(ControlState::Overridden);
    }

    let original = document
        .control(CREATE_CONTROL_ID)
        .ok_or(ReconcileError::ControlNotFound)?;

    original.set_visible(false);
    original.set_marker(HIDDEN_MARKER, "true");

    let override_control = match document.clone_after(CREATE_CONTROL_ID, OVERRIDE_CONTROL_ID) {
        Ok(control) => control,
        Err(err) => {
            // roll the hide back so a failed insert cannot strand the page
            // with no visible create control
            original.set_visible(true);
            original.remove_marker(HIDDEN_MARKER);
            return Err(err.into());
        }
    };

    override_control.remove_marker(HIDDEN_MARKER);
    override_control.set_visible(true);
    override_control.set_label(&settings.button_text);
    override_control.set_title(&settings.button_title);
    override_control.set_activation(Activation::SharedDraft);

    tracing::info!(label = %settings.button_text, "override control applied");
    Ok(ControlState::Overridden)
}

/// Reverse the override exactly: remove the clone, restore the original's
/// visibility, clear the marker. Safe to call any number of times, with or
/// without an override present.
fn revert(document: &dyn DocumentView) {
    let removed = document.remove_control(OVERRIDE_CONTROL_ID);

    if let Some(original) = document.control(CREATE_CONTROL_ID) {
        if original.marker(HIDDEN_MARKER).is_some() {
            original.set_visible(true);
            original.remove_marker(HIDDEN_MARKER);
        }
    }

    if removed {
        tracing::info!("override control reverted");
    }
}
