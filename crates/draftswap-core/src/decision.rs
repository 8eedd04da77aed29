//! The tri-state reconciliation decision

use crate::context::CategoryId;

/// What the reconciler should do with the control.
///
/// `Unknown` means "insufficient information — leave the current visible
/// state alone". It is distinct from `Hide`, which actively reverts the
/// override. Treating `Unknown` as an implicit hide would make the button
/// flicker during SPA transitions while the page has not finished updating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Category matches and the user qualifies: apply the override
    Show,
    /// The override does not belong here: revert to the original control
    Hide,
    /// Detection failed: change nothing
    Unknown,
}

/// Combine detection and gating into a decision.
///
/// - no configured target ⇒ `Hide` (feature disabled everywhere)
/// - detection failed ⇒ `Unknown` (applicability cannot be determined)
/// - detected == target and permitted ⇒ `Show`
/// - anything else ⇒ `Hide`
#[must_use]
pub fn decide(
    target: Option<&CategoryId>,
    detected: Option<&CategoryId>,
    permitted: bool,
) -> Decision {
    let target = match target {
        Some(t) => t,
        None => return Decision::Hide,
    };
    let detected = match detected {
        Some(d) => d,
        None => return Decision::Unknown,
    };
    if detected == target && permitted {
        Decision::Show
    } else {
        Decision::Hide
    }
}
