//! Authoring-surface launch fallback chain
//!
//! Runs on user activation, in strict order, stopping at the first
//! success:
//!
//! 1. re-verify the decision is still `Show` (defensive revert if not)
//! 2. acquire the composer through the ordered lookup paths
//! 3. close an already-open composer, then let the host settle
//! 4. direct create-shared-draft capability
//! 5. open with an explicit shared-draft action
//! 6. open in default mode and best-effort set the shared-draft flags
//!
//! Individual step failures are logged and advance the chain; only total
//! exhaustion is reported, once, to the caller. Nothing here retries in
//! the background — re-opening the composer is the user's call.

use crate::engine::OverrideEngine;
use crate::error::LaunchError;
use draftswap_core::{CategoryId, Decision};
use draftswap_host::{
    Composer, ComposerAccess, ComposerAction, HostError, OpenRequest, COMPOSER_LOOKUP_ORDER,
    SHARED_DRAFT_FIELDS,
};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Delay between closing a previously-open composer and reopening it, so
/// the host's own teardown finishes first.
pub(crate) const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Content archetype for plain topics.
const REGULAR_ARCHETYPE: &str = "regular";

/// Which strategy in the chain ended up opening the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The host's direct create-shared-draft capability
    DirectCapability,
    /// Open with an explicit shared-draft action
    SharedDraftOpen,
    /// Default-mode open with best-effort shared-draft flags
    FallbackOpen {
        /// How many of the flag variants the model accepted
        fields_set: usize,
    },
}

pub(crate) async fn run(engine: &OverrideEngine) -> Result<LaunchOutcome, LaunchError> {
    // The button may have been clicked a moment before the page moved on;
    // never act on stale permission.
    if engine.decide_now() != Decision::Show {
        tracing::debug!("activation with stale decision; reverting");
        engine.force_revert();
        return Err(LaunchError::StaleDecision);
    }

    let target = engine
        .settings()
        .enabled_category
        .clone()
        .ok_or(LaunchError::StaleDecision)?;

    let composer = acquire(engine.composers()).ok_or_else(|| {
        tracing::warn!("no composer handle on any lookup path");
        LaunchError::ComposerUnavailable
    })?;

    if composer.is_open() {
        composer.close();
    }
    tokio::time::sleep(SETTLE_DELAY).await;

    match composer.create_shared_draft() {
        Ok(()) => {
            tracing::info!("shared draft via direct capability");
            return Ok(LaunchOutcome::DirectCapability);
        }
        Err(HostError::Unsupported) => {
            tracing::debug!("no direct shared-draft capability");
        }
        Err(err) => {
            tracing::debug!(%err, "direct shared-draft capability failed");
        }
    }

    let request = OpenRequest {
        action: ComposerAction::CreateSharedDraft,
        draft_key: draft_key("shared_draft"),
        archetype: REGULAR_ARCHETYPE.to_string(),
        category: Some(target.clone()),
    };
    match composer.open(request).await {
        Ok(_) => {
            tracing::info!(category = %target, "shared draft composer opened");
            return Ok(LaunchOutcome::SharedDraftOpen);
        }
        Err(err) => {
            tracing::debug!(%err, "shared-draft open rejected; falling back");
        }
    }

    fallback_open(composer.as_ref(), &target).await
}

/// Last resort: default-mode open, then flag the model as a shared draft.
async fn fallback_open(
    composer: &dyn Composer,
    target: &CategoryId,
) -> Result<LaunchOutcome, LaunchError> {
    let request = OpenRequest {
        action: ComposerAction::CreateTopic,
        draft_key: draft_key("shared_draft_fallback"),
        archetype: REGULAR_ARCHETYPE.to_string(),
        category: Some(target.clone()),
    };

    let model = match composer.open(request).await {
        Ok(model) => model,
        Err(err) => {
            tracing::warn!(%err, "launch strategies exhausted");
            return Err(LaunchError::Exhausted);
        }
    };

    // Host versions disagree on the flag's name; try every variant and let
    // each fail on its own.
    let mut fields_set = 0;
    for field in SHARED_DRAFT_FIELDS {
        match model.set_field(field, serde_json::Value::Bool(true)) {
            Ok(()) => fields_set += 1,
            Err(err) => tracing::debug!(field, %err, "shared-draft flag not accepted"),
        }
    }

    tracing::info!(fields_set, "composer opened in fallback mode");
    Ok(LaunchOutcome::FallbackOpen { fields_set })
}

fn acquire(access: &dyn ComposerAccess) -> Option<Arc<dyn Composer>> {
    for path in COMPOSER_LOOKUP_ORDER {
        if let Some(composer) = access.lookup(path) {
            tracing::debug!(?path, "composer acquired");
            return Some(composer);
        }
    }
    None
}

fn draft_key(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}
