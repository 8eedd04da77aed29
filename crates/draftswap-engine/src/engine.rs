//! Engine wiring
//!
//! [`OverrideEngine`] holds the one resolved [`Settings`] value and the host
//! seams, and re-derives everything else from the live document on every
//! call. There is deliberately no cached page state here: a snapshot that
//! survived a navigation would be exactly the stale state this library
//! exists to avoid.

use crate::error::{LaunchError, ReconcileError};
use crate::launch::{self, LaunchOutcome};
use crate::reconcile::{self, ControlState};
use draftswap_core::{decide, detect, gate, Decision, PageContext, Settings, UserFacts};
use draftswap_host::{ComposerAccess, DocumentView, UserSession};
use std::sync::Arc;

/// Selector for the element carrying the page's category hint.
pub const CATEGORY_ATTR_SELECTOR: &str = "[data-category-id]";

/// Attribute name of the category hint.
pub const CATEGORY_ATTRIBUTE: &str = "data-category-id";

/// Metadata tag name carrying the category hint.
pub const CATEGORY_META_NAME: &str = "category-id";

/// The engine: settings plus host seams, no other state.
pub struct OverrideEngine {
    settings: Settings,
    document: Arc<dyn DocumentView>,
    session: Arc<dyn UserSession>,
    composers: Arc<dyn ComposerAccess>,
}

impl OverrideEngine {
    /// Wire an engine from resolved settings and host seams.
    #[must_use]
    pub fn new(
        settings: Settings,
        document: Arc<dyn DocumentView>,
        session: Arc<dyn UserSession>,
        composers: Arc<dyn ComposerAccess>,
    ) -> Self {
        Self {
            settings,
            document,
            session,
            composers,
        }
    }

    /// The resolved settings this engine runs under.
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub(crate) fn document(&self) -> &dyn DocumentView {
        self.document.as_ref()
    }

    pub(crate) fn composers(&self) -> &dyn ComposerAccess {
        self.composers.as_ref()
    }

    /// Fresh page snapshot from the live document.
    #[must_use]
    pub fn page_context(&self) -> PageContext {
        let location = self.document.location();
        PageContext {
            path: location.path,
            hash: location.hash,
            query: location.query,
            category_attr: self.document.attribute(CATEGORY_ATTR_SELECTOR, CATEGORY_ATTRIBUTE),
            root_classes: self.document.root_classes(),
            category_meta: self.document.meta_content(CATEGORY_META_NAME),
        }
    }

    /// Fresh user facts from the host session.
    #[must_use]
    pub fn user_facts(&self) -> UserFacts {
        UserFacts {
            elevated: self.session.elevated(),
            groups: self.session.group_names().into_iter().collect(),
            shared_drafts_enabled: self.session.shared_drafts_enabled(),
        }
    }

    /// Derive the current decision from live page and session state.
    #[must_use]
    pub fn decide_now(&self) -> Decision {
        let context = self.page_context();
        let detected = detect(&context);
        let permitted = gate::permitted(&self.settings, &self.user_facts());
        decide(self.settings.enabled_category.as_ref(), detected.as_ref(), permitted)
    }

    /// Current control state, derived from the live document.
    #[must_use]
    pub fn control_state(&self) -> ControlState {
        reconcile::current_state(self.document.as_ref())
    }

    /// One full reconciliation pass: detect, gate, decide, apply.
    ///
    /// # Errors
    /// [`ReconcileError`] when a `Show` could not be applied; the caller
    /// (normally the scheduler) retries, never the host.
    pub fn reconcile_now(&self) -> Result<ControlState, ReconcileError> {
        let decision = self.decide_now();
        tracing::debug!(?decision, "reconciliation pass");
        reconcile::reconcile(self.document.as_ref(), &self.settings, decision)
    }

    /// Revert to the original control unconditionally.
    ///
    /// Used on navigation: the override must not survive a route change,
    /// even when the destination would also show it — the follow-up burst
    /// re-applies it from fresh state.
    pub fn force_revert(&self) {
        let _ = reconcile::reconcile(self.document.as_ref(), &self.settings, Decision::Hide);
    }

    /// The override control was activated: run the launch sequence.
    ///
    /// # Errors
    /// [`LaunchError`] when the decision went stale or every open strategy
    /// failed; the host surfaces it through its own error UI.
    pub async fn activate(&self) -> Result<LaunchOutcome, LaunchError> {
        launch::run(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftswap_core::{resolve, CategoryId, SettingsSource};
    use draftswap_testkit::{FakeComposerAccess, FakeDocument, FakeSession};

    fn engine_for(document: &Arc<FakeDocument>, category: &str) -> OverrideEngine {
        let settings = Settings {
            enabled_category: CategoryId::new(category),
            require_shared_drafts_feature: false,
            ..Settings::default()
        };
        OverrideEngine::new(
            settings,
            document.clone(),
            Arc::new(FakeSession::default()),
            Arc::new(FakeComposerAccess::empty()),
        )
    }

    #[test]
    fn page_context_is_rebuilt_per_call() {
        let document = Arc::new(FakeDocument::with_create_control());
        let engine = engine_for(&document, "170");

        document.set_path("/c/announcements/170");
        assert_eq!(engine.page_context().path, "/c/announcements/170");

        document.set_path("/latest");
        assert_eq!(engine.page_context().path, "/latest");
    }

    #[test]
    fn decide_now_combines_detection_and_gate() {
        let document = Arc::new(FakeDocument::with_create_control());
        let engine = engine_for(&document, "170");

        document.set_path("/c/announcements/170");
        assert_eq!(engine.decide_now(), Decision::Show);

        document.set_path("/c/random/12");
        assert_eq!(engine.decide_now(), Decision::Hide);

        document.set_path("/latest");
        assert_eq!(engine.decide_now(), Decision::Unknown);
    }

    #[test]
    fn disabled_settings_decide_hide_everywhere() {
        let document = Arc::new(FakeDocument::with_create_control());
        let settings = resolve(&[SettingsSource::category_only("0")]);
        let engine = OverrideEngine::new(
            settings,
            document.clone(),
            Arc::new(FakeSession::default()),
            Arc::new(FakeComposerAccess::empty()),
        );

        document.set_path("/c/announcements/170");
        assert_eq!(engine.decide_now(), Decision::Hide);

        // even with detection failing, disabled beats unknown
        document.set_path("/latest");
        assert_eq!(engine.decide_now(), Decision::Hide);
    }
}
