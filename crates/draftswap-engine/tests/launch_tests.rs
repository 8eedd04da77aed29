//! Launch fallback chain scenarios

use draftswap_core::{CategoryId, Settings};
use draftswap_engine::{
    LaunchError, LaunchOutcome, OverrideEngine, CREATE_CONTROL_ID, OVERRIDE_CONTROL_ID,
};
use draftswap_host::{ComposerAction, ComposerPath};
use draftswap_testkit::{FakeComposer, FakeComposerAccess, FakeDocument, FakeSession};
use std::sync::Arc;

fn settings() -> Settings {
    Settings {
        enabled_category: CategoryId::new("170"),
        require_shared_drafts_feature: false,
        ..Settings::default()
    }
}

fn showing_document() -> Arc<FakeDocument> {
    let document = Arc::new(FakeDocument::with_create_control());
    document.set_path("/c/announcements/170");
    document
}

fn engine_with(document: Arc<FakeDocument>, access: Arc<FakeComposerAccess>) -> OverrideEngine {
    OverrideEngine::new(
        settings(),
        document,
        Arc::new(FakeSession::default()),
        access,
    )
}

#[tokio::test(start_paused = true)]
async fn direct_capability_wins_without_opening() {
    let composer = Arc::new(FakeComposer::new().with_direct_capability());
    let access = Arc::new(FakeComposerAccess::with(ComposerPath::Service, composer.clone()));
    let engine = engine_with(showing_document(), access);

    let outcome = engine.activate().await.unwrap();
    assert_eq!(outcome, LaunchOutcome::DirectCapability);
    assert_eq!(composer.direct_calls(), 1);
    assert!(composer.open_requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn lookup_paths_are_probed_in_order() {
    let composer = Arc::new(FakeComposer::new());
    let access = Arc::new(FakeComposerAccess::with(ComposerPath::Controller, composer));
    let engine = engine_with(showing_document(), access.clone());

    engine.activate().await.unwrap();
    assert_eq!(
        access.probed_paths(),
        vec![
            ComposerPath::AppController,
            ComposerPath::Service,
            ComposerPath::Controller,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn shared_draft_open_carries_the_resolved_parameters() {
    let composer = Arc::new(FakeComposer::new());
    let access = Arc::new(FakeComposerAccess::with(ComposerPath::AppController, composer.clone()));
    let engine = engine_with(showing_document(), access);

    let outcome = engine.activate().await.unwrap();
    assert_eq!(outcome, LaunchOutcome::SharedDraftOpen);

    let requests = composer.open_requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.action, ComposerAction::CreateSharedDraft);
    assert_eq!(request.archetype, "regular");
    assert_eq!(request.category, CategoryId::new("170"));
    assert!(request.draft_key.starts_with("shared_draft_"));
}

#[tokio::test(start_paused = true)]
async fn draft_keys_are_unique_per_activation() {
    let composer = Arc::new(FakeComposer::new());
    let access = Arc::new(FakeComposerAccess::with(ComposerPath::AppController, composer.clone()));
    let engine = engine_with(showing_document(), access);

    engine.activate().await.unwrap();
    engine.activate().await.unwrap();

    let requests = composer.open_requests();
    assert_eq!(requests.len(), 2);
    assert_ne!(requests[0].draft_key, requests[1].draft_key);
}

#[tokio::test(start_paused = true)]
async fn rejected_shared_draft_open_falls_back_to_default_mode() {
    let composer = Arc::new(
        FakeComposer::new()
            .rejecting_shared_draft_open()
            .with_failing_field("shared_draft"),
    );
    let access = Arc::new(FakeComposerAccess::with(ComposerPath::Service, composer.clone()));
    let engine = engine_with(showing_document(), access);

    let outcome = engine.activate().await.unwrap();
    assert_eq!(outcome, LaunchOutcome::FallbackOpen { fields_set: 2 });

    let requests = composer.open_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].action, ComposerAction::CreateSharedDraft);
    assert_eq!(requests[1].action, ComposerAction::CreateTopic);
    assert!(requests[1].draft_key.starts_with("shared_draft_fallback_"));

    // every flag variant attempted, independently of the failing one
    let model = composer.model();
    assert_eq!(
        model.attempted_fields(),
        vec!["is_shared_draft", "shared_draft", "sharedDraft"]
    );
    assert_eq!(model.accepted_fields().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn failing_direct_capability_still_falls_through() {
    let composer = Arc::new(FakeComposer::new().with_failing_direct());
    let access = Arc::new(FakeComposerAccess::with(ComposerPath::Service, composer.clone()));
    let engine = engine_with(showing_document(), access);

    let outcome = engine.activate().await.unwrap();
    assert_eq!(outcome, LaunchOutcome::SharedDraftOpen);
    assert_eq!(composer.direct_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn exhausted_chain_is_a_single_terminal_error() {
    let composer = Arc::new(FakeComposer::new().rejecting_all_opens());
    let access = Arc::new(FakeComposerAccess::with(ComposerPath::Service, composer.clone()));
    let engine = engine_with(showing_document(), access);

    let err = engine.activate().await.unwrap_err();
    assert!(matches!(err, LaunchError::Exhausted));
    assert_eq!(composer.open_requests().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn missing_composer_reports_unavailable() {
    let engine = engine_with(showing_document(), Arc::new(FakeComposerAccess::empty()));

    let err = engine.activate().await.unwrap_err();
    assert!(matches!(err, LaunchError::ComposerUnavailable));
}

#[tokio::test(start_paused = true)]
async fn open_composer_is_closed_before_reopening() {
    let composer = Arc::new(FakeComposer::new().initially_open());
    let access = Arc::new(FakeComposerAccess::with(ComposerPath::Service, composer.clone()));
    let engine = engine_with(showing_document(), access);

    let outcome = engine.activate().await.unwrap();
    assert_eq!(outcome, LaunchOutcome::SharedDraftOpen);
    assert_eq!(composer.close_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn stale_decision_aborts_and_reverts() {
    let document = showing_document();
    let composer = Arc::new(FakeComposer::new());
    let access = Arc::new(FakeComposerAccess::with(ComposerPath::Service, composer.clone()));
    let engine = engine_with(document.clone(), access);

    engine.reconcile_now().unwrap();
    assert!(document.control(OVERRIDE_CONTROL_ID).is_some());

    // page moved on between the render and the click
    document.set_path("/c/random/12");

    let err = engine.activate().await.unwrap_err();
    assert!(matches!(err, LaunchError::StaleDecision));
    assert!(document.control(OVERRIDE_CONTROL_ID).is_none());
    assert!(document.control(CREATE_CONTROL_ID).unwrap().visible());
    assert!(composer.open_requests().is_empty());
}
