//! Composer (authoring surface) seams

use crate::error::HostError;
use async_trait::async_trait;
use draftswap_core::CategoryId;
use std::sync::Arc;

/// Open mode requested from the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerAction {
    /// The host's default "create topic" mode
    CreateTopic,
    /// Shared-draft mode: the result is staged for staff review
    CreateSharedDraft,
}

/// Parameters for opening the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    /// Requested open mode
    pub action: ComposerAction,
    /// Unique draft key so concurrent drafts do not collide
    pub draft_key: String,
    /// Content archetype, `regular` for plain topics
    pub archetype: String,
    /// Destination category
    pub category: Option<CategoryId>,
}

/// Model fields set best-effort after a default-mode open, covering the
/// naming variants different host versions understand.
pub const SHARED_DRAFT_FIELDS: [&str; 3] = ["is_shared_draft", "shared_draft", "sharedDraft"];

/// The composer model produced by a successful open.
pub trait ComposerModel: Send + Sync {
    /// Set a named field on the model.
    ///
    /// # Errors
    /// Fails when the host model rejects the field; callers treat that as
    /// advisory, not fatal.
    fn set_field(&self, name: &str, value: serde_json::Value) -> Result<(), HostError>;
}

/// Handle to the host's authoring surface.
#[async_trait]
pub trait Composer: Send + Sync {
    /// Whether the composer currently has a model open
    fn is_open(&self) -> bool;

    /// Close the current model, if any
    fn close(&self);

    /// Directly create a shared draft, where the host exposes that
    /// capability.
    ///
    /// # Errors
    /// `HostError::Unsupported` on hosts without the capability; any other
    /// error means the attempt ran and failed.
    fn create_shared_draft(&self) -> Result<(), HostError>;

    /// Open the composer with explicit parameters.
    ///
    /// # Errors
    /// An asynchronous rejection from the host, e.g. an unrecognized
    /// action or a failed permission re-check on the host side.
    async fn open(&self, request: OpenRequest) -> Result<Arc<dyn ComposerModel>, HostError>;
}

/// One probe path for acquiring the composer handle.
///
/// Host versions differ in where the composer lives; the launch sequence
/// tries these in [`COMPOSER_LOOKUP_ORDER`] and takes the first hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerPath {
    /// The application controller's composer property
    AppController,
    /// The registered composer service
    Service,
    /// The legacy composer controller
    Controller,
}

/// Probe order: newest lookup path first, legacy path last.
pub const COMPOSER_LOOKUP_ORDER: [ComposerPath; 3] = [
    ComposerPath::AppController,
    ComposerPath::Service,
    ComposerPath::Controller,
];

/// Resolver from a probe path to a composer handle.
///
/// Implementations must swallow their own lookup failures and return
/// `None`; a panicking or erroring probe would abort the chain, and the
/// chain exists precisely because individual probes are unreliable.
pub trait ComposerAccess: Send + Sync {
    /// Attempt one lookup path.
    fn lookup(&self, path: ComposerPath) -> Option<Arc<dyn Composer>>;
}
