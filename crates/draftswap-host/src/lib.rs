//! DraftSwap Host - the narrow contract with the surrounding application
//!
//! The engine never touches a real DOM, router, or composer; it sees the
//! host exclusively through the traits here. A production adapter
//! implements them over the host's document and container; the testkit
//! implements them in memory. Keeping this surface small is what makes the
//! reconciliation logic testable without a browser.

#![warn(unreachable_pub)]

pub mod composer;
pub mod document;
pub mod error;
pub mod session;

pub use composer::{
    Composer, ComposerAccess, ComposerAction, ComposerModel, ComposerPath, OpenRequest,
    COMPOSER_LOOKUP_ORDER, SHARED_DRAFT_FIELDS,
};
pub use document::{Activation, Control, DocumentView, MutationRecord, PageLocation};
pub use error::HostError;
pub use session::UserSession;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
