//! Testing utilities for the DraftSwap workspace
//!
//! In-memory implementations of every host seam, scriptable enough to
//! exercise the reconciler, the launch chain, and the scheduler without a
//! browser. Shared by unit and integration tests.

#![allow(missing_docs)]

pub mod composer;
pub mod document;
pub mod session;

pub use composer::{FakeComposer, FakeComposerAccess, FakeModel};
pub use document::{ControlSnapshot, FakeControl, FakeDocument};
pub use session::FakeSession;

/// Install a test-friendly tracing subscriber; repeated calls are no-ops.
pub fn init_test_logging() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
