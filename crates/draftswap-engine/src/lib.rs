//! DraftSwap Engine - keeps the override button correct on a live page
//!
//! The engine owns one resolved [`Settings`](draftswap_core::Settings) value
//! and the host seams, and exposes three operations:
//!
//! - [`OverrideEngine::reconcile_now`]: one detect → decide → apply/revert
//!   pass over the live control, idempotent under repetition
//! - [`OverrideEngine::activate`]: the user clicked the override — re-verify,
//!   then walk the composer launch fallback chain
//! - [`ReconciliationScheduler::run`]: the trigger loop that re-runs
//!   reconciliation at startup, after navigations, and on relevant document
//!   mutations
//!
//! # Example
//!
//! ```rust,ignore
//! use draftswap_core::{resolve, SettingsSource};
//! use draftswap_engine::{OverrideEngine, ReconciliationScheduler, SchedulerConfig};
//!
//! let settings = resolve(&[SettingsSource::from_value(&host_settings)]);
//! let engine = Arc::new(OverrideEngine::new(settings, document, session, composers));
//! let (scheduler, handle) = ReconciliationScheduler::new(engine, SchedulerConfig::default());
//! tokio::spawn(scheduler.run());
//! // host adapter: on_navigate(|| handle.notify_navigation()) etc.
//! ```

#![warn(unreachable_pub)]

pub mod engine;
pub mod error;
pub mod launch;
pub mod reconcile;
pub mod scheduler;

pub use engine::OverrideEngine;
pub use error::{LaunchError, ReconcileError};
pub use launch::LaunchOutcome;
pub use reconcile::{
    ControlState, CREATE_CONTROL_ID, HIDDEN_MARKER, OVERRIDE_CONTROL_ID,
};
pub use scheduler::{ReconciliationScheduler, SchedulerConfig, SchedulerHandle, Trigger};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for embedding the engine in a host adapter
    pub use crate::{
        ControlState, LaunchError, LaunchOutcome, OverrideEngine, ReconcileError,
        ReconciliationScheduler, SchedulerConfig, SchedulerHandle,
    };
    pub use draftswap_core::{decide, detect, resolve, Decision, Settings, SettingsSource};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
