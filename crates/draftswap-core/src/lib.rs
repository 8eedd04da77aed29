//! DraftSwap Core - domain logic for the shared-draft button override
//!
//! Everything in this crate is pure and synchronous:
//! - Settings resolution from prioritized partial sources
//! - Category detection over an ephemeral page-context snapshot
//! - Access gating from user/session facts
//! - The tri-state show/hide/unknown decision
//!
//! Host traits, DOM mutation, and scheduling live in the sibling crates;
//! this one can be tested with plain values.

#![warn(unreachable_pub)]

pub mod context;
pub mod decision;
pub mod detect;
pub mod gate;
pub mod settings;

pub use context::{CategoryId, PageContext};
pub use decision::{decide, Decision};
pub use detect::detect;
pub use gate::{permitted, UserFacts};
pub use settings::{resolve, Settings, SettingsSource};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
