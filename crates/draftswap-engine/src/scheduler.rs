//! Reconciliation scheduling
//!
//! One async task owns the trigger loop; there is no parallelism, so
//! correctness rests on ordering and idempotence rather than locking.
//! Three sources schedule passes:
//!
//! - startup: an immediate attempt plus bounded backoff retries, because
//!   the host renders its first page asynchronously
//! - navigation: an immediate forced revert, then a short burst of
//!   retries to catch the host's delayed re-render of the control
//! - mutations: childList records filtered to the two relevant element
//!   ids, debounced into one pass
//!
//! Overlapping deadlines collapse into a single pass, and every pass
//! re-derives the decision from live state, so a stale scheduled pass is
//! self-correcting rather than harmful. No cancellation primitive is
//! needed for the same reason.

use crate::engine::OverrideEngine;
use crate::reconcile::{ControlState, CREATE_CONTROL_ID, OVERRIDE_CONTROL_ID};
use draftswap_host::MutationRecord;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};

/// Timing knobs for the scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Delays, from now, of the startup attempt and its retries
    pub startup_retries: Vec<Duration>,
    /// Delays, from each navigation, of the catch-up burst
    pub navigation_burst: Vec<Duration>,
    /// Quiet period before a mutation-triggered pass
    pub mutation_debounce: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            startup_retries: vec![
                Duration::ZERO,
                Duration::from_millis(1000),
                Duration::from_millis(3000),
            ],
            navigation_burst: vec![
                Duration::from_millis(100),
                Duration::from_millis(300),
                Duration::from_millis(600),
            ],
            mutation_debounce: Duration::from_millis(100),
        }
    }
}

/// Event pushed into the scheduler by the host adapter.
#[derive(Debug, Clone)]
pub enum Trigger {
    /// The host's router changed pages
    Navigation,
    /// A batch of observed childList mutations
    Mutation(MutationRecord),
}

/// Cloneable sender half, handed to the host adapter.
#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    tx: mpsc::UnboundedSender<Trigger>,
}

impl SchedulerHandle {
    /// The host navigated to another page.
    pub fn notify_navigation(&self) {
        let _ = self.tx.send(Trigger::Navigation);
    }

    /// The host document mutated.
    pub fn notify_mutation(&self, record: MutationRecord) {
        let _ = self.tx.send(Trigger::Mutation(record));
    }
}

/// The trigger loop. Consume it with [`ReconciliationScheduler::run`].
pub struct ReconciliationScheduler {
    engine: Arc<OverrideEngine>,
    config: SchedulerConfig,
    rx: mpsc::UnboundedReceiver<Trigger>,
    /// Pending pass deadlines from the startup ladder and navigation bursts
    passes: Vec<Instant>,
    /// Pending mutation-debounce deadline, if any
    debounce: Option<Instant>,
}

impl ReconciliationScheduler {
    /// Build a scheduler and the handle the host adapter feeds.
    #[must_use]
    pub fn new(engine: Arc<OverrideEngine>, config: SchedulerConfig) -> (Self, SchedulerHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                engine,
                config,
                rx,
                passes: Vec::new(),
                debounce: None,
            },
            SchedulerHandle { tx },
        )
    }

    /// Run until every [`SchedulerHandle`] is dropped.
    pub async fn run(mut self) {
        let startup = self.config.startup_retries.clone();
        self.queue_ladder(&startup);

        loop {
            match self.next_deadline() {
                Some(deadline) => tokio::select! {
                    trigger = self.rx.recv() => match trigger {
                        Some(trigger) => self.handle(trigger),
                        None => break,
                    },
                    () = time::sleep_until(deadline) => self.fire(),
                },
                None => match self.rx.recv().await {
                    Some(trigger) => self.handle(trigger),
                    None => break,
                },
            }
        }
    }

    fn handle(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Navigation => {
                tracing::debug!("navigation: forced revert, then catch-up burst");
                self.engine.force_revert();
                let burst = self.config.navigation_burst.clone();
                self.queue_ladder(&burst);
            }
            Trigger::Mutation(record) => {
                if !relevant(&record) {
                    tracing::trace!(?record, "mutation not relevant to the control");
                    return;
                }
                // coalesce: an already-pending recheck covers this record
                if self.debounce.is_none() {
                    self.debounce = Some(Instant::now() + self.config.mutation_debounce);
                }
            }
        }
    }

    /// Run one pass for however many deadlines just came due.
    fn fire(&mut self) {
        let now = Instant::now();

        let pending = self.passes.len();
        self.passes.retain(|deadline| *deadline > now);
        let ladder_due = self.passes.len() != pending;

        let debounce_due = self.debounce.is_some_and(|deadline| deadline <= now);
        if debounce_due {
            self.debounce = None;
        }

        if !ladder_due && !debounce_due {
            return;
        }

        match self.engine.reconcile_now() {
            Ok(ControlState::Overridden) => {
                // settled; the rest of the ladder would be no-ops
                self.passes.clear();
            }
            Ok(ControlState::Original) => {}
            Err(err) => {
                tracing::debug!(%err, "reconciliation pass failed; ladder continues");
            }
        }
    }

    fn queue_ladder(&mut self, delays: &[Duration]) {
        let now = Instant::now();
        self.passes.extend(delays.iter().map(|delay| now + *delay));
    }

    fn next_deadline(&self) -> Option<Instant> {
        let ladder = self.passes.iter().min().copied();
        match (ladder, self.debounce) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }
}

/// Only two kinds of record can change the reconciliation outcome: the
/// original control appearing, or our override disappearing.
fn relevant(record: &MutationRecord) -> bool {
    record.added_ids.iter().any(|id| id == CREATE_CONTROL_ID)
        || record.removed_ids.iter().any(|id| id == OVERRIDE_CONTROL_ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relevance_filter() {
        assert!(relevant(&MutationRecord::added(CREATE_CONTROL_ID)));
        assert!(relevant(&MutationRecord::removed(OVERRIDE_CONTROL_ID)));

        assert!(!relevant(&MutationRecord::added("sidebar")));
        assert!(!relevant(&MutationRecord::removed(CREATE_CONTROL_ID)));
        assert!(!relevant(&MutationRecord::added(OVERRIDE_CONTROL_ID)));
        assert!(!relevant(&MutationRecord::default()));
    }

    #[test]
    fn default_config_matches_documented_timings() {
        let config = SchedulerConfig::default();
        assert_eq!(config.startup_retries.len(), 3);
        assert_eq!(config.startup_retries[0], Duration::ZERO);
        assert_eq!(config.navigation_burst.len(), 3);
        assert_eq!(config.mutation_debounce, Duration::from_millis(100));
    }
}
