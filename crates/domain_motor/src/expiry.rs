//! Expiry Watcher
//!
//! A recurring background task that reports policies whose coverage ends
//! today. Each policy is reported at most once per process lifetime.
//!
//! # State machine
//!
//! ```text
//!          tick                  pass done / failed
//!   Idle ─────────▶ Scanning ─────────────────────▶ Idle
//!    ▲                                               │
//!    └───────────────────────────────────────────────┘
//! ```
//!
//! There is no terminal state; the loop only exits when the shutdown
//! signal is observed between ticks.
//!
//! # Exactly-once notification
//!
//! The scan re-reads the same "today" on every tick until midnight. The
//! notified-set, owned by the watcher and guarded by a mutex, decides whether
//! a candidate is new: a notice is emitted only when inserting its policy id
//! succeeds. The set is in memory only and starts empty after a restart.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use core_kernel::{CarId, PolicyId, Timezone};
use crate::error::MotorError;
use crate::policy::InsurancePolicy;
use crate::ports::RecordStorePort;

/// Default time between two passes
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(5);

/// Configuration for the expiry watcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatcherConfig {
    /// Time between two passes
    pub interval: Duration,
    /// Timezone used to decide which calendar day "today" is
    pub timezone: Timezone,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_CHECK_INTERVAL,
            timezone: Timezone::default(),
        }
    }
}

/// Whether the watcher is between passes or running one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatcherState {
    Idle,
    Scanning,
}

/// Notification that a policy's coverage ends today
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryNotice {
    pub policy_id: PolicyId,
    pub car_id: CarId,
    pub end_date: NaiveDate,
}

impl ExpiryNotice {
    fn for_policy(policy: &InsurancePolicy, end_date: NaiveDate) -> Self {
        Self {
            policy_id: policy.id,
            car_id: policy.car_id,
            end_date,
        }
    }
}

/// Outcome of one successful pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    /// The day treated as "today"
    pub date: NaiveDate,
    /// Policies the store returned as ending on `date`
    pub candidates: usize,
    /// Notices emitted by this pass
    pub notices: Vec<ExpiryNotice>,
}

impl PassReport {
    /// Candidates skipped because they were already reported
    pub fn already_notified(&self) -> usize {
        self.candidates - self.notices.len()
    }
}

/// Counters accumulated over the watcher's lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatcherStats {
    pub passes: u64,
    pub failed_passes: u64,
    pub notices: u64,
}

/// Decrements the active pass counter when a pass ends, even on early return
struct ScanGuard<'a>(&'a AtomicUsize);

impl<'a> ScanGuard<'a> {
    fn enter(active: &'a AtomicUsize) -> Self {
        active.fetch_add(1, Ordering::SeqCst);
        Self(active)
    }
}

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Detects policies that end today and reports each one once
///
/// Passes may overlap if the interval is shorter than a pass; the
/// notified-set check-and-insert happens under one lock so overlapping
/// passes cannot both report the same policy.
pub struct ExpiryWatcher {
    store: Arc<dyn RecordStorePort>,
    config: WatcherConfig,
    notified: Mutex<HashSet<PolicyId>>,
    notifier: Option<mpsc::Sender<ExpiryNotice>>,
    active_passes: AtomicUsize,
    passes: AtomicU64,
    failed_passes: AtomicU64,
    notices: AtomicU64,
}

impl ExpiryWatcher {
    pub fn new(store: Arc<dyn RecordStorePort>, config: WatcherConfig) -> Self {
        Self {
            store,
            config,
            notified: Mutex::new(HashSet::new()),
            notifier: None,
            active_passes: AtomicUsize::new(0),
            passes: AtomicU64::new(0),
            failed_passes: AtomicU64::new(0),
            notices: AtomicU64::new(0),
        }
    }

    /// Forwards every notice on the given channel in addition to logging it
    ///
    /// Delivery never blocks a pass: if the channel is full or closed the
    /// notice is dropped from the channel with a warning.
    pub fn with_notifier(mut self, sender: mpsc::Sender<ExpiryNotice>) -> Self {
        self.notifier = Some(sender);
        self
    }

    pub fn config(&self) -> &WatcherConfig {
        &self.config
    }

    pub fn state(&self) -> WatcherState {
        if self.active_passes.load(Ordering::SeqCst) > 0 {
            WatcherState::Scanning
        } else {
            WatcherState::Idle
        }
    }

    pub fn stats(&self) -> WatcherStats {
        WatcherStats {
            passes: self.passes.load(Ordering::SeqCst),
            failed_passes: self.failed_passes.load(Ordering::SeqCst),
            notices: self.notices.load(Ordering::SeqCst),
        }
    }

    /// Number of policies reported so far
    pub async fn notified_count(&self) -> usize {
        self.notified.lock().await.len()
    }

    pub async fn has_notified(&self, policy_id: PolicyId) -> bool {
        self.notified.lock().await.contains(&policy_id)
    }

    /// Runs one pass for the current day in the configured timezone
    pub async fn run_pass(&self) -> Result<PassReport, MotorError> {
        self.run_pass_on(self.config.timezone.today()).await
    }

    /// Runs one pass treating `today` as the current day
    ///
    /// # Errors
    ///
    /// Returns `MotorError::Store` if the candidates cannot be read. The
    /// notified-set is left untouched in that case.
    pub async fn run_pass_on(&self, today: NaiveDate) -> Result<PassReport, MotorError> {
        let _scan = ScanGuard::enter(&self.active_passes);
        self.passes.fetch_add(1, Ordering::SeqCst);

        let candidates = match self.store.find_policies_by_end_date(today).await {
            Ok(candidates) => candidates,
            Err(e) => {
                self.failed_passes.fetch_add(1, Ordering::SeqCst);
                return Err(e.into());
            }
        };

        let notices: Vec<ExpiryNotice> = {
            let mut notified = self.notified.lock().await;
            candidates
                .iter()
                .filter(|policy| notified.insert(policy.id))
                .map(|policy| ExpiryNotice::for_policy(policy, today))
                .collect()
        };

        for notice in &notices {
            self.emit(notice);
        }
        self.notices.fetch_add(notices.len() as u64, Ordering::SeqCst);

        let report = PassReport {
            date: today,
            candidates: candidates.len(),
            notices,
        };
        debug!(
            %today,
            candidates = report.candidates,
            notified = report.notices.len(),
            "Expiry pass complete"
        );
        Ok(report)
    }

    fn emit(&self, notice: &ExpiryNotice) {
        info!(
            policy_id = %notice.policy_id,
            car_id = %notice.car_id,
            end_date = %notice.end_date,
            "Policy {} for car {} expired on {}",
            notice.policy_id,
            notice.car_id,
            notice.end_date
        );

        if let Some(sender) = &self.notifier {
            if let Err(e) = sender.try_send(notice.clone()) {
                warn!(policy_id = %notice.policy_id, error = %e, "Could not forward expiry notice");
            }
        }
    }

    /// Starts the recurring loop on the tokio runtime
    ///
    /// The first pass runs immediately, then once per interval. A failed
    /// pass is logged and the loop keeps its schedule.
    pub fn start(self: &Arc<Self>) -> WatcherHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let join = self.spawn(shutdown_rx);
        WatcherHandle { shutdown_tx, join }
    }

    /// Spawns the recurring loop, stopping when `shutdown` turns true
    ///
    /// The signal is observed between ticks; a pass in progress always
    /// finishes. Dropping the sender also stops the loop.
    pub fn spawn(self: &Arc<Self>, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        let watcher = Arc::clone(self);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(watcher.config.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            info!(
                interval_secs = watcher.config.interval.as_secs_f64(),
                timezone = watcher.config.timezone.0.name(),
                "Starting expiry watcher"
            );

            loop {
                if *shutdown.borrow() {
                    break;
                }

                tokio::select! {
                    _ = interval.tick() => {
                        if let Err(e) = watcher.run_pass().await {
                            error!(error = %e, "Expiry pass failed, waiting for next tick");
                        }
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }

            info!(stats = ?watcher.stats(), "Expiry watcher stopped");
        })
    }
}

/// Handle to a running watcher loop
#[derive(Debug)]
pub struct WatcherHandle {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl WatcherHandle {
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Signals the loop to stop and waits for it to exit
    pub async fn shutdown(self) -> Result<(), JoinError> {
        // A send error means the loop already exited
        let _ = self.shutdown_tx.send(true);
        self.join.await
    }
}
