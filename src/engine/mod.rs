//! The request reconciliation engine.
//!
//! Polls the request source on a fixed delay, merges what it finds into
//! local state, fires the arrival effect exactly once per new request, and
//! submits manager decisions one at a time. Renderers observe the result
//! through a `watch` channel of `Snapshot`s.
//!
//! Each cycle:
//! 1. Fetch resolved requests; on success overwrite the local cache.
//! 2. Fetch pending requests; on failure stop here.
//! 3. Drop local pending items the source no longer lists.
//! 4. Admit unseen items oldest first, each at the top of the list.
//! 5. Fire the arrival effect for each admitted item.

pub mod decision;
pub mod dedup;
pub mod error;
pub mod reconcile;
pub mod state;

use crate::effect::NotificationEffect;
use crate::source::{RequestSource, SourceError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub use dedup::DedupTracker;
pub use error::{DecisionError, EngineError};
pub use state::{LocalState, Snapshot};

/// Poll cadence used when none is configured.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Static settings for one engine instance.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Venue whose requests are tracked
    pub venue_id: String,
    /// Delay between the end of one cycle and the start of the next
    pub poll_interval: Duration,
}

impl EngineOptions {
    pub fn new(venue_id: impl Into<String>) -> Self {
        Self {
            venue_id: venue_id.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

/// Outcome of a single reconciliation cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// The resolved view was fetched and applied
    pub resolved_ok: bool,
    /// The pending view was fetched and reconciled
    pub pending_ok: bool,
    /// Ids admitted this cycle, in admission order
    pub admitted: Vec<String>,
}

/// Handle to a running or idle engine. Cheap to clone; all clones share state.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<Inner>,
}

struct Inner {
    options: EngineOptions,
    source: Arc<dyn RequestSource>,
    effect: Arc<dyn NotificationEffect>,
    state: Mutex<LocalState>,
    /// Held for the whole of a cycle so cycles never overlap
    cycle_lock: Mutex<()>,
    in_flight: AtomicBool,
    snapshot_tx: watch::Sender<Snapshot>,
    task: Mutex<Option<PollTask>>,
}

struct PollTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Engine {
    pub fn new(
        options: EngineOptions,
        source: Arc<dyn RequestSource>,
        effect: Arc<dyn NotificationEffect>,
    ) -> Self {
        let (snapshot_tx, _) = watch::channel(Snapshot::default());
        Self {
            inner: Arc::new(Inner {
                options,
                source,
                effect,
                state: Mutex::new(LocalState::default()),
                cycle_lock: Mutex::new(()),
                in_flight: AtomicBool::new(false),
                snapshot_tx,
                task: Mutex::new(None),
            }),
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.inner.options
    }

    /// Start the background poll loop. The first cycle runs immediately.
    pub async fn start(&self) -> Result<(), EngineError> {
        let mut task = self.inner.task.lock().await;
        if task.as_ref().is_some_and(|t| !t.handle.is_finished()) {
            return Err(EngineError::AlreadyRunning);
        }

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(poll_loop(
            Arc::downgrade(&self.inner),
            self.inner.options.poll_interval,
            cancel.clone(),
        ));
        *task = Some(PollTask { cancel, handle });
        Ok(())
    }

    /// Stop the poll loop, interrupting a cycle in progress, and wait for it to exit.
    /// Local state is kept. Stopping an idle engine is a no-op.
    pub async fn stop(&self) {
        let task = self.inner.task.lock().await.take();
        if let Some(task) = task {
            task.cancel.cancel();
            if let Err(e) = task.handle.await {
                tracing::error!("Poll loop ended abnormally: {}", e);
            }
        }
    }

    pub async fn is_running(&self) -> bool {
        self.inner
            .task
            .lock()
            .await
            .as_ref()
            .is_some_and(|t| !t.handle.is_finished())
    }

    /// Run one reconciliation cycle now. Waits for any cycle already in progress.
    pub async fn run_cycle(&self) -> CycleReport {
        self.inner.run_cycle().await
    }

    /// Current view of pending, resolved and in-flight state.
    pub fn snapshot(&self) -> Snapshot {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// Receiver notified whenever the snapshot actually changes.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    pub fn is_in_flight(&self) -> bool {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    /// Number of distinct request ids admitted since the engine was created.
    pub async fn seen_count(&self) -> usize {
        self.inner.state.lock().await.seen.len()
    }
}

impl Inner {
    async fn run_cycle(&self) -> CycleReport {
        let _cycle = self.cycle_lock.lock().await;
        let venue_id = self.options.venue_id.as_str();
        let mut report = CycleReport::default();

        match self.source.fetch_resolved(venue_id).await {
            Ok(resolved) => {
                let mut state = self.state.lock().await;
                reconcile::replace_resolved(&mut state, resolved);
                self.publish(&state);
                report.resolved_ok = true;
            }
            Err(e) => log_fetch_failure("resolved", &e),
        }

        let fetched = match self.source.fetch_pending(venue_id).await {
            Ok(fetched) => fetched,
            Err(e) => {
                log_fetch_failure("pending", &e);
                return report;
            }
        };

        let admitted = {
            let mut state = self.state.lock().await;
            let admitted = reconcile::reconcile_pending(&mut state, fetched);
            self.publish(&state);
            if state.pending.is_empty() {
                tracing::debug!("Nothing pending for venue {}", venue_id);
            }
            admitted
        };
        report.pending_ok = true;

        for request in &admitted {
            tracing::info!("New {} {}", request.kind.label(), request.id);
            if let Err(e) = self.effect.on_admitted(request) {
                tracing::warn!("Arrival effect failed for {}: {:#}", request.id, e);
            }
        }
        report.admitted = admitted.into_iter().map(|r| r.id).collect();
        report
    }

    /// Push the current state to subscribers if it differs from what they last saw.
    fn publish(&self, state: &LocalState) {
        let mut next = Snapshot {
            pending: state.pending.clone(),
            resolved: state.resolved.clone(),
            in_flight: false,
        };
        self.snapshot_tx.send_if_modified(|current| {
            next.in_flight = self.in_flight.load(Ordering::SeqCst);
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    fn publish_in_flight(&self, in_flight: bool) {
        self.snapshot_tx.send_if_modified(|current| {
            if current.in_flight == in_flight {
                false
            } else {
                current.in_flight = in_flight;
                true
            }
        });
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.cancel.cancel();
        }
    }
}

/// Fixed-delay loop: the next cycle is scheduled only after the previous one finishes.
async fn poll_loop(engine: Weak<Inner>, interval: Duration, cancel: CancellationToken) {
    tracing::info!("Reconciliation loop started (every {:?})", interval);

    loop {
        let Some(inner) = engine.upgrade() else {
            break;
        };
        tokio::select! {
            _ = cancel.cancelled() => break,
            report = inner.run_cycle() => {
                tracing::trace!(
                    "Cycle done: resolved_ok={} pending_ok={} admitted={}",
                    report.resolved_ok,
                    report.pending_ok,
                    report.admitted.len()
                );
            }
        }
        drop(inner);

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    tracing::info!("Reconciliation loop stopped");
}

/// Poll failures are retried next cycle; they are logged, never shown to the manager.
fn log_fetch_failure(view: &str, error: &SourceError) {
    if error.is_transient() {
        tracing::warn!("Failed to fetch {} requests (will retry): {}", view, error);
    } else {
        tracing::error!("Failed to fetch {} requests: {}", view, error);
    }
}
