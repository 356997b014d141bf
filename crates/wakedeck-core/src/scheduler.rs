// ── Refresh scheduler ──
//
// Two-state scan machine (Idle / Scanning) plus the periodic reload
// timer. At most one scan is in flight per scheduler, and a periodic
// tick never reloads while a scan is running.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use strum::Display;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::client::OperationClient;
use crate::error::CoreError;

/// Scan state. There is no terminal state; the scheduler lives until
/// its session is torn down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display)]
pub enum ScanState {
    #[default]
    Idle,
    Scanning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Completed { devices_found: u64 },
    /// Another scan was in flight; nothing was sent.
    AlreadyRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Reloaded,
    /// A scan was running; the tick was dropped.
    Skipped,
}

/// Holds `Scanning` for as long as it lives.
///
/// Dropping the guard returns the machine to `Idle`, whichever way the
/// scan finished.
struct ScanGuard<'a> {
    state: &'a watch::Sender<ScanState>,
}

impl<'a> ScanGuard<'a> {
    fn acquire(state: &'a watch::Sender<ScanState>) -> Option<Self> {
        let acquired = state.send_if_modified(|s| {
            if *s == ScanState::Idle {
                *s = ScanState::Scanning;
                true
            } else {
                false
            }
        });
        acquired.then_some(Self { state })
    }
}

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        self.state.send_replace(ScanState::Idle);
    }
}

/// Single-flight scan control and periodic reloads for one session.
///
/// Cheaply cloneable; clones share the same state machine.
#[derive(Clone)]
pub struct RefreshScheduler {
    inner: Arc<SchedulerInner>,
}

struct SchedulerInner {
    client: Arc<OperationClient>,
    state: watch::Sender<ScanState>,
    interval: Duration,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl RefreshScheduler {
    pub fn new(client: Arc<OperationClient>, interval: Duration) -> Self {
        let (state, _) = watch::channel(ScanState::Idle);
        Self {
            inner: Arc::new(SchedulerInner {
                client,
                state,
                interval,
                cancel: CancellationToken::new(),
                task: Mutex::new(None),
            }),
        }
    }

    pub fn state(&self) -> ScanState {
        *self.inner.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<ScanState> {
        self.inner.state.subscribe()
    }

    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Start a scan unless one is already running.
    ///
    /// The machine is `Scanning` from the moment this is accepted until
    /// the scan and its follow-up reload resolve, success or failure.
    pub async fn scan(&self) -> Result<ScanOutcome, CoreError> {
        let Some(_guard) = ScanGuard::acquire(&self.inner.state) else {
            debug!("scan already in progress, ignoring request");
            return Ok(ScanOutcome::AlreadyRunning);
        };

        let devices_found = self.inner.client.scan().await?;
        Ok(ScanOutcome::Completed { devices_found })
    }

    /// One periodic tick: reload while `Idle`, do nothing while `Scanning`.
    pub async fn tick(&self) -> TickOutcome {
        tick_once(&self.inner.client, &self.inner.state.subscribe()).await
    }

    /// Manual refresh. Allowed in any state and does not touch the
    /// state machine.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        self.inner.client.load().await.map(|_| ())
    }

    // ── Timer lifecycle ──────────────────────────────────────────────

    /// Spawn the periodic reload task. Calling this twice is a no-op.
    ///
    /// A zero interval disables the timer.
    pub fn start(&self) {
        if self.inner.interval.is_zero() {
            debug!("periodic refresh disabled");
            return;
        }

        let Ok(mut task) = self.inner.task.lock() else {
            return;
        };
        if task.is_some() {
            return;
        }

        info!(interval_secs = self.inner.interval.as_secs(), "starting periodic refresh");
        *task = Some(tokio::spawn(refresh_task(
            Arc::clone(&self.inner.client),
            self.inner.state.subscribe(),
            self.inner.interval,
            self.inner.cancel.clone(),
        )));
    }

    /// Cancel the timer and wait for the task to exit.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        let handle = self.inner.task.lock().ok().and_then(|mut t| t.take());
        if let Some(handle) = handle {
            let _ = handle.await;
        }
        debug!("refresh scheduler stopped");
    }
}

impl Drop for SchedulerInner {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn tick_once(client: &OperationClient, state: &watch::Receiver<ScanState>) -> TickOutcome {
    if *state.borrow() == ScanState::Scanning {
        debug!("scan in progress, skipping periodic refresh");
        return TickOutcome::Skipped;
    }
    // Failures are notified by the client; the timer keeps running.
    let _ = client.load().await;
    TickOutcome::Reloaded
}

/// Periodic reload loop. Holds only the client and a state receiver, so
/// dropping the last scheduler handle cancels it.
async fn refresh_task(
    client: Arc<OperationClient>,
    state: watch::Receiver<ScanState>,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                tick_once(&client, &state).await;
            }
        }
    }
}
