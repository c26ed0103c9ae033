//! The central **abstraction** for bus scanning.
//!
//! A [`Scanner`] owns the run lifecycle: it plans the work, launches the scan on
//! a background tokio task, accounts progress and collects discovered devices.
//! What is scanned is decided by its [`ScanStrategy`]:
//!
//! * [`net::NetworkScan`] walks every host of the local subnets.
//! * [`serial::SerialScan`] finds the line speed first, then sweeps every unit.
//!
//! Callers poll the scanner ([`Scanner::running`], [`Scanner::done`],
//! [`Scanner::total`], [`Scanner::devices`]) and may [`Scanner::stop`] it at any
//! time. Stopping is cooperative: the next progress report of the running batch
//! answers with [`ControlFlow::Break`] and the strategy unwinds from there.
//!
//! Every run gets its own [`ScanState`], so a batch still draining after `stop()`
//! can never leak progress into the next run.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use modscan_common::device::Device;
use modscan_common::{info, warn};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::engine::Progress;

pub mod net;
pub mod serial;

const IDLE: u8 = 0;
const RUNNING: u8 = 1;
const FINISHED: u8 = 2;

/// Shared state of one scan run.
pub struct ScanState {
    run_state: AtomicU8,
    total: AtomicU64,
    done: AtomicU64,
    devices: Mutex<Vec<Device>>,
}

/// Point-in-time copy of a scan's state, for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSnapshot {
    pub running: Option<bool>,
    pub done: u64,
    pub total: u64,
    pub devices: Vec<Device>,
}

impl ScanState {
    fn idle() -> Self {
        Self {
            run_state: AtomicU8::new(IDLE),
            total: AtomicU64::new(0),
            done: AtomicU64::new(0),
            devices: Mutex::new(Vec::new()),
        }
    }

    fn started(total: u64) -> Self {
        let state = Self::idle();
        state.total.store(total, Ordering::Relaxed);
        state.run_state.store(RUNNING, Ordering::Release);
        state
    }

    /// `None` before the first start, then whether the scan is still going.
    pub fn running(&self) -> Option<bool> {
        match self.run_state.load(Ordering::Acquire) {
            IDLE => None,
            state => Some(state == RUNNING),
        }
    }

    pub fn is_running(&self) -> bool {
        self.run_state.load(Ordering::Acquire) == RUNNING
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    pub fn done(&self) -> u64 {
        self.done.load(Ordering::Relaxed)
    }

    pub fn devices(&self) -> Vec<Device> {
        lock(&self.devices).clone()
    }

    pub fn snapshot(&self) -> ScanSnapshot {
        ScanSnapshot {
            running: self.running(),
            done: self.done(),
            total: self.total(),
            devices: self.devices(),
        }
    }

    /// Marks the run finished. Idempotent, and a no-op before the first start.
    fn finish(&self) {
        let _ = self
            .run_state
            .compare_exchange(RUNNING, FINISHED, Ordering::AcqRel, Ordering::Acquire);
    }
}

impl Progress for ScanState {
    fn progress(&self, n: u64, device: Option<Device>) -> ControlFlow<()> {
        if !self.is_running() {
            return ControlFlow::Break(());
        }

        self.done.fetch_add(n, Ordering::Relaxed);

        if let Some(device) = device {
            lock(&self.devices).push(device);
        }

        ControlFlow::Continue(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// What to scan and how.
#[async_trait]
pub trait ScanStrategy: Send + Sync + 'static {
    /// Work computed up front by [`ScanStrategy::prepare`] and consumed by the scan.
    type Plan: Send + 'static;

    /// Computes the expected unit count and the plan, or `None` when there is
    /// nothing to scan.
    fn prepare(&self) -> Option<(u64, Self::Plan)>;

    /// Runs the scan. `Break` means the scan was stopped through `state`.
    async fn scan(&self, plan: Self::Plan, state: &ScanState) -> anyhow::Result<ControlFlow<()>>;
}

pub struct Scanner<S: ScanStrategy> {
    strategy: Arc<S>,
    state: Mutex<Arc<ScanState>>,
    task: tokio::sync::Mutex<Option<JoinHandle<()>>>,
}

impl<S: ScanStrategy> Scanner<S> {
    pub fn with_strategy(strategy: S) -> Self {
        Self {
            strategy: Arc::new(strategy),
            state: Mutex::new(Arc::new(ScanState::idle())),
            task: tokio::sync::Mutex::new(None),
        }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Launches a scan on a background task.
    ///
    /// Returns `false` without touching the current state when the previous
    /// run's task has not exited yet (even after `stop()`), when there is no
    /// tokio runtime, or when the strategy finds nothing to scan.
    pub fn start(&self) -> bool {
        // Held until the new handle is stored. Busy while another start or a
        // join holds it.
        let Ok(mut task) = self.task.try_lock() else {
            warn!("Scan already in progress");
            return false;
        };

        let busy: bool = task.as_ref().is_some_and(|handle| !handle.is_finished());
        if busy || self.current().is_running() {
            warn!("Scan already in progress");
            return false;
        }

        let Ok(runtime) = Handle::try_current() else {
            warn!("Cannot start a scan outside of a tokio runtime");
            return false;
        };

        let Some((total, plan)) = self.strategy.prepare() else {
            return false;
        };

        let state: Arc<ScanState> = Arc::new(ScanState::started(total));
        *lock(&self.state) = state.clone();

        *task = Some(runtime.spawn(run(self.strategy.clone(), plan, state)));
        true
    }

    /// Requests cancellation of the running scan. In-flight probes finish on
    /// their own; their reports are discarded.
    pub fn stop(&self) {
        self.current().finish();
    }

    /// Waits for the background task of the last run to exit.
    pub async fn join(&self) {
        let mut task = self.task.lock().await;
        if let Some(handle) = task.as_mut() {
            let _ = handle.await;
        }
        *task = None;
    }

    pub fn running(&self) -> Option<bool> {
        self.current().running()
    }

    pub fn done(&self) -> u64 {
        self.current().done()
    }

    pub fn total(&self) -> u64 {
        self.current().total()
    }

    pub fn devices(&self) -> Vec<Device> {
        self.current().devices()
    }

    pub fn snapshot(&self) -> ScanSnapshot {
        self.current().snapshot()
    }

    fn current(&self) -> Arc<ScanState> {
        lock(&self.state).clone()
    }
}

/// Body of the background task. Never fails: errors and panics of the strategy
/// are logged and the run is always marked finished.
async fn run<S: ScanStrategy>(strategy: Arc<S>, plan: S::Plan, state: Arc<ScanState>) {
    let scan_state = state.clone();
    let outcome = tokio::spawn(async move { strategy.scan(plan, &scan_state).await }).await;

    match outcome {
        Ok(Ok(ControlFlow::Continue(()))) => info!("Scan complete"),
        Ok(Ok(ControlFlow::Break(()))) => info!("Scan aborted"),
        Ok(Err(e)) => warn!("Exception during bus scan: {e:?}"),
        Err(e) => warn!("Bus scan task died: {e}"),
    }

    state.finish();
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
