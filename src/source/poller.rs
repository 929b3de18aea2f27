//! Acquisition orchestrator: polls the five metric resources on a timer.
//!
//! A background tokio task owns the fetch loop and pushes cycle outcomes
//! through a channel; the TUI drains them without blocking on every frame.
//! Each cycle issues all five fetches concurrently under one shared cache
//! bust token and settles only when every resource resolves. A cycle that
//! fails produces nothing - the previous snapshot stays in place.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::client::MetricClient;

use super::snapshot::MetricSnapshot;

/// Events emitted by the poller, in cycle order.
#[derive(Debug)]
pub enum PollerEvent {
    /// A cycle has started; the five fetches are in flight.
    CycleStarted,
    /// All five resources resolved into a complete snapshot.
    Settled(Box<MetricSnapshot>),
    /// At least one resource failed; the cycle produced no snapshot.
    Failed(String),
}

/// Control messages accepted by the poller task.
#[derive(Debug)]
enum PollerControl {
    /// Run a cycle now.
    Refresh,
    /// Change the refresh interval. Zero disarms the timer.
    SetInterval(Duration),
}

/// Handle to a running poller task.
///
/// Dropping the handle closes the control channel and ends the task; an
/// in-flight cycle finishes and its result is discarded.
#[derive(Debug)]
pub struct PollerHandle {
    events: mpsc::Receiver<PollerEvent>,
    control: mpsc::UnboundedSender<PollerControl>,
    description: String,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl PollerHandle {
    /// Take the next pending event, if any. Non-blocking.
    pub fn poll(&mut self) -> Option<PollerEvent> {
        self.events.try_recv().ok()
    }

    /// Await the next event. Returns None once the task is gone.
    pub async fn recv(&mut self) -> Option<PollerEvent> {
        self.events.recv().await
    }

    /// Request an immediate cycle. Ignored if the task has exited; collapsed
    /// with an in-flight cycle rather than queued behind it.
    pub fn refresh(&self) {
        let _ = self.control.send(PollerControl::Refresh);
    }

    /// Change the refresh interval, re-arming the timer immediately.
    /// `Duration::ZERO` pauses automatic refresh.
    pub fn set_interval(&self, interval: Duration) {
        let _ = self.control.send(PollerControl::SetInterval(interval));
    }

    /// Returns a human-readable description of the polled endpoint.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Abort the background task. Pending fetch results are discarded.
    pub fn shutdown(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// A handle with no backing task; every poll returns None.
    ///
    /// Useful for tests that drive `App` state by hand.
    pub fn detached() -> Self {
        let (_event_tx, events) = mpsc::channel(1);
        let (control, _control_rx) = mpsc::unbounded_channel();
        Self {
            events,
            control,
            description: "detached".to_string(),
            task: None,
        }
    }
}

/// Spawns the acquisition task. Must be called within a tokio runtime.
pub struct Poller;

impl Poller {
    /// Start polling with the given client and refresh interval.
    ///
    /// One cycle runs immediately; afterwards the timer fires every
    /// `interval` unless it is zero (manual refresh only).
    pub fn spawn(client: MetricClient, interval: Duration) -> PollerHandle {
        let (event_tx, events) = mpsc::channel(16);
        let (control, control_rx) = mpsc::unbounded_channel();
        let description = format!("api: {}", client.endpoint());

        let task = tokio::spawn(run(client, interval, event_tx, control_rx));

        PollerHandle {
            events,
            control,
            description,
            task: Some(task),
        }
    }
}

/// A millisecond wall-clock token, distinct per cycle, appended to every
/// request of that cycle to defeat intermediate caches.
pub fn cycle_token() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

async fn run(
    client: MetricClient,
    mut interval: Duration,
    events: mpsc::Sender<PollerEvent>,
    mut control: mpsc::UnboundedReceiver<PollerControl>,
) {
    // First cycle runs at startup regardless of the timer.
    if run_cycle(&client, &events).await.is_err() {
        return;
    }

    loop {
        let fire = if interval.is_zero() {
            // Timer disarmed: only control messages can trigger a cycle.
            match control.recv().await {
                None => return,
                Some(PollerControl::Refresh) => true,
                Some(PollerControl::SetInterval(d)) => {
                    interval = d;
                    false
                }
            }
        } else {
            tokio::select! {
                _ = tokio::time::sleep(interval) => true,
                ctrl = control.recv() => match ctrl {
                    None => return,
                    Some(PollerControl::Refresh) => true,
                    Some(PollerControl::SetInterval(d)) => {
                        interval = d;
                        false
                    }
                },
            }
        };

        if !fire {
            continue;
        }

        if run_cycle(&client, &events).await.is_err() {
            return;
        }

        // Coalesce controls that arrived mid-cycle: interval changes still
        // apply, redundant refresh requests are dropped. Cycles never overlap.
        loop {
            match control.try_recv() {
                Ok(PollerControl::SetInterval(d)) => interval = d,
                Ok(PollerControl::Refresh) => {}
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => return,
            }
        }
    }
}

/// Run one acquisition cycle. Err means the event receiver is gone and the
/// task should exit.
async fn run_cycle(
    client: &MetricClient,
    events: &mpsc::Sender<PollerEvent>,
) -> Result<(), ()> {
    if events.send(PollerEvent::CycleStarted).await.is_err() {
        return Err(());
    }

    let token = cycle_token();
    debug!(token, "starting acquisition cycle");

    let (stats, traffic, errors, perf, consumers) = tokio::join!(
        client.fetch_stats(token),
        client.fetch_traffic(token),
        client.fetch_errors(token),
        client.fetch_perf(token),
        client.fetch_consumers(token),
    );

    let outcome = match (stats, traffic, errors, perf, consumers) {
        (Ok(stats), Ok(traffic), Ok(errors), Ok(perf), Ok(consumers)) => {
            let snapshot = MetricSnapshot::assemble(stats, traffic, errors, perf, consumers);
            debug!(entries = snapshot.entries.len(), "acquisition cycle settled");
            PollerEvent::Settled(Box::new(snapshot))
        }
        (stats, traffic, errors, perf, consumers) => {
            let message = [
                stats.err().map(|e| e.to_string()),
                traffic.err().map(|e| e.to_string()),
                errors.err().map(|e| e.to_string()),
                perf.err().map(|e| e.to_string()),
                consumers.err().map(|e| e.to_string()),
            ]
            .into_iter()
            .flatten()
            .next()
            .unwrap_or_else(|| "Failed to fetch data".to_string());
            warn!(%message, "acquisition cycle failed");
            PollerEvent::Failed(message)
        }
    };

    events.send(outcome).await.map_err(|_| ())
}
