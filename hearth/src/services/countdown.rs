use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::watch;
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::analytics::Countdown;

/// Source of "now" for anything time-dependent.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.now.write() {
            *guard = now;
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        if let Ok(mut guard) = self.now.write() {
            *guard += by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        match self.now.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Publishes a once-per-second countdown to a target instant.
///
/// At most one timer runs at a time. Readings go out on a watch channel,
/// `None` until the first timer publishes.
pub struct CountdownTicker {
    clock: Arc<dyn Clock>,
    tx: Arc<watch::Sender<Option<Countdown>>>,
    generation: Arc<AtomicU64>,
    cancel: Option<CancellationToken>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl CountdownTicker {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            clock,
            tx: Arc::new(tx),
            generation: Arc::new(AtomicU64::new(0)),
            cancel: None,
            handle: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Countdown>> {
        self.tx.subscribe()
    }

    /// Latest published reading.
    pub fn current(&self) -> Option<Countdown> {
        *self.tx.borrow()
    }

    /// Start counting down to `target`, cancelling any running timer.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&mut self, target: DateTime<Utc>) {
        self.stop();

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let cancel = CancellationToken::new();

        let task = TickerTask {
            clock: self.clock.clone(),
            tx: self.tx.clone(),
            generation,
            current: self.generation.clone(),
            target,
        };
        self.handle = Some(tokio::spawn(task.run(cancel.clone())));
        self.cancel = Some(cancel);
        debug!(%target, generation, "Countdown started");
    }

    pub fn stop(&mut self) {
        // retire the running generation first so a tick already in flight
        // cannot publish after this returns
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
        self.handle = None;
    }

    /// Whether the current timer task is still alive.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

struct TickerTask {
    clock: Arc<dyn Clock>,
    tx: Arc<watch::Sender<Option<Countdown>>>,
    generation: u64,
    current: Arc<AtomicU64>,
    target: DateTime<Utc>,
}

impl TickerTask {
    async fn run(self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(generation = self.generation, "Countdown cancelled");
                    break;
                }
                _ = interval.tick() => {
                    let countdown = Countdown::until(self.target, self.clock.now());
                    if !self.publish(countdown) {
                        break;
                    }
                    if countdown.is_started() {
                        debug!(generation = self.generation, "Countdown reached start");
                        break;
                    }
                }
            }
        }
    }

    /// Returns false once a newer timer has taken over.
    fn publish(&self, countdown: Countdown) -> bool {
        let mut live = true;
        self.tx.send_if_modified(|value| {
            // checked under the channel lock so a superseded timer never
            // overwrites a newer reading
            if self.current.load(Ordering::SeqCst) != self.generation {
                live = false;
                return false;
            }
            *value = Some(countdown);
            true
        });
        live
    }
}
