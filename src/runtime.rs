use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};
use tracing::{debug, warn};

use crate::error::HarnessError;

/// How long `Runner::step` waits when no tick is pending
pub const IDLE_POLL: Duration = Duration::from_millis(250);

/// Unified event type consumed by the session
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    /// carries the instant the tick fired
    Tick(Instant),
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => AppEvent::Key(key),
                Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                Ok(_) => continue,
                Err(err) => {
                    warn!(%err, "terminal event reader stopped");
                    break;
                }
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that delivers input events and at most one scheduled tick
pub struct Runner<E: EventSource> {
    event_source: E,
    idle_poll: Duration,
    next_tick: Option<Instant>,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self::with_idle_poll(event_source, IDLE_POLL)
    }

    pub fn with_idle_poll(event_source: E, idle_poll: Duration) -> Self {
        Self {
            event_source,
            idle_poll,
            next_tick: None,
        }
    }

    /// Request one tick `delay` after `now`. An earlier pending request wins.
    pub fn schedule_tick(&mut self, now: Instant, delay: Duration) {
        let due = now + delay;
        self.next_tick = Some(match self.next_tick {
            Some(pending) if pending < due => pending,
            _ => due,
        });
    }

    pub fn tick_pending(&self) -> bool {
        self.next_tick.is_some()
    }

    fn take_due_tick(&mut self, now: Instant) -> Option<AppEvent> {
        match self.next_tick {
            Some(due) if due <= now => {
                self.next_tick = None;
                debug!(late_ms = now.duration_since(due).as_millis() as u64, "tick");
                Some(AppEvent::Tick(now))
            }
            _ => None,
        }
    }

    /// Blocks until the next event or the pending tick's deadline.
    /// `Ok(None)` means an idle poll elapsed with nothing to deliver.
    pub fn step(&mut self) -> Result<Option<AppEvent>, HarnessError> {
        let now = Instant::now();
        if let Some(tick) = self.take_due_tick(now) {
            return Ok(Some(tick));
        }
        let timeout = self
            .next_tick
            .map_or(self.idle_poll, |due| due.saturating_duration_since(now));

        match self.event_source.recv_timeout(timeout) {
            Ok(ev) => Ok(Some(ev)),
            Err(RecvTimeoutError::Timeout) => Ok(self.take_due_tick(Instant::now())),
            Err(RecvTimeoutError::Disconnected) => Err(HarnessError::InputClosed),
        }
    }
}
