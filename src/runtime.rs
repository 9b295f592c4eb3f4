use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// How often the main loop wakes up when no key arrives
pub const TICK_RATE_MS: u64 = 100;

/// Countdown period of a running game
pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum GameEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait GameEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<GameEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                Ok(CtEvent::Key(key)) => tx.send(GameEvent::Key(key)),
                Ok(CtEvent::Resize(_, _)) => tx.send(GameEvent::Resize),
                Ok(_) => Ok(()),
                Err(err) => {
                    tracing::warn!("terminal event reader stopped: {err}");
                    break;
                }
            };
            if forwarded.is_err() {
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

impl GameEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE_MS))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<GameEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }
}

impl GameEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: GameEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: GameEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> GameEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => GameEvent::Tick,
        }
    }
}

/// Handle to a recurring timer started through [`Timer::start`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Recurring timer owned by a game session.
///
/// Cancelling a handle that is no longer active does nothing.
pub trait Timer {
    fn start(&mut self, period: Duration) -> TimerId;
    fn cancel(&mut self, id: TimerId);
}

#[derive(Debug, Clone, Copy)]
struct Schedule {
    id: TimerId,
    period: Duration,
    next_due: Instant,
}

/// Wall-clock timer polled by the main loop; at most one schedule is active
#[derive(Debug, Default)]
pub struct IntervalTimer {
    next_id: u64,
    active: Option<Schedule>,
}

impl IntervalTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_at(&mut self, period: Duration, now: Instant) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.active = Some(Schedule {
            id,
            period,
            next_due: now + period,
        });
        id
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Number of whole periods that elapsed since the last poll
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let Some(schedule) = self.active.as_mut() else {
            return 0;
        };
        if schedule.period.is_zero() {
            return 0;
        }
        let mut fired = 0;
        while now >= schedule.next_due {
            schedule.next_due += schedule.period;
            fired += 1;
        }
        fired
    }
}

impl Timer for IntervalTimer {
    fn start(&mut self, period: Duration) -> TimerId {
        self.start_at(period, Instant::now())
    }

    fn cancel(&mut self, id: TimerId) {
        if self.active.is_some_and(|s| s.id == id) {
            self.active = None;
        }
    }
}

/// Timer that never fires on its own; tests call `GameSession::tick` directly
#[derive(Debug, Default)]
pub struct ManualTimer {
    next_id: u64,
    pub active: Option<TimerId>,
    pub starts: usize,
    pub cancels: usize,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Timer for ManualTimer {
    fn start(&mut self, _period: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.starts += 1;
        self.active = Some(id);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if self.active == Some(id) {
            self.active = None;
            self.cancels += 1;
        }
    }
}
