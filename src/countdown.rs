//! Countdown component for Bubble Tea applications.
//!
//! This module provides a countdown timer that tracks remaining time from
//! wall-clock samples rather than by subtracting the tick interval on each
//! update. Every tick recomputes `remaining = duration - (now - anchor)`
//! from an anchor instant fixed when the countdown (re)starts, so a tick
//! that arrives late simply catches up to the correct value instead of
//! drifting behind real time.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_countdown::countdown::{new, RunState};
//!
//! // A five-minute countdown, idle until started.
//! let mut countdown = new(5);
//! assert_eq!(countdown.run_state(), RunState::Idle);
//! assert_eq!(countdown.view(), "05:00");
//!
//! // The same call starts, pauses, and resumes.
//! let cmd = countdown.toggle_start();
//! assert!(cmd.is_some());
//! assert!(countdown.running());
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_countdown::countdown::{new, CompletedMsg, Model as Countdown};
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//!
//! struct App {
//!     countdown: Countdown,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut countdown = new(25);
//!         let cmd = countdown.toggle_start();
//!         (Self { countdown }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(done) = msg.downcast_ref::<CompletedMsg>() {
//!             if done.id == self.countdown.id() {
//!                 // Countdown reached zero.
//!             }
//!         }
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("Time remaining: {}", self.countdown.view())
//!     }
//! }
//! ```
//!
//! # Pause and Resume
//!
//! Pausing snapshots the last observed remaining time; resuming re-derives
//! the anchor from that snapshot, so no time is lost or gained across the
//! transition no matter how long the countdown sat paused.

use crate::clock::{Clock, SystemClock};
use crate::format::format_time;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

const MS_PER_MINUTE: u64 = 60_000;

/// Default cadence at which the countdown republishes its remaining time.
///
/// 100ms keeps a `MM:SS` display visually fresh without burning cycles.
/// Use [`new_with_interval`] to pick a different cadence.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

// Internal ID management for countdown instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Generates unique identifiers for countdown instances.
///
/// IDs let several countdowns coexist in one application without processing
/// each other's messages. Generated atomically, starting from 1.
fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Message delivered on every scheduled tick of a running countdown.
///
/// Ticks are routed by the countdown's unique `id` and by a private
/// generation tag. Pausing, resetting, tearing down, or completing bumps
/// the generation, so a tick scheduled before any of those events fails the
/// tag check and is discarded — a cancelled tick can never resurrect a
/// superseded run.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The unique identifier of the countdown this tick belongs to.
    pub id: i64,
    /// Generation of the running interval that scheduled this tick.
    tag: i64,
}

/// Message sent exactly once when a countdown reaches zero.
///
/// Emitted in addition to the optional completion callback (see
/// [`Model::with_on_complete`]), so message-driven applications can react
/// to completion without registering a closure.
#[derive(Debug, Clone)]
pub struct CompletedMsg {
    /// The unique identifier of the countdown that completed.
    pub id: i64,
}

/// The lifecycle state of a countdown.
///
/// ```text
/// Idle --toggle_start--> Running
/// Running --toggle_start--> Paused
/// Paused --toggle_start--> Running
/// Running --(remaining == 0, tick)--> Completed
/// Completed --toggle_start--> Running   (fresh restart at full duration)
/// any state --reset--> Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Fresh countdown; remaining time equals the full duration.
    Idle,
    /// Counting down; an anchor instant is held and ticks are scheduled.
    Running,
    /// Halted mid-run; the last observed remaining time is preserved.
    Paused,
    /// Reached zero. `toggle_start` restarts from the full duration.
    Completed,
}

/// Countdown timer component.
///
/// The model owns its full state explicitly: the immutable duration, the
/// externally visible remaining time, the paused-remaining snapshot, and —
/// only while running — the anchor instant that elapsed time is measured
/// from. Exactly one of the anchor and the snapshot is authoritative at any
/// moment: the anchor while [`RunState::Running`], the snapshot otherwise.
///
/// All operations run synchronously inside the bubbletea update loop; there
/// is no internal locking and no operation can fail.
///
/// # Examples
///
/// ```rust
/// use bubbletea_countdown::countdown::{new, RunState};
/// use std::time::Duration;
///
/// let mut countdown = new(1);
/// assert_eq!(countdown.duration(), Duration::from_secs(60));
/// assert_eq!(countdown.time_left(), Duration::from_secs(60));
///
/// // Starting and immediately toggling again pauses with nothing elapsed.
/// countdown.toggle_start();
/// countdown.toggle_start();
/// assert_eq!(countdown.run_state(), RunState::Paused);
/// assert_eq!(countdown.time_left(), Duration::from_secs(60));
/// ```
#[derive(Clone)]
pub struct Model {
    /// Total countdown length, fixed at construction.
    duration: Duration,
    /// Time between ticks while running.
    interval: Duration,
    /// The externally visible remaining time; updated on every tick and on
    /// every state transition.
    remaining: Duration,
    /// Last observed remaining time; authoritative whenever not running.
    paused_remaining: Duration,
    /// Instant the countdown effectively started, net of paused stretches.
    /// Present exactly while running.
    anchor: Option<Instant>,
    state: RunState,
    id: i64,
    /// Generation of the current running interval; bumping it cancels any
    /// tick still in flight.
    tag: i64,
    clock: Arc<dyn Clock>,
    on_complete: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("duration", &self.duration)
            .field("interval", &self.interval)
            .field("remaining", &self.remaining)
            .field("paused_remaining", &self.paused_remaining)
            .field("anchor", &self.anchor)
            .field("state", &self.state)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Creates a countdown for the given number of minutes with the default
/// 100ms tick interval.
///
/// The countdown starts in [`RunState::Idle`] with its full duration
/// remaining; call [`Model::toggle_start`] to begin. A zero-minute
/// countdown is accepted and completes on its first tick rather than at
/// construction or start time.
///
/// # Examples
///
/// ```rust
/// use bubbletea_countdown::countdown::{new, DEFAULT_INTERVAL, RunState};
/// use std::time::Duration;
///
/// let countdown = new(25);
/// assert_eq!(countdown.duration(), Duration::from_secs(25 * 60));
/// assert_eq!(countdown.interval(), DEFAULT_INTERVAL);
/// assert_eq!(countdown.run_state(), RunState::Idle);
/// ```
pub fn new(minutes: u64) -> Model {
    new_with_interval(minutes, DEFAULT_INTERVAL)
}

/// Creates a countdown with a custom tick interval.
///
/// The interval only controls how often the remaining time is republished;
/// accuracy never depends on it, because every tick recomputes remaining
/// time from the clock.
///
/// # Examples
///
/// ```rust
/// use bubbletea_countdown::countdown::new_with_interval;
/// use std::time::Duration;
///
/// let countdown = new_with_interval(1, Duration::from_secs(1));
/// assert_eq!(countdown.interval(), Duration::from_secs(1));
/// ```
pub fn new_with_interval(minutes: u64, interval: Duration) -> Model {
    let duration = Duration::from_millis(minutes.saturating_mul(MS_PER_MINUTE));
    Model {
        duration,
        interval,
        remaining: duration,
        paused_remaining: duration,
        anchor: None,
        state: RunState::Idle,
        id: next_id(),
        tag: 0,
        clock: Arc::new(SystemClock),
        on_complete: None,
    }
}

impl Model {
    /// Replaces the clock the countdown samples.
    ///
    /// Intended for tests and hosts with their own time source; production
    /// code can rely on the default [`SystemClock`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::clock::ManualClock;
    /// use bubbletea_countdown::countdown::new;
    /// use std::sync::Arc;
    ///
    /// let clock = Arc::new(ManualClock::new());
    /// let countdown = new(5).with_clock(clock.clone());
    /// # let _ = countdown;
    /// ```
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Registers a callback invoked exactly once when the countdown
    /// reaches zero.
    ///
    /// Without a callback the completion transition still happens; only the
    /// invocation is skipped. [`CompletedMsg`] is emitted either way.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::new;
    ///
    /// let countdown = new(1).with_on_complete(|| println!("time's up"));
    /// # let _ = countdown;
    /// ```
    pub fn with_on_complete(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Arc::new(f));
        self
    }

    /// Returns the unique identifier of this countdown instance.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the current lifecycle state.
    pub fn run_state(&self) -> RunState {
        self.state
    }

    /// Returns whether the countdown is actively counting down.
    pub fn running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Returns whether the countdown has reached zero.
    pub fn completed(&self) -> bool {
        self.state == RunState::Completed
    }

    /// Returns the remaining time as of the last tick or transition.
    ///
    /// Always within `0..=duration`.
    pub fn time_left(&self) -> Duration {
        self.remaining
    }

    /// Returns the total countdown length fixed at construction.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the tick cadence.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Starts, pauses, or resumes the countdown.
    ///
    /// A single toggle covers the whole surface:
    ///
    /// - **Idle or Paused**: transitions to Running. The anchor is derived
    ///   as `now - (duration - remaining)`, so at the instant of (re)start
    ///   the elapsed time implied by the anchor equals exactly what had
    ///   already elapsed before. Returns the command that schedules the
    ///   first tick — hand it to the bubbletea runtime.
    /// - **Running**: snapshots the current remaining time, cancels the
    ///   pending tick, and transitions to Paused. Returns `None`.
    /// - **Completed**: restarts a fresh run at the full duration.
    ///
    /// Completion is never detected here, even for a zero-length countdown;
    /// it is only ever detected inside a tick.
    pub fn toggle_start(&mut self) -> Option<Cmd> {
        match self.state {
            RunState::Running => {
                self.paused_remaining = self.remaining;
                self.cancel_tick();
                self.state = RunState::Paused;
                None
            }
            RunState::Idle | RunState::Paused | RunState::Completed => {
                if self.state == RunState::Completed {
                    self.paused_remaining = self.duration;
                    self.remaining = self.duration;
                }
                let now = self.clock.now();
                let already_elapsed = self.duration.saturating_sub(self.paused_remaining);
                // A clock too close to its epoch to rewind saturates to a
                // fresh start.
                self.anchor = Some(now.checked_sub(already_elapsed).unwrap_or(now));
                self.state = RunState::Running;
                self.tag += 1;
                Some(self.tick())
            }
        }
    }

    /// Returns the countdown to a fresh [`RunState::Idle`] at the full
    /// duration, cancelling any pending tick. Idempotent.
    pub fn reset(&mut self) {
        self.cancel_tick();
        self.paused_remaining = self.duration;
        self.remaining = self.duration;
        self.state = RunState::Idle;
    }

    /// Cancels any pending tick unconditionally.
    ///
    /// Call this when the owning view is torn down, so a tick scheduled
    /// before the teardown cannot fire into a model nobody renders anymore.
    /// A running countdown is parked in [`RunState::Paused`] with its
    /// remaining time preserved; other states are left untouched.
    pub fn teardown(&mut self) {
        if self.state == RunState::Running {
            self.paused_remaining = self.remaining;
            self.state = RunState::Paused;
        }
        self.cancel_tick();
    }

    /// Drops the anchor and invalidates every tick still in flight.
    fn cancel_tick(&mut self) {
        self.anchor = None;
        self.tag += 1;
    }

    /// Schedules the next tick for the current generation.
    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.interval, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    /// Emits the one-shot completion message.
    fn completed_cmd(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(CompletedMsg { id }) as Msg
        })
    }

    /// Processes countdown messages.
    ///
    /// Handles [`TickMsg`]: recomputes the remaining time from the clock
    /// and either schedules the next tick or, on reaching zero, transitions
    /// to Completed, invokes the completion callback, and emits
    /// [`CompletedMsg`]. Ticks for other instances, ticks from a cancelled
    /// generation, and ticks arriving while not running are ignored. All
    /// other message types return `None`.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            if self.state != RunState::Running || tick_msg.id != self.id {
                return None;
            }
            // A tick from a superseded running interval must not touch the
            // current one.
            if tick_msg.tag != self.tag {
                return None;
            }
            let anchor = match self.anchor {
                Some(anchor) => anchor,
                None => return None,
            };

            let elapsed = self.clock.now().saturating_duration_since(anchor);
            self.remaining = self.duration.saturating_sub(elapsed);

            if self.remaining.is_zero() {
                self.paused_remaining = Duration::ZERO;
                self.cancel_tick();
                self.state = RunState::Completed;
                // The transition above is the once-only guard: no further
                // tick can reach the zero branch.
                if let Some(on_complete) = self.on_complete.as_deref() {
                    on_complete();
                }
                return Some(self.completed_cmd());
            }

            self.tag += 1;
            return Some(self.tick());
        }

        None
    }

    /// Renders the remaining time as `MM:SS`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::new;
    ///
    /// assert_eq!(new(5).view(), "05:00");
    /// assert_eq!(new(125).view(), "125:00");
    /// ```
    pub fn view(&self) -> String {
        format_time(self.remaining.as_millis().min(i64::MAX as u128) as i64)
    }
}

impl BubbleTeaModel for Model {
    /// Creates an idle one-minute countdown for standalone use.
    fn init() -> (Self, Option<Cmd>) {
        (new(1), None)
    }

    /// Forwards messages to [`Model::update`].
    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    /// Renders via [`Model::view`].
    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    /// Equivalent to `new(1)`: an idle one-minute countdown.
    fn default() -> Self {
        new(1)
    }
}
