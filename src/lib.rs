#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-countdown/")]

//! # bubbletea-countdown
//!
//! A countdown timer component for building terminal applications with
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! The component tracks remaining time from wall-clock samples instead of
//! subtracting the tick interval on each update. When a run starts, an
//! anchor instant is fixed so that `now - anchor` always equals the true
//! elapsed time net of paused stretches; every tick recomputes the
//! remaining time from that anchor. Ticks that arrive late — a busy event
//! loop, a deprioritized background terminal — catch up to the correct
//! value instead of drifting behind real time.
//!
//! Three pieces make up the crate:
//!
//! - [`countdown`] — the state machine: idle/running/paused/completed,
//!   a single `toggle_start()` covering start, pause, and resume, `reset()`,
//!   and a completion signal delivered exactly once.
//! - [`clock`] — the injected time source. [`SystemClock`] by default;
//!   [`ManualClock`] for deterministic tests.
//! - [`format`] — pure `MM:SS` rendering of a millisecond count.
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_countdown::prelude::*;
//!
//! let mut countdown = countdown_new(25);
//! assert_eq!(countdown.view(), "25:00");
//!
//! // One toggle starts; the next pauses; the one after resumes.
//! let tick_cmd = countdown.toggle_start();
//! assert!(tick_cmd.is_some());
//! assert!(countdown.running());
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! Forward messages to the component from your model's `update` and hand
//! its commands back to the runtime. Call [`Countdown::teardown`] when the
//! owning view goes away, so a tick scheduled before the teardown cannot
//! fire afterwards.
//!
//! ```rust
//! use bubbletea_countdown::prelude::*;
//! use bubbletea_rs::{Cmd, KeyMsg, Model, Msg};
//! use crossterm::event::KeyCode;
//!
//! struct FocusSession {
//!     countdown: Countdown,
//!     done: bool,
//! }
//!
//! impl Model for FocusSession {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let countdown = countdown_new(25);
//!         (Self { countdown, done: false }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(key) = msg.downcast_ref::<KeyMsg>() {
//!             return match key.key {
//!                 KeyCode::Char(' ') => self.countdown.toggle_start(),
//!                 KeyCode::Char('r') => {
//!                     self.countdown.reset();
//!                     None
//!                 }
//!                 _ => None,
//!             };
//!         }
//!
//!         if let Some(completed) = msg.downcast_ref::<CountdownCompletedMsg>() {
//!             if completed.id == self.countdown.id() {
//!                 self.done = true;
//!             }
//!             return None;
//!         }
//!
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         if self.done {
//!             "Session complete".to_string()
//!         } else {
//!             format!("{}\n\n[space] start/pause  [r] reset", self.countdown.view())
//!         }
//!     }
//! }
//! ```

pub mod clock;
pub mod countdown;
pub mod format;

pub use clock::{Clock, ManualClock, SystemClock};
pub use countdown::{
    new as countdown_new, new_with_interval as countdown_new_with_interval,
    CompletedMsg as CountdownCompletedMsg, Model as Countdown, RunState,
    TickMsg as CountdownTickMsg, DEFAULT_INTERVAL,
};
pub use format::format_time;

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_countdown::prelude::*;
///
/// let countdown = countdown_new(5);
/// assert_eq!(countdown.run_state(), RunState::Idle);
/// ```
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::countdown::{
        new as countdown_new, new_with_interval as countdown_new_with_interval,
        CompletedMsg as CountdownCompletedMsg, Model as Countdown, RunState,
        TickMsg as CountdownTickMsg, DEFAULT_INTERVAL,
    };
    pub use crate::format::format_time;
}
