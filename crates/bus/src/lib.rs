//! # bus
//!
//! Event plumbing for the combo-box engine.
//!
//! Two concerns live here, both UI-agnostic:
//!
//! - [`Signal`]/[`Dispatcher`]: synchronous, ordered delivery of named
//!   signals to registered listeners, with DOM-style cancelation modeled as
//!   explicit fields (`propagate`, `default_prevented`) instead of
//!   language-level event semantics.
//! - [`Timer`]/[`FrameQueue`]: the only forms of deferred execution the
//!   engine uses. Timers are deadlines-as-data polled with an explicit
//!   `now` so tests drive virtual time; the frame queue coalesces work to
//!   at-most-once per host frame.

mod sched;
mod signal;

pub use sched::{FrameQueue, Timer};
pub use signal::{Dispatcher, ListenerId, Signal};
