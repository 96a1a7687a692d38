//! Replay Engine - Script cursor and turn dispatcher.
//!
//! This crate owns the only stateful part of the demo:
//!
//! - [`ScriptCursor`] — linear progress through the scripted turns
//! - [`ReplayEngine`] — the submit/pull-loop state machine with its
//!   busy flag and selection state
//! - [`ReplayEvent`] — the broadcast stream frontends render from
//!
//! Everything runs on a single tokio runtime; the only suspension
//! points are the scheduled delays between Agent turns and the short
//! cosmetic delay before a turn is marked selected.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod cursor;
pub mod engine;
pub mod event;

pub use cursor::ScriptCursor;
pub use engine::{ReplayEngine, SelectedView, SubmitOutcome, Timing};
pub use event::ReplayEvent;
