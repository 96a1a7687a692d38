//! Replay Core - Foundation types for the scripted chat-replay demo.
//!
//! This crate provides:
//! - The conversation data model (speakers, turn ids, turns)
//! - The script wire format and its loader
//! - The structured "thinking" payload attached to some Agent turns
//! - The shared error type
//!
//! The replay engine and the frontends build on these types; nothing in
//! here owns timers or mutable session state.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod script;
pub mod thinking;
pub mod types;

pub use error::{ReplayError, ReplayResult};
pub use script::{Script, ScriptedTurn};
pub use thinking::{Inference, Prediction, Section, TableData, Thinking};
pub use types::{ConversationTurn, Speaker, TurnId};
