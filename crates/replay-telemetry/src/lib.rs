//! Replay Telemetry - Logging setup for the chat replay demo.
//!
//! This crate provides:
//! - Configurable logging setup via the tracing ecosystem
//! - An env-filter aware configuration builder
//!
//! # Example
//!
//! ```rust,no_run
//! use replay_telemetry::{LogConfig, setup_logging};
//!
//! # fn main() -> Result<(), replay_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug").with_directive("replay_engine=trace");
//! setup_logging(&config)?;
//! tracing::info!("replay starting");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, setup_default_logging, setup_logging};
