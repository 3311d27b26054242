//! Client lifecycle: configuration and store wiring.
//!
//! - [`ClientConfig`] - where the backend lives and how stores resolve races
//! - [`AppContext`] - builds the transport and the shared stores, hands out screens
//!
//! Logging is initialized by the binary through
//! [`setup_tracing`](sync_framework::tracing::setup_tracing).

pub mod app_context;
pub mod config;

pub use app_context::*;
pub use config::*;
