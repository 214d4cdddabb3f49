//! # Event listeners for the hub.
//!
//! This module provides the [`Listen`] trait — the capability the hub invokes
//! with each delivered payload — and adapters for plugging callbacks in
//! without a hand-written type.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   publisher ── publish(channel, payload) ──► Hub
//!                                               │  one queue + worker
//!                                               │  per subscription
//!                                   ┌───────────┼───────────┐
//!                                   ▼           ▼           ▼
//!                             Listen::on_event  ...   Listen::on_event
//!                                   │
//!                              ┌────┴─────┬──────────┐
//!                              ▼          ▼          ▼
//!                          LogWriter   Metrics    Custom
//! ```
//!
//! ## Implementing custom listeners
//! ```no_run
//! use synchub::{Listen, HubPayload, ListenerError};
//! use async_trait::async_trait;
//!
//! struct MetricsListener;
//!
//! #[async_trait]
//! impl Listen for MetricsListener {
//!     async fn on_event(&self, payload: &HubPayload) -> Result<(), ListenerError> {
//!         match payload.event() {
//!             "record_synced" => { /* increment sync counter */ }
//!             _ => {}
//!         }
//!         Ok(())
//!     }
//!     fn name(&self) -> &str { "metrics" }
//! }
//! ```

mod listen;
mod listen_fn;

#[cfg(feature = "logging")]
mod log;

pub use listen::{Listen, ListenerRef};
pub use listen_fn::ListenFn;

#[cfg(feature = "logging")]
pub use log::LogWriter;
