//! # synchub
//!
//! **Synchub** is a lightweight in-process publish/subscribe hub for Rust.
//!
//! It decouples the components of a data-synchronization runtime: persistence,
//! transport, and auth raise lifecycle events on named channels, and any
//! component may observe them without the two sides holding references to
//! each other. The crate is designed as a building block for higher-level
//! sync frameworks.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!  │  persistence │   │  transport   │   │     auth     │
//!  │  (publisher) │   │  (publisher) │   │  (publisher) │
//!  └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!         │ publish(channel, payload)           │
//!         ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Hub                                                          │
//! │  - ChannelRegistry (channel → live subscriptions, snapshots)  │
//! │  - one bounded queue + worker task per subscription           │
//! │  - Report sink (listener failures, drops)                     │
//! └──────┬──────────────────────┬─────────────────────┬───────────┘
//!        ▼                      ▼                     ▼
//!   [queue S1]             [queue S2]            [queue SN]
//!        ▼                      ▼                     ▼
//!    worker S1              worker S2             worker SN
//!        ▼                      ▼                     ▼
//!   s1.on_event()          s2.on_event()         sN.on_event()
//! ```
//!
//! ### Delivery contract
//! ```text
//! publish(channel, payload)
//!   ├─► snapshot listeners on channel      (later changes don't apply)
//!   ├─► empty snapshot ─► return           (silent no-op)
//!   ├─► try_send to each subscription      (never blocks the publisher)
//!   │     └─ queue full ─► drop for that listener, report overflow
//!   └─► return                             (before any delivery runs)
//!
//! worker (per subscription)
//!   └─ loop: recv ─► on_event(payload)
//!        ├─ Ok        ─► next event
//!        ├─ Err(e)    ─► report, next event
//!        └─ panic     ─► caught, report, next event
//! ```
//!
//! ## Features
//! | Area             | Description                                               | Key types / traits                  |
//! |------------------|-----------------------------------------------------------|-------------------------------------|
//! | **Channels**     | Named event streams; identity by logical name.            | [`HubChannel`]                      |
//! | **Listeners**    | Hook into channels (metrics, logging, custom reactions).  | [`Listen`], [`ListenFn`]            |
//! | **Dispatch**     | Non-blocking publish, per-subscription FIFO, isolation.   | [`Hub`], [`SubscriptionToken`]      |
//! | **Failures**     | Injectable sink for listener errors/panics/drops.         | [`Report`], [`DeliveryFailure`]     |
//! | **Configuration**| Queue sizing defaults.                                    | [`HubConfig`], [`HubBuilder`]       |
//! | **Sync catalog** | Record kinds the persistence collaborator must track.     | [`SystemRecords`]                   |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```no_run
//! use synchub::{Hub, HubChannel, HubConfig, HubPayload, ListenFn, ListenerRef, ListenerError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let hub = Hub::new(HubConfig::default());
//!
//!     // Observe sync outcomes without referencing the sync engine.
//!     let audit: ListenerRef = ListenFn::arc("audit", |payload: HubPayload| async move {
//!         println!("observed: {}", payload.event());
//!         Ok::<_, ListenerError>(())
//!     });
//!     let token = hub.listen(HubChannel::DataStore, audit);
//!
//!     // Somewhere else entirely: the persistence layer raises an event.
//!     hub.publish(HubChannel::DataStore, HubPayload::new("record_synced"));
//!
//!     // Teardown: stop observing, then drain the hub.
//!     hub.remove(token);
//!     hub.shutdown().await;
//! }
//! ```

mod channel;
mod core;
mod error;
mod listeners;
mod payload;
mod report;
mod system;

// ---- Public re-exports ----

pub use channel::HubChannel;
pub use core::{Hub, HubBuilder, HubConfig, SubscriptionToken};
pub use error::{DeliveryError, ListenerError};
pub use listeners::{Listen, ListenFn, ListenerRef};
pub use payload::HubPayload;
pub use report::{DeliveryFailure, Report, StderrReporter};
pub use system::{SystemRecordKind, SystemRecords};

// Optional: expose a simple built-in logging listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use listeners::LogWriter;
