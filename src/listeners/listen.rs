//! # Core listener trait
//!
//! `Listen` is the extension point for receiving events from the hub. Each
//! subscription is driven by a dedicated worker loop fed by a bounded queue
//! owned by the hub.
//!
//! ## Contract
//! - Implementations may be slow (I/O, batching, retries) — they do **not**
//!   block the publisher nor other listeners.
//! - Returning `Err` marks this one delivery as failed; the failure is handed
//!   to the installed [`Report`](crate::Report) sink and delivery of later
//!   events continues.
//! - Each listener **declares** its preferred queue capacity via
//!   [`Listen::queue_capacity`]. If a queue overflows, events for that
//!   subscription are **dropped** (reported).

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ListenerError;
use crate::payload::HubPayload;

/// Shared handle to a listener.
pub type ListenerRef = Arc<dyn Listen>;

/// Contract for hub listeners.
///
/// Called from a subscription-dedicated worker task. Implementations should
/// avoid blocking the async runtime (prefer async I/O and cooperative waits).
#[async_trait]
pub trait Listen: Send + Sync + 'static {
    /// Handle a single delivered payload.
    ///
    /// # Parameters
    /// - `payload`: Reference to the payload (does not transfer ownership)
    async fn on_event(&self, payload: &HubPayload) -> Result<(), ListenerError>;

    /// Human-readable name (for failure reports and logs).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Preferred capacity of this subscription's queue.
    ///
    /// `0` means "use the hub's configured default"
    /// ([`HubConfig::queue_capacity`](crate::HubConfig::queue_capacity)).
    /// On overflow, events for this subscription are **dropped** (reported).
    fn queue_capacity(&self) -> usize {
        0
    }
}
