//! # Event payloads carried through the hub.
//!
//! [`HubPayload`] is what publishers hand to [`Hub::publish`](crate::Hub::publish)
//! and what listeners receive, unmodified. The hub never inspects the data —
//! it is an opaque, immutable value shared by reference with every listener
//! on the event's channel.
//!
//! ## Shape
//! - `event`: a short name identifying what happened (`"record_synced"`,
//!   `"network_lost"`, ...). The naming scheme is owned by the publisher.
//! - `data`: optional opaque attachment. Stored as `Arc<dyn Any + Send + Sync>`,
//!   read back with a typed downcast via [`HubPayload::data`].
//!
//! ## Example
//! ```rust
//! use synchub::HubPayload;
//!
//! #[derive(Debug, PartialEq)]
//! struct SyncOutcome {
//!     status: &'static str,
//! }
//!
//! let payload = HubPayload::new("sync_finished").with_data(SyncOutcome { status: "complete" });
//!
//! assert_eq!(payload.event(), "sync_finished");
//! assert_eq!(payload.data::<SyncOutcome>().map(|d| d.status), Some("complete"));
//! assert!(payload.data::<String>().is_none()); // wrong type → None
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Immutable event payload: an event name plus optional opaque data.
///
/// Cheap to clone; clones share the same data allocation.
#[derive(Clone)]
pub struct HubPayload {
    event: Arc<str>,
    data: Option<Arc<dyn Any + Send + Sync>>,
}

impl HubPayload {
    /// Creates a payload with the given event name and no data.
    pub fn new(event: impl Into<Arc<str>>) -> Self {
        Self {
            event: event.into(),
            data: None,
        }
    }

    /// Attaches opaque data to the payload.
    #[must_use]
    pub fn with_data<T: Any + Send + Sync>(mut self, data: T) -> Self {
        self.data = Some(Arc::new(data));
        self
    }

    /// Returns the event name.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Returns the attached data, downcast to `T`.
    ///
    /// `None` when no data is attached or when the attachment is not a `T`.
    pub fn data<T: Any>(&self) -> Option<&T> {
        self.data.as_deref().and_then(|d| d.downcast_ref::<T>())
    }

    /// Whether any data is attached.
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

impl fmt::Debug for HubPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubPayload")
            .field("event", &self.event)
            .field("has_data", &self.has_data())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_without_data() {
        let p = HubPayload::new("network_lost");
        assert_eq!(p.event(), "network_lost");
        assert!(!p.has_data());
        assert!(p.data::<u32>().is_none());
    }

    #[test]
    fn test_typed_downcast_hit_and_miss() {
        let p = HubPayload::new("record_synced").with_data(42u32);
        assert_eq!(p.data::<u32>(), Some(&42));
        assert!(p.data::<String>().is_none());
    }

    #[test]
    fn test_clone_shares_data() {
        let p = HubPayload::new("snapshot").with_data(String::from("v1"));
        let q = p.clone();
        assert_eq!(q.data::<String>().map(String::as_str), Some("v1"));
        assert_eq!(p.data::<String>().map(String::as_str), Some("v1"));
    }
}
