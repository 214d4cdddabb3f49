//! # Function-backed listener (`ListenFn`)
//!
//! [`ListenFn`] wraps a closure `F: Fn(HubPayload) -> Fut`, producing a fresh
//! future per delivered event. This avoids shared mutable state; if the
//! callback needs state across events, capture an `Arc<...>` explicitly
//! inside the closure.
//!
//! ## Example
//! ```rust
//! use synchub::{ListenFn, ListenerRef, Listen, HubPayload, ListenerError};
//!
//! let l: ListenerRef = ListenFn::arc("audit", |payload: HubPayload| async move {
//!     let _ = payload.event();
//!     Ok::<_, ListenerError>(())
//! });
//!
//! assert_eq!(l.name(), "audit");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ListenerError;
use crate::listeners::listen::Listen;
use crate::payload::HubPayload;

/// Function-backed listener implementation.
///
/// Wraps a closure that *creates* a new future per delivered event. The
/// closure receives its own clone of the payload (clones are cheap; the data
/// allocation is shared).
#[derive(Debug)]
pub struct ListenFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ListenFn<F> {
    /// Creates a new function-backed listener.
    ///
    /// Prefer [`ListenFn::arc`] when you immediately need a
    /// [`ListenerRef`](crate::ListenerRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self { name: name.into(), f }
    }

    /// Creates the listener and returns it as a shared handle (`Arc<Self>`).
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Listen for ListenFn<F>
where
    F: Fn(HubPayload) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<(), ListenerError>> + Send + 'static,
{
    async fn on_event(&self, payload: &HubPayload) -> Result<(), ListenerError> {
        (self.f)(payload.clone()).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_closure_sees_payload() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);

        let listener = ListenFn::new("counter", move |payload: HubPayload| {
            let counter = Arc::clone(&counter);
            async move {
                if payload.event() == "tick" {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
                Ok(())
            }
        });

        listener.on_event(&HubPayload::new("tick")).await.unwrap();
        listener.on_event(&HubPayload::new("tock")).await.unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_name_and_error_passthrough() {
        let listener = ListenFn::new("flaky", |_payload: HubPayload| async move {
            Err::<(), ListenerError>("boom".into())
        });

        assert_eq!(listener.name(), "flaky");
        let err = listener.on_event(&HubPayload::new("x")).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
