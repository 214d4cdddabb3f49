//! Error types used by the hub's delivery pipeline.
//!
//! The hub itself never returns errors to publishers or subscribers:
//! publishing to an empty channel and removing an unknown subscription are
//! normal no-ops. The only failures that exist are failures *inside* a
//! delivery unit, modeled by [`DeliveryError`] and surfaced exclusively
//! through the [`Report`](crate::Report) sink.
//!
//! [`DeliveryError`] provides helper methods (`as_label`, `as_message`) for
//! logging/metrics.

use thiserror::Error;

/// Error type listeners may return from
/// [`Listen::on_event`](crate::Listen::on_event).
///
/// Boxed so listeners can propagate whatever error type their own logic
/// produces with `?`.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// # Failures inside a single delivery unit.
///
/// Each value describes why one listener did not (successfully) observe one
/// published event. Delivery failures are contained: they never propagate to
/// the publisher or to other listeners on the same event.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The listener's callback returned an error.
    #[error("listener failed: {error}")]
    Failed {
        /// The error the listener returned.
        error: ListenerError,
    },

    /// The listener's callback panicked; the panic was caught by the worker.
    #[error("listener panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },

    /// The subscription's queue could not accept the event; it was dropped
    /// for this listener only.
    #[error("delivery queue {reason}; event dropped")]
    Overflow {
        /// Why the queue rejected the event (`"full"` or `"closed"`).
        reason: &'static str,
    },
}

impl DeliveryError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use synchub::DeliveryError;
    ///
    /// let err = DeliveryError::Overflow { reason: "full" };
    /// assert_eq!(err.as_label(), "delivery_overflow");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            DeliveryError::Failed { .. } => "delivery_failed",
            DeliveryError::Panicked { .. } => "delivery_panicked",
            DeliveryError::Overflow { .. } => "delivery_overflow",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            DeliveryError::Failed { error } => format!("error: {error}"),
            DeliveryError::Panicked { info } => format!("panic: {info}"),
            DeliveryError::Overflow { reason } => format!("overflow: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        let failed = DeliveryError::Failed {
            error: "boom".into(),
        };
        let panicked = DeliveryError::Panicked {
            info: "worker died".into(),
        };
        let overflow = DeliveryError::Overflow { reason: "closed" };

        assert_eq!(failed.as_label(), "delivery_failed");
        assert_eq!(panicked.as_label(), "delivery_panicked");
        assert_eq!(overflow.as_label(), "delivery_overflow");
    }

    #[test]
    fn test_messages_carry_details() {
        let err = DeliveryError::Failed {
            error: "connection refused".into(),
        };
        assert_eq!(err.as_message(), "error: connection refused");
        assert_eq!(err.to_string(), "listener failed: connection refused");
    }
}
