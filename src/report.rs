//! # Failure reporting for delivery units.
//!
//! A faulty listener is invisible to publishers: its error or panic is
//! contained inside its own delivery unit. [`Report`] is the one place those
//! failures become observable. The hub invokes the installed reporter with a
//! [`DeliveryFailure`] — channel, listener identity, and the
//! [`DeliveryError`] — every time a delivery unit fails or an event is
//! dropped on a full queue.
//!
//! Install a custom reporter via
//! [`HubBuilder::with_reporter`](crate::HubBuilder::with_reporter); tests can
//! inject one that records failures instead of printing them.
//!
//! ## Contract
//! - Called from delivery worker tasks; implementations must not block the
//!   async runtime for long.
//! - Must not panic. A reporter that panics takes its worker down with it.

use std::fmt;

use crate::channel::HubChannel;
use crate::error::DeliveryError;

/// One failed delivery unit, as handed to the [`Report`] sink.
#[derive(Debug)]
pub struct DeliveryFailure {
    /// Channel the event was published on.
    pub channel: HubChannel,
    /// Name of the listener whose delivery failed.
    pub listener: std::sync::Arc<str>,
    /// What went wrong.
    pub error: DeliveryError,
}

impl fmt::Display for DeliveryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "channel={} listener={} {}",
            self.channel,
            self.listener,
            self.error.as_message()
        )
    }
}

/// Sink for delivery failures.
pub trait Report: Send + Sync + 'static {
    /// Records one failed delivery unit.
    fn delivery_failed(&self, failure: DeliveryFailure);
}

/// Default reporter: writes one diagnostic line per failure to stderr.
///
/// Never crashes the process; replace it with a custom [`Report`] for
/// structured logging or metrics.
pub struct StderrReporter;

impl Report for StderrReporter {
    fn delivery_failed(&self, failure: DeliveryFailure) {
        eprintln!("[{}] {failure}", failure.error.as_label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_display_names_channel_and_listener() {
        let failure = DeliveryFailure {
            channel: HubChannel::Storage,
            listener: "metrics".into(),
            error: DeliveryError::Overflow { reason: "full" },
        };
        assert_eq!(
            failure.to_string(),
            "channel=storage listener=metrics overflow: full"
        );
    }
}
