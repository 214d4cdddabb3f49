//! # Simple logging listener for debugging and demos.
//!
//! [`LogWriter`] prints delivered events to stdout in a human-readable
//! format. This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [event] name=record_synced data=yes
//! [event] name=network_lost data=no
//! ```

use async_trait::async_trait;

use crate::error::ListenerError;
use crate::listeners::listen::Listen;
use crate::payload::HubPayload;

/// Simple stdout logging listener.
///
/// Enabled via the `logging` feature. Prints one line per delivered event
/// for debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`Listen`] for
/// structured logging or metrics collection.
pub struct LogWriter;

#[async_trait]
impl Listen for LogWriter {
    async fn on_event(&self, payload: &HubPayload) -> Result<(), ListenerError> {
        let data = if payload.has_data() { "yes" } else { "no" };
        println!("[event] name={} data={data}", payload.event());
        Ok(())
    }

    fn name(&self) -> &str {
        "log_writer"
    }
}
