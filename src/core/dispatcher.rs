//! # Per-subscription delivery workers.
//!
//! Each subscription gets a bounded queue and a dedicated worker task; the
//! worker invokes the listener for every queued payload, one at a time.
//!
//! ## What this guarantees
//! - Per-subscription FIFO (queue order).
//! - A listener error or panic is caught, reported, and never reaches the
//!   publisher or other listeners.
//! - A slow listener delays only its own queue.
//!
//! ## What it does **not** guarantee
//! - No global ordering across different subscriptions.
//! - No retries on queue overflow (events are dropped for that subscription
//!   and reported).
//!
//! ## Diagram
//! ```text
//!    publish(channel, payload)
//!        │                       (Arc-clone per subscription)
//!        ├───────────────► [queue S1] ─► worker S1 ─► on_event()
//!        ├───────────────► [queue S2] ─► worker S2 ─► on_event()
//!        └───────────────► [queue SN] ─► worker SN ─► on_event()
//!                                            └── Err/panic → Report sink
//! ```
//!
//! ## Panic handling
//! Worker tasks use `catch_unwind` to isolate panics: the panic is converted
//! into a [`DeliveryError::Panicked`] report and the worker continues with
//! the next event.
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state
//! inconsistent if a listener uses `Arc<Mutex<T>>` and panics while holding
//! the lock.

use std::any::Any;
use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::channel::HubChannel;
use crate::error::DeliveryError;
use crate::listeners::{Listen, ListenerRef};
use crate::payload::HubPayload;
use crate::report::{DeliveryFailure, Report};

/// Spawns the worker task driving one subscription.
///
/// The worker runs until its queue closes (subscription removed) or the hub's
/// shutdown token fires. On shutdown, the delivery in flight completes and
/// anything still queued is discarded.
pub(crate) fn spawn_worker(
    listener: ListenerRef,
    channel: HubChannel,
    name: Arc<str>,
    mut rx: mpsc::Receiver<Arc<HubPayload>>,
    reporter: Arc<dyn Report>,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                next = rx.recv() => {
                    let Some(payload) = next else { break };
                    deliver(&*listener, &channel, &name, &payload, &*reporter).await;
                }
            }
        }
    })
}

/// Runs one delivery unit: invoke the listener, contain any failure.
async fn deliver(
    listener: &dyn Listen,
    channel: &HubChannel,
    name: &Arc<str>,
    payload: &HubPayload,
    reporter: &dyn Report,
) {
    let fut = listener.on_event(payload);

    match std::panic::AssertUnwindSafe(fut).catch_unwind().await {
        Ok(Ok(())) => {}
        Ok(Err(error)) => reporter.delivery_failed(DeliveryFailure {
            channel: channel.clone(),
            listener: Arc::clone(name),
            error: DeliveryError::Failed { error },
        }),
        Err(panic_err) => reporter.delivery_failed(DeliveryFailure {
            channel: channel.clone(),
            listener: Arc::clone(name),
            error: DeliveryError::Panicked {
                info: panic_info(&*panic_err),
            },
        }),
    }
}

/// Renders a caught panic payload as text.
fn panic_info(any: &(dyn Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
