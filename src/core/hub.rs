//! # The hub: channel-scoped publish/subscribe.
//!
//! [`Hub`] decouples components of the sync runtime: publishers raise events
//! on a [`HubChannel`], listeners observe them, and neither side holds a
//! reference to the other.
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` snapshots the channel's listeners,
//!   enqueues one delivery per listener with `try_send`, and returns. It
//!   never waits for delivery.
//! - **Isolation**: one delivery unit per listener; a failing or slow
//!   listener affects nobody else.
//! - **Per-publisher FIFO**: events published in sequence by one task arrive
//!   at each listener in that sequence. No ordering across listeners or
//!   across concurrent publishers.
//! - **No persistence**: an event published while a channel has no listeners
//!   is silently dropped.
//!
//! ## Removal semantics
//! [`Hub::remove`] is idempotent and non-blocking. After it returns, no
//! *subsequent* publish reaches the removed listener; a delivery already
//! queued at removal time may still complete.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::channel::HubChannel;
use crate::core::builder::HubBuilder;
use crate::core::config::HubConfig;
use crate::core::dispatcher::spawn_worker;
use crate::core::registry::{ChannelRegistry, Registration, SubscriptionToken};
use crate::error::DeliveryError;
use crate::listeners::ListenerRef;
use crate::payload::HubPayload;
use crate::report::{DeliveryFailure, Report};

/// Channel-scoped publish/subscribe dispatcher.
///
/// Construct one per runtime (or per test) with [`Hub::new`] or
/// [`Hub::builder`]; there is no global instance. `Hub` is cheap to clone —
/// clones share the same registry and workers — so it can be handed to every
/// component that needs to publish or listen.
#[derive(Clone)]
pub struct Hub {
    inner: Arc<HubInner>,
}

struct HubInner {
    cfg: HubConfig,
    registry: ChannelRegistry,
    reporter: Arc<dyn Report>,
    shutdown: CancellationToken,
}

impl Hub {
    /// Creates a hub with the given configuration and the default stderr
    /// failure reporter.
    pub fn new(cfg: HubConfig) -> Self {
        Self::builder(cfg).build()
    }

    /// Returns a builder for constructing a hub with optional features.
    pub fn builder(cfg: HubConfig) -> HubBuilder {
        HubBuilder::new(cfg)
    }

    pub(crate) fn new_internal(cfg: HubConfig, reporter: Arc<dyn Report>) -> Self {
        Self {
            inner: Arc::new(HubInner {
                cfg,
                registry: ChannelRegistry::new(),
                reporter,
                shutdown: CancellationToken::new(),
            }),
        }
    }

    /// Registers `listener` on `channel` and returns the subscription's
    /// token.
    ///
    /// Every call yields an independent subscription, even for the same
    /// listener instance on the same channel: subscribing twice means
    /// receiving every event twice, each on its own queue.
    ///
    /// ### Notes
    /// - Spawns the subscription's worker task; must be called from within a
    ///   Tokio runtime.
    /// - Queue capacity: the listener's
    ///   [`queue_capacity`](crate::Listen::queue_capacity) if non-zero, else
    ///   the hub default.
    /// - After [`shutdown`](Hub::shutdown) the hub is inert: the returned
    ///   token is valid but never delivered to.
    pub fn listen(&self, channel: HubChannel, listener: ListenerRef) -> SubscriptionToken {
        let inner = &self.inner;
        let token = inner.registry.next_token();
        if inner.shutdown.is_cancelled() {
            return token;
        }

        let capacity = match listener.queue_capacity() {
            0 => inner.cfg.queue_capacity_clamped(),
            n => n,
        };
        let name: Arc<str> = Arc::from(listener.name());
        let (tx, rx) = mpsc::channel(capacity);

        let worker = spawn_worker(
            listener,
            channel.clone(),
            Arc::clone(&name),
            rx,
            Arc::clone(&inner.reporter),
            inner.shutdown.clone(),
        );
        inner.registry.insert(
            channel,
            Registration {
                token,
                name,
                sender: tx,
            },
            worker,
        );
        token
    }

    /// Ends the subscription identified by `token`.
    ///
    /// No-op (not an error) when the token was already removed or never
    /// registered. Safe to call concurrently with ongoing dispatch on the
    /// same channel; callers on teardown paths may call it defensively.
    pub fn remove(&self, token: SubscriptionToken) {
        self.inner.registry.remove(token);
    }

    /// Publishes `payload` to every listener currently registered on
    /// `channel`.
    ///
    /// Fire-and-forget: returns as soon as one delivery per listener has been
    /// enqueued. Publishing to a channel with no listeners is a normal,
    /// silent no-op. A subscription whose queue is full misses this event;
    /// the drop is reported through the failure sink, never to the publisher.
    pub fn publish(&self, channel: HubChannel, payload: HubPayload) {
        if self.inner.shutdown.is_cancelled() {
            return;
        }

        let targets = self.inner.registry.snapshot(&channel);
        if targets.is_empty() {
            return;
        }

        let payload = Arc::new(payload);
        for target in targets {
            match target.sender.try_send(Arc::clone(&payload)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    self.report_overflow(&channel, &target.name, "full");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    self.report_overflow(&channel, &target.name, "closed");
                }
            }
        }
    }

    /// Gracefully shuts the hub down.
    ///
    /// 1. Cancels the hub token (publish/listen become no-ops)
    /// 2. Drains the registry, closing every subscription queue
    /// 3. Awaits all worker tasks to finish
    ///
    /// Deliveries in flight complete; events still queued are discarded.
    pub async fn shutdown(&self) {
        self.inner.shutdown.cancel();

        for handle in self.inner.registry.drain() {
            let _ = handle.await;
        }
    }

    fn report_overflow(&self, channel: &HubChannel, listener: &Arc<str>, reason: &'static str) {
        self.inner.reporter.delivery_failed(DeliveryFailure {
            channel: channel.clone(),
            listener: Arc::clone(listener),
            error: DeliveryError::Overflow { reason },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ListenerError;
    use crate::listeners::{Listen, ListenFn};
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
    use tokio::sync::Semaphore;
    use tokio::time::timeout;

    const WAIT: Duration = Duration::from_secs(5);

    fn hub() -> Hub {
        Hub::new(HubConfig::default())
    }

    /// Listener that forwards each received event name to the test.
    fn recording_listener(name: &'static str) -> (ListenerRef, UnboundedReceiver<String>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let listener: ListenerRef = ListenFn::arc(name, move |payload: HubPayload| {
            let tx = tx.clone();
            async move {
                let _ = tx.send(payload.event().to_string());
                Ok::<_, ListenerError>(())
            }
        });
        (listener, rx)
    }

    /// Reporter that forwards failures to the test.
    struct ChannelReporter {
        tx: UnboundedSender<DeliveryFailure>,
    }

    impl Report for ChannelReporter {
        fn delivery_failed(&self, failure: DeliveryFailure) {
            let _ = self.tx.send(failure);
        }
    }

    fn reporting_hub() -> (Hub, UnboundedReceiver<DeliveryFailure>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let hub = Hub::builder(HubConfig::default())
            .with_reporter(Arc::new(ChannelReporter { tx }))
            .build();
        (hub, rx)
    }

    async fn recv(rx: &mut UnboundedReceiver<String>) -> String {
        timeout(WAIT, rx.recv())
            .await
            .expect("timed out waiting for delivery")
            .expect("listener channel closed")
    }

    async fn recv_failure(rx: &mut UnboundedReceiver<DeliveryFailure>) -> DeliveryFailure {
        timeout(WAIT, rx.recv())
            .await
            .expect("timed out waiting for failure report")
            .expect("reporter channel closed")
    }

    #[derive(Debug, PartialEq)]
    struct SyncStatus {
        status: &'static str,
    }

    #[tokio::test]
    async fn test_every_listener_on_channel_receives_once() {
        let hub = hub();
        let sync = HubChannel::custom("sync");
        let (a, mut rx_a) = recording_listener("a");
        let (b, mut rx_b) = recording_listener("b");
        hub.listen(sync.clone(), a);
        hub.listen(sync.clone(), b);

        hub.publish(sync, HubPayload::new("sync_finished"));

        assert_eq!(recv(&mut rx_a).await, "sync_finished");
        assert_eq!(recv(&mut rx_b).await, "sync_finished");
        assert!(rx_a.try_recv().is_err(), "exactly one delivery per listener");
        assert!(rx_b.try_recv().is_err(), "exactly one delivery per listener");
    }

    #[tokio::test]
    async fn test_removed_listener_stops_receiving() {
        let hub = hub();
        let sync = HubChannel::custom("sync");
        let (a, mut rx_a) = recording_listener("a");
        let (b, mut rx_b) = recording_listener("b");
        let token_a = hub.listen(sync.clone(), a);
        hub.listen(sync.clone(), b);

        hub.publish(sync.clone(), HubPayload::new("complete"));
        assert_eq!(recv(&mut rx_a).await, "complete");
        assert_eq!(recv(&mut rx_b).await, "complete");

        hub.remove(token_a);
        hub.publish(sync, HubPayload::new("retry"));

        assert_eq!(recv(&mut rx_b).await, "retry");
        // A was never enqueued for the second event.
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_payload_data_passes_through_unchanged() {
        let hub = hub();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let listener: ListenerRef = ListenFn::arc("status", move |payload: HubPayload| {
            let tx = tx.clone();
            async move {
                let status = payload
                    .data::<SyncStatus>()
                    .map(|s| s.status)
                    .unwrap_or("missing");
                let _ = tx.send(status.to_string());
                Ok::<_, ListenerError>(())
            }
        });
        hub.listen(HubChannel::DataStore, listener);

        hub.publish(
            HubChannel::DataStore,
            HubPayload::new("sync_finished").with_data(SyncStatus { status: "complete" }),
        );

        assert_eq!(recv(&mut rx).await, "complete");
    }

    #[tokio::test]
    async fn test_publish_to_empty_channel_is_silent_noop() {
        let hub = hub();
        hub.publish(HubChannel::Network, HubPayload::new("nobody_home"));

        // A listener registered afterwards sees only later events.
        let (l, mut rx) = recording_listener("late");
        hub.listen(HubChannel::Network, l);
        hub.publish(HubChannel::Network, HubPayload::new("second"));
        assert_eq!(recv(&mut rx).await, "second");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_same_listener_twice_receives_twice() {
        let hub = hub();
        let (listener, mut rx) = recording_listener("twice");
        hub.listen(HubChannel::Storage, Arc::clone(&listener));
        hub.listen(HubChannel::Storage, listener);

        hub.publish(HubChannel::Storage, HubPayload::new("write"));

        assert_eq!(recv(&mut rx).await, "write");
        assert_eq!(recv(&mut rx).await, "write");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_subscriptions_are_channel_scoped() {
        let hub = hub();
        let (l, mut rx) = recording_listener("storage_only");
        hub.listen(HubChannel::Storage, l);

        hub.publish(HubChannel::Network, HubPayload::new("network_lost"));
        hub.publish(HubChannel::Storage, HubPayload::new("write"));

        assert_eq!(recv(&mut rx).await, "write");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_removed_before_publish_never_receives() {
        let hub = hub();
        let sync = HubChannel::custom("sync");
        let (a, mut rx_a) = recording_listener("a");
        let (b, mut rx_b) = recording_listener("b");
        let token_a = hub.listen(sync.clone(), a);
        hub.listen(sync.clone(), b);

        hub.remove(token_a);
        hub.publish(sync, HubPayload::new("after_removal"));

        assert_eq!(recv(&mut rx_b).await, "after_removal");
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_failing_listener_does_not_affect_others() {
        let (hub, mut failures) = reporting_hub();
        let sync = HubChannel::custom("sync");
        let flaky: ListenerRef = ListenFn::arc("flaky", |_payload: HubPayload| async move {
            Err::<(), ListenerError>("disk unavailable".into())
        });
        let (healthy, mut rx) = recording_listener("healthy");
        hub.listen(sync.clone(), flaky);
        hub.listen(sync.clone(), healthy);

        hub.publish(sync.clone(), HubPayload::new("snapshot"));

        assert_eq!(recv(&mut rx).await, "snapshot");
        let failure = recv_failure(&mut failures).await;
        assert_eq!(failure.channel, sync);
        assert_eq!(&*failure.listener, "flaky");
        assert_eq!(failure.error.as_label(), "delivery_failed");
    }

    #[tokio::test]
    async fn test_panicking_listener_is_contained() {
        let (hub, mut failures) = reporting_hub();
        let wild: ListenerRef = ListenFn::arc("wild", |payload: HubPayload| async move {
            assert!(payload.event().is_empty(), "kaboom");
            Ok::<(), ListenerError>(())
        });
        let (healthy, mut rx) = recording_listener("healthy");
        hub.listen(HubChannel::Auth, wild);
        hub.listen(HubChannel::Auth, healthy);

        hub.publish(HubChannel::Auth, HubPayload::new("signed_in"));

        assert_eq!(recv(&mut rx).await, "signed_in");
        let failure = recv_failure(&mut failures).await;
        assert_eq!(failure.error.as_label(), "delivery_panicked");
        assert!(failure.error.as_message().contains("kaboom"));

        // The worker survives the panic and keeps delivering.
        hub.publish(HubChannel::Auth, HubPayload::new("signed_out"));
        assert_eq!(recv(&mut rx).await, "signed_out");
    }

    #[tokio::test]
    async fn test_single_publisher_ordering_per_listener() {
        let hub = hub();
        let (l, mut rx) = recording_listener("ordered");
        hub.listen(HubChannel::Storage, l);

        for i in 0..50 {
            hub.publish(HubChannel::Storage, HubPayload::new(format!("e{i}")));
        }

        for i in 0..50 {
            assert_eq!(recv(&mut rx).await, format!("e{i}"));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_publishers_keep_per_publisher_order() {
        let hub = hub();
        let (l, mut rx) = recording_listener("interleaved");
        hub.listen(HubChannel::Network, l);

        let mut publishers = Vec::new();
        for p in 0..2 {
            let hub = hub.clone();
            publishers.push(tokio::spawn(async move {
                for i in 0..20 {
                    hub.publish(HubChannel::Network, HubPayload::new(format!("p{p}-{i}")));
                }
            }));
        }
        for handle in publishers {
            handle.await.unwrap();
        }

        let mut received = Vec::new();
        for _ in 0..40 {
            received.push(recv(&mut rx).await);
        }

        // Interleaving is free, but each publisher's own stream stays ordered.
        for p in 0..2 {
            let stream: Vec<_> = received
                .iter()
                .filter(|e| e.starts_with(&format!("p{p}-")))
                .cloned()
                .collect();
            let expected: Vec<_> = (0..20).map(|i| format!("p{p}-{i}")).collect();
            assert_eq!(stream, expected, "publisher {p} stream reordered");
        }
    }

    /// Listener that parks after reporting each event, so its queue fills.
    struct GatedListener {
        tx: UnboundedSender<String>,
        gate: Arc<Semaphore>,
    }

    #[async_trait]
    impl Listen for GatedListener {
        async fn on_event(&self, payload: &HubPayload) -> Result<(), ListenerError> {
            let _ = self.tx.send(payload.event().to_string());
            let permit = self.gate.acquire().await;
            permit.map(|p| p.forget()).map_err(|e| e.into())
        }

        fn name(&self) -> &str {
            "gated"
        }

        fn queue_capacity(&self) -> usize {
            1
        }
    }

    #[tokio::test]
    async fn test_queue_overflow_is_reported_not_raised() {
        let (hub, mut failures) = reporting_hub();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let gate = Arc::new(Semaphore::new(0));
        hub.listen(
            HubChannel::Storage,
            Arc::new(GatedListener {
                tx,
                gate: Arc::clone(&gate),
            }),
        );

        // First event occupies the worker; wait until it is being handled.
        hub.publish(HubChannel::Storage, HubPayload::new("busy"));
        assert_eq!(recv(&mut rx).await, "busy");

        // Second fills the 1-slot queue, third has nowhere to go.
        hub.publish(HubChannel::Storage, HubPayload::new("queued"));
        hub.publish(HubChannel::Storage, HubPayload::new("dropped"));

        let failure = recv_failure(&mut failures).await;
        assert_eq!(failure.error.as_label(), "delivery_overflow");
        assert_eq!(&*failure.listener, "gated");

        // Unblock the worker; the queued event still arrives.
        gate.add_permits(2);
        assert_eq!(recv(&mut rx).await, "queued");
    }

    #[tokio::test]
    async fn test_shutdown_leaves_hub_inert() {
        let hub = hub();
        let (l, mut rx) = recording_listener("survivor");
        hub.listen(HubChannel::Hub, l);

        hub.shutdown().await;

        hub.publish(HubChannel::Hub, HubPayload::new("too_late"));
        // Workers are gone and the queue senders were dropped.
        assert!(timeout(WAIT, rx.recv()).await.unwrap().is_none());

        // Listening after shutdown hands back a token but never delivers.
        let (late, mut late_rx) = recording_listener("late");
        let token = hub.listen(HubChannel::Hub, late);
        hub.publish(HubChannel::Hub, HubPayload::new("still_too_late"));
        hub.remove(token);
        assert!(late_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_remove_unknown_token_is_noop() {
        let hub = hub();
        let (l, _rx) = recording_listener("once");
        let token = hub.listen(HubChannel::Auth, l);
        hub.remove(token);
        hub.remove(token); // second removal: silently ignored
    }
}
