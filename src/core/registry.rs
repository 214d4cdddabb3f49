//! # Channel registry - subscription lifecycle manager.
//!
//! Maps each [`HubChannel`] to its live subscriptions and owns the worker
//! handles driving them:
//! - `insert` → registers a subscription under its channel
//! - `remove` → detaches exactly one subscription by token (idempotent)
//! - `snapshot` → delivery targets for one channel at a point in time
//! - `drain` → empties the registry for shutdown
//!
//! ## Rules
//! - Registry owns the subscription entries (queue sender + JoinHandle)
//! - Dropping an entry's sender ends its worker: the worker drains what was
//!   already queued, then exits
//! - A snapshot is unaffected by later inserts/removals
//! - All operations take short internal locks; callers never synchronize

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::channel::HubChannel;
use crate::payload::HubPayload;

/// Opaque handle identifying one subscription.
///
/// Returned by [`Hub::listen`](crate::Hub::listen); every call yields a
/// distinct token, even for the same listener on the same channel. Pass it to
/// [`Hub::remove`](crate::Hub::remove) to end exactly that subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionToken {
    id: u64,
}

/// One live subscription: identity plus the sending half of its queue.
pub(crate) struct Registration {
    pub(crate) token: SubscriptionToken,
    pub(crate) name: Arc<str>,
    pub(crate) sender: mpsc::Sender<Arc<HubPayload>>,
}

/// Snapshot entry handed to the publish path.
#[derive(Clone)]
pub(crate) struct DeliveryTarget {
    pub(crate) name: Arc<str>,
    pub(crate) sender: mpsc::Sender<Arc<HubPayload>>,
}

struct Inner {
    by_channel: HashMap<HubChannel, Vec<Registration>>,
    by_token: HashMap<u64, HubChannel>,
    workers: HashMap<u64, JoinHandle<()>>,
}

/// Concurrently-safe mapping from channel to live subscriptions.
pub(crate) struct ChannelRegistry {
    inner: RwLock<Inner>,
    next_id: AtomicU64,
}

impl ChannelRegistry {
    pub(crate) fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                by_channel: HashMap::new(),
                by_token: HashMap::new(),
                workers: HashMap::new(),
            }),
            next_id: AtomicU64::new(0),
        }
    }

    /// Allocates a token unique within this registry.
    pub(crate) fn next_token(&self) -> SubscriptionToken {
        SubscriptionToken {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Registers a subscription and its worker under `channel`.
    pub(crate) fn insert(
        &self,
        channel: HubChannel,
        registration: Registration,
        worker: JoinHandle<()>,
    ) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let token = registration.token;
        inner.by_token.insert(token.id, channel.clone());
        inner.workers.insert(token.id, worker);
        inner.by_channel.entry(channel).or_default().push(registration);
    }

    /// Removes exactly the subscription identified by `token`.
    ///
    /// Returns `true` when a subscription was removed, `false` when the token
    /// was unknown (already removed - a no-op, not an error). Dropping the
    /// entry drops its queue sender, which lets the worker drain and exit;
    /// deliveries already queued at removal time may still complete.
    pub(crate) fn remove(&self, token: SubscriptionToken) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let Some(channel) = inner.by_token.remove(&token.id) else {
            return false;
        };
        // Worker handle is dropped, not awaited: the worker finishes on its
        // own once the sender is gone, and `remove` stays non-blocking.
        inner.workers.remove(&token.id);

        if let Some(entries) = inner.by_channel.get_mut(&channel) {
            entries.retain(|r| r.token != token);
            if entries.is_empty() {
                inner.by_channel.remove(&channel);
            }
        }
        true
    }

    /// Returns the delivery targets registered on `channel` right now, in
    /// subscription order.
    ///
    /// The returned set is a copy: later inserts and removals do not affect
    /// a snapshot already taken.
    pub(crate) fn snapshot(&self, channel: &HubChannel) -> Vec<DeliveryTarget> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner
            .by_channel
            .get(channel)
            .map(|entries| {
                entries
                    .iter()
                    .map(|r| DeliveryTarget {
                        name: Arc::clone(&r.name),
                        sender: r.sender.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Empties the registry, returning every worker handle.
    ///
    /// Dropping the registrations closes all queues; the caller awaits the
    /// returned handles to finish shutdown.
    pub(crate) fn drain(&self) -> Vec<JoinHandle<()>> {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.by_channel.clear();
        inner.by_token.clear();
        inner.workers.drain().map(|(_, handle)| handle).collect()
    }
}
