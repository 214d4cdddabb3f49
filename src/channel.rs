//! # Hub channels: logical groupings of related events.
//!
//! [`HubChannel`] names the stream an event belongs to. The well-known
//! variants cover the runtime's own categories (auth, data store, network,
//! storage, hub housekeeping); [`HubChannel::Custom`] lets collaborators
//! define their own streams without touching this crate.
//!
//! ## Identity
//! A channel **is** its logical name. Equality and hashing go through
//! [`HubChannel::as_str`], so a custom channel that spells a well-known name
//! addresses the same listener set:
//!
//! ```rust
//! use synchub::HubChannel;
//!
//! assert_eq!(HubChannel::custom("storage"), HubChannel::Storage);
//! assert_ne!(HubChannel::custom("metrics"), HubChannel::Storage);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Named stream of related events.
///
/// Cheap to clone (custom names are `Arc<str>`), immutable once constructed.
#[derive(Clone, Debug, Eq)]
pub enum HubChannel {
    /// Authentication and session lifecycle events.
    Auth,
    /// Record sync state changes from the persistence/sync layer.
    DataStore,
    /// Network reachability and transport state changes.
    Network,
    /// Local storage events (writes, schema migrations).
    Storage,
    /// Hub housekeeping events.
    Hub,
    /// Caller-defined channel, addressed purely by name.
    Custom(Arc<str>),
}

impl HubChannel {
    /// Creates a custom channel from a name.
    pub fn custom(name: impl Into<Arc<str>>) -> Self {
        HubChannel::Custom(name.into())
    }

    /// Returns the logical name of the channel.
    ///
    /// This is the channel's identity: two channels with the same name are
    /// the same channel, regardless of how they were constructed.
    pub fn as_str(&self) -> &str {
        match self {
            HubChannel::Auth => "auth",
            HubChannel::DataStore => "datastore",
            HubChannel::Network => "network",
            HubChannel::Storage => "storage",
            HubChannel::Hub => "hub",
            HubChannel::Custom(name) => name,
        }
    }
}

impl PartialEq for HubChannel {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Hash for HubChannel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for HubChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
