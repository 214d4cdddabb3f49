//! # Hub configuration.
//!
//! Provides [`HubConfig`] centralized settings for a hub instance.
//!
//! ## Sentinel values
//! - `Listen::queue_capacity() = 0` → subscription uses
//!   [`HubConfig::queue_capacity`] instead

/// Configuration for a hub instance.
///
/// ## Field semantics
/// - `queue_capacity`: Default per-subscription queue size (min 1; clamped)
///
/// ## Notes
/// All fields are public for flexibility. Prefer the clamped accessor over
/// reading fields directly to avoid sprinkling sentinel checks across the
/// codebase.
#[derive(Clone, Debug)]
pub struct HubConfig {
    /// Default capacity of each subscription's delivery queue.
    ///
    /// Used for every subscription whose listener does not declare its own
    /// capacity via [`Listen::queue_capacity`](crate::Listen::queue_capacity).
    /// A subscription whose queue is full drops events for that listener only
    /// (reported through the failure sink).
    pub queue_capacity: usize,
}

impl HubConfig {
    /// Returns the default queue capacity clamped to a minimum of 1.
    ///
    /// The hub uses this value to avoid constructing an invalid channel.
    #[inline]
    pub fn queue_capacity_clamped(&self) -> usize {
        self.queue_capacity.max(1)
    }
}

impl Default for HubConfig {
    /// Default configuration:
    ///
    /// - `queue_capacity = 1024` (good baseline)
    fn default() -> Self {
        Self {
            queue_capacity: 1024,
        }
    }
}
