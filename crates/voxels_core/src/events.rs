//! # Change Feed
//!
//! Channel-based fan-out of world events.
//!
//! ```text
//! ┌────────────┐  publish   ┌──────────┐   try_send   ┌───────────────┐
//! │ ChunkStore │───────────>│ EventBus │─────────────>│ EventReceiver │ (x N)
//! └────────────┘            └──────────┘              └───────────────┘
//! ```
//!
//! Every subscriber gets its own bounded channel. A full channel drops the
//! event for that subscriber only; a dropped receiver is pruned on the next
//! publish.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::Mutex;

/// Default capacity of each subscriber channel.
pub const DEFAULT_CAPACITY: usize = 1024;

/// A single voxel write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VoxelChange {
    /// World position of the voxel.
    pub position: [i32; 3],
    /// Value written.
    pub value: u8,
}

/// Fan-out event bus.
pub struct EventBus<E> {
    /// One sender per live subscriber.
    subscribers: Mutex<Vec<Sender<E>>>,
    /// Capacity for newly created channels.
    capacity: usize,
}

impl<E: Clone> EventBus<E> {
    /// Creates a new event bus.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum events buffered per subscriber before new
    ///                events are dropped for it.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            capacity: capacity.max(1),
        }
    }

    /// Opens a new subscriber channel.
    #[must_use]
    pub fn subscribe(&self) -> EventReceiver<E> {
        let (sender, receiver) = bounded(self.capacity);
        self.subscribers.lock().push(sender);
        EventReceiver { receiver }
    }

    /// Sends `event` to every live subscriber (non-blocking).
    ///
    /// Returns the number of subscribers that accepted it.
    pub fn publish(&self, event: &E) -> usize {
        let mut delivered = 0;
        self.subscribers
            .lock()
            .retain(|sender| match sender.try_send(event.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                // Slow consumer - drop this event for it, keep the channel
                Err(TrySendError::Full(_)) => true,
                Err(TrySendError::Disconnected(_)) => false,
            });
        delivered
    }

    /// Number of subscriber channels still registered.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

impl<E: Clone> Default for EventBus<E> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Handle for receiving events.
pub struct EventReceiver<E> {
    receiver: Receiver<E>,
}

impl<E> EventReceiver<E> {
    /// Receives all pending events (non-blocking).
    #[inline]
    pub fn drain(&self) -> Vec<E> {
        self.receiver.try_iter().collect()
    }

    /// Receives one event (non-blocking).
    #[inline]
    pub fn try_recv(&self) -> Option<E> {
        self.receiver.try_recv().ok()
    }

    /// Returns the number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Checks if there are pending events.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}
