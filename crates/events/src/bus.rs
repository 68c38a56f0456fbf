//! Event publishing/subscription abstraction (mechanics only).
//!
//! Form fields publish their changes on a bus; listeners (autocomplete, dependent
//! validation) subscribe and consume the stream at their own pace, usually through
//! a [`Debounced`](crate::Debounced) wrapper.
//!
//! The bus makes minimal assumptions:
//!
//! - **Broadcast**: every subscription receives every message published after it was created
//! - **In-order per publisher**: messages arrive in publication order
//! - **No persistence**: a subscriber that is gone simply stops receiving

use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvError, RecvTimeoutError, TryRecvError};
use std::time::Duration;

/// A subscription to an event stream.
///
/// ## Usage Pattern
///
/// ```ignore
/// let bus: Arc<InMemoryEventBus<FieldChanged<String>>> = ...;
/// let subscription = bus.subscribe();
///
/// loop {
///     match subscription.recv_timeout(Duration::from_millis(200)) {
///         Ok(change) => remember(change),
///         Err(RecvTimeoutError::Timeout) => flush(),      // quiet period elapsed
///         Err(RecvTimeoutError::Disconnected) => break,   // bus dropped
///     }
/// }
/// ```
///
/// Subscriptions are meant for a single consuming thread.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// `publish()` can fail (e.g. internal lock poisoning). Callers on the UI path log
/// the failure and keep going: a lost change notification never blocks editing.
///
/// The trait requires `Send + Sync` so the bus can be shared with listener threads.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
