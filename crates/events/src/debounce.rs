//! Debounced consumption of a subscription.

use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use crate::bus::Subscription;

/// A subscription that only yields a message once the stream has been quiet for
/// `window`.
///
/// Each new message restarts the window; only the latest message of a burst is
/// returned.
#[derive(Debug)]
pub struct Debounced<M> {
    subscription: Subscription<M>,
    window: Duration,
}

impl<M> Debounced<M> {
    pub fn new(subscription: Subscription<M>, window: Duration) -> Self {
        Self {
            subscription,
            window,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Block until a burst of messages settles and return its last message.
    ///
    /// Returns `None` once the bus is gone and nothing is pending. A burst that is
    /// cut short by the bus going away is still delivered.
    pub fn recv(&self) -> Option<M> {
        let mut latest = self.subscription.recv().ok()?;
        loop {
            match self.subscription.recv_timeout(self.window) {
                Ok(message) => latest = message,
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return Some(latest);
                }
            }
        }
    }
}

impl<M> Iterator for Debounced<M> {
    type Item = M;

    fn next(&mut self) -> Option<M> {
        self.recv()
    }
}
