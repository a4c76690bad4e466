//! Event streaming Relay
//!
//! Relay carries UI events (pointer moves, key presses, clicks) towards the
//! component that owns the state, using an unbounded channel. Events are
//! delivered in send order.

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};

/// Type-safe event relay.
///
/// Relays follow the `{source}_{event}_relay` naming pattern at their call
/// sites, e.g. `item_clicked_relay` or `key_pressed_relay`.
///
/// # Examples
///
/// ```rust
/// use dataflow::relay;
/// use futures::StreamExt;
///
/// # futures::executor::block_on(async {
/// let (item_clicked_relay, mut item_clicked_stream) = relay::<u32>();
///
/// item_clicked_relay.send(7);
/// assert_eq!(item_clicked_stream.next().await, Some(7));
/// # });
/// ```
#[derive(Clone, Debug)]
pub struct Relay<T>
where
    T: Send + 'static,
{
    sender: UnboundedSender<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    /// The receiving side has been dropped
    #[error("relay channel closed")]
    ChannelClosed,
}

impl<T> Relay<T>
where
    T: Send + 'static,
{
    /// Create a new Relay with its receiving stream.
    pub fn new() -> (Self, UnboundedReceiver<T>) {
        let (sender, receiver) = unbounded();
        (Relay { sender }, receiver)
    }

    /// Send an event through the relay.
    ///
    /// If the receiver has been dropped, the event is silently discarded.
    /// Use `try_send()` when the caller needs to know.
    pub fn send(&self, value: T) {
        let _ = self.sender.unbounded_send(value);
    }

    /// Send an event, failing when the receiver is gone.
    pub fn try_send(&self, value: T) -> Result<(), RelayError> {
        self.sender
            .unbounded_send(value)
            .map_err(|_| RelayError::ChannelClosed)
    }

    pub fn is_connected(&self) -> bool {
        !self.sender.is_closed()
    }
}

impl<T> Default for Relay<T>
where
    T: Send + 'static,
{
    /// A disconnected relay: every event is discarded.
    ///
    /// Useful as a placeholder for components that do not wire a handler.
    fn default() -> Self {
        let (relay, _receiver) = Self::new();
        relay
    }
}

/// Creates a new Relay with its receiving stream.
pub fn relay<T>() -> (Relay<T>, UnboundedReceiver<T>)
where
    T: Send + 'static,
{
    Relay::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn delivers_in_send_order() {
        let (relay, receiver) = relay();

        relay.send(1);
        relay.send(2);
        relay.send(3);
        drop(relay);

        let received: Vec<i32> = receiver.collect().await;
        assert_eq!(received, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn try_send_reports_closed_channel() {
        let (relay, mut receiver) = Relay::new();

        assert!(relay.try_send("first".to_string()).is_ok());
        assert_eq!(receiver.next().await, Some("first".to_string()));

        drop(receiver);

        assert_eq!(
            relay.try_send("lost".to_string()),
            Err(RelayError::ChannelClosed)
        );
        assert!(!relay.is_connected());
    }

    #[test]
    fn default_relay_is_disconnected() {
        let relay = Relay::<u8>::default();
        relay.send(1);
        assert!(!relay.is_connected());
    }
}
