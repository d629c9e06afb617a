//! Notifier implementations.

use mockall::automock;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, warn};

/// Forwards notifications to whichever UI owns the receiving end.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: UnboundedSender<String>,
}

impl ChannelNotifier {
    /// Create a notifier together with the receiver a UI drains messages from.
    #[must_use]
    pub fn channel() -> (Self, UnboundedReceiver<String>) {
        let (sender, receiver) = unbounded_channel();

        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn error(&self, message: &str) {
        debug!(message, "notifying error");

        if self.sender.send(message.to_string()).is_err() {
            warn!(message, "notification dropped, receiver is gone");
        }
    }
}

/// Sink for user-facing error messages.
#[automock]
pub trait Notifier: Send + Sync {
    /// Surface an error message to the user. Fire-and-forget.
    fn error(&self, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_messages_in_order() {
        let (notifier, mut receiver) = ChannelNotifier::channel();

        notifier.error("first");
        notifier.error("second");

        assert_eq!(receiver.try_recv().ok().as_deref(), Some("first"));
        assert_eq!(receiver.try_recv().ok().as_deref(), Some("second"));
        assert!(receiver.try_recv().is_err(), "no further messages expected");
    }

    #[test]
    fn dropped_receiver_does_not_panic() {
        let (notifier, receiver) = ChannelNotifier::channel();

        drop(receiver);

        notifier.error("nobody is listening");
    }
}
