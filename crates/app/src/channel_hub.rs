//! In-process channel hub backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use pottydog_domain::channel::ChannelMessage;
use pottydog_domain::error::PottyError;

use crate::ports::ChannelPublisher;

/// Fan-out point for every channel message seen by this process.
///
/// Messages from all channels share one broadcast queue; subscribers keep
/// the ones whose `channel` they care about. Publishing succeeds even when
/// nobody is listening.
pub struct InProcessChannelHub {
    sender: broadcast::Sender<ChannelMessage>,
}

impl InProcessChannelHub {
    /// Create a new hub with the given queue capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to messages published *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChannelMessage> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl ChannelPublisher for InProcessChannelHub {
    fn publish(
        &self,
        message: ChannelMessage,
    ) -> impl Future<Output = Result<(), PottyError>> + Send {
        // send only fails with zero receivers
        if self.sender.send(message).is_err() {
            tracing::trace!("channel message dropped, no subscribers");
        }
        async { Ok(()) }
    }
}
