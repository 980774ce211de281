//! Channel port: publishing on the real-time relay.

use std::future::Future;

use pottydog_domain::channel::ChannelMessage;
use pottydog_domain::error::PottyError;

/// Publishes messages to everyone subscribed to a channel.
pub trait ChannelPublisher {
    /// Publish a message to all current subscribers of its channel.
    fn publish(
        &self,
        message: ChannelMessage,
    ) -> impl Future<Output = Result<(), PottyError>> + Send;
}

impl<T: ChannelPublisher + Send + Sync> ChannelPublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        message: ChannelMessage,
    ) -> impl Future<Output = Result<(), PottyError>> + Send {
        (**self).publish(message)
    }
}
