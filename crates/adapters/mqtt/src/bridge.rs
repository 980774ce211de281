//! Broker → channel hub relay.

use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};

use pottydog_app::ports::ChannelPublisher;
use pottydog_domain::channel::ChannelMessage;

use crate::config::MqttConfig;
use crate::error::MqttError;

const REQUEST_CAPACITY: usize = 10;
const RETRY_PAUSE: Duration = Duration::from_secs(1);

/// Forwards device publishes on one channel topic to a [`ChannelPublisher`].
pub struct MqttBridge<P> {
    config: MqttConfig,
    channel: String,
    publisher: P,
}

impl<P> MqttBridge<P>
where
    P: ChannelPublisher + Send + Sync + 'static,
{
    pub fn new(config: MqttConfig, channel: impl Into<String>, publisher: P) -> Self {
        Self {
            config,
            channel: channel.into(),
            publisher,
        }
    }

    /// Spawn the relay on the current tokio runtime.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Poll the broker forever.
    pub async fn run(self) {
        let topic = self.config.topic_for(&self.channel);
        let mut options = MqttOptions::new(
            &self.config.client_id,
            &self.config.broker_host,
            self.config.broker_port,
        );
        options.set_keep_alive(Duration::from_secs(u64::from(self.config.keep_alive_secs)));
        let (client, mut eventloop) = AsyncClient::new(options, REQUEST_CAPACITY);

        tracing::info!(
            host = %self.config.broker_host,
            port = self.config.broker_port,
            %topic,
            "mqtt bridge started"
        );

        loop {
            self.poll_once(&client, &mut eventloop, &topic).await;
        }
    }

    async fn poll_once(&self, client: &AsyncClient, eventloop: &mut EventLoop, topic: &str) {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                // subscriptions do not survive a reconnect with a clean session
                if let Err(err) = client.subscribe(topic, QoS::AtLeastOnce).await {
                    tracing::warn!(error = %MqttError::Client(err), %topic, "mqtt subscribe failed");
                }
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                if publish.topic != topic {
                    return;
                }
                match self.forward(&publish.payload).await {
                    Ok(()) => {}
                    Err(err @ MqttError::PayloadParse(_)) => {
                        tracing::warn!(error = %err, %topic, "dropping non-JSON payload");
                    }
                    Err(err) => {
                        tracing::error!(error = %err, %topic, "failed to forward payload");
                    }
                }
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(error = %err, "mqtt connection error");
                tokio::time::sleep(RETRY_PAUSE).await;
            }
        }
    }

    /// Decode `payload` and publish it on the hub.
    async fn forward(&self, payload: &[u8]) -> Result<(), MqttError> {
        let message = decode(&self.channel, payload)?;
        self.publisher
            .publish(message)
            .await
            .map_err(MqttError::Domain)
    }
}

fn decode(channel: &str, payload: &[u8]) -> Result<ChannelMessage, MqttError> {
    let value: serde_json::Value =
        serde_json::from_slice(payload).map_err(MqttError::PayloadParse)?;
    Ok(ChannelMessage::new(channel, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pottydog_app::channel_hub::InProcessChannelHub;
    use std::sync::Arc;

    fn bridge(hub: Arc<InProcessChannelHub>) -> MqttBridge<Arc<InProcessChannelHub>> {
        MqttBridge::new(MqttConfig::default(), "Channel-Barcelona", hub)
    }

    #[test]
    fn should_decode_json_payload_for_channel() {
        let message = decode("Channel-Barcelona", br#"{"motion":"potty","timestamp":1.5}"#)
            .unwrap();
        assert_eq!(message.channel, "Channel-Barcelona");
        assert_eq!(message.payload["motion"], "potty");
    }

    #[test]
    fn should_reject_non_json_payload() {
        let result = decode("Channel-Barcelona", b"motion=potty");
        assert!(matches!(result, Err(MqttError::PayloadParse(_))));
    }

    #[tokio::test]
    async fn should_forward_payload_to_hub_subscribers() {
        let hub = Arc::new(InProcessChannelHub::new(8));
        let mut rx = hub.subscribe();

        bridge(Arc::clone(&hub))
            .forward(br#"{"motion":"detected"}"#)
            .await
            .unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.payload["motion"], "detected");
    }

    #[tokio::test]
    async fn should_not_forward_invalid_payload() {
        let hub = Arc::new(InProcessChannelHub::new(8));
        let mut rx = hub.subscribe();

        let result = bridge(Arc::clone(&hub)).forward(b"\xff\xfe").await;
        assert!(result.is_err());
        assert!(rx.try_recv().is_err());
    }
}
