//! Channel subscription over `/api/channels/{channel}/stream`.
//!
//! The server relays device messages of a channel as server-sent events;
//! each event's data is the JSON payload published on the channel.

use pottydog_app::tracker::subscriber::MessageHandler;
use pottydog_app::tracker::ChannelSource;
use pottydog_domain::error::PottyError;
use wasm_bindgen::prelude::*;
use web_sys::{EventSource, MessageEvent};

use crate::error::ClientError;

/// Guard that closes the `EventSource` connection on drop.
pub struct SseConnection {
    source: EventSource,
    on_message: Closure<dyn FnMut(MessageEvent)>,
    on_error: Closure<dyn FnMut(web_sys::Event)>,
}

impl Drop for SseConnection {
    fn drop(&mut self) {
        self.source.close();
    }
}

/// Percent-encode a query parameter value.
fn encode_query_value(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('+', "%2B")
        .replace('&', "%26")
        .replace('=', "%3D")
        .replace('#', "%23")
        .replace('?', "%3F")
        .replace('/', "%2F")
        .replace(' ', "%20")
}

/// Build the stream URL for `channel`, authenticated as `uuid`.
pub fn stream_url(channel: &str, uuid: &str, token: &str) -> String {
    format!(
        "/api/channels/{}/stream?auth={}&uuid={}",
        encode_query_value(channel),
        encode_query_value(token),
        encode_query_value(uuid),
    )
}

/// Opens one `EventSource` per subscription.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventSourceChannel;

impl ChannelSource for EventSourceChannel {
    type Subscription = SseConnection;

    fn subscribe(
        &self,
        channel: &str,
        uuid: &str,
        token: &str,
        mut on_message: MessageHandler,
    ) -> Result<SseConnection, PottyError> {
        let source = EventSource::new(&stream_url(channel, uuid, token))
            .map_err(|err| ClientError::new(format!("failed to create EventSource: {err:?}")))?;

        let on_message = Closure::<dyn FnMut(MessageEvent)>::new(move |msg: MessageEvent| {
            let Some(data) = msg.data().as_string() else {
                return;
            };
            match serde_json::from_str::<serde_json::Value>(&data) {
                Ok(payload) => on_message(payload),
                Err(err) => {
                    leptos::logging::warn!("failed to parse channel message: {err}");
                }
            }
        });

        let on_error = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            leptos::logging::warn!("channel stream error, browser will reconnect");
        });

        // Closes the source if a listener cannot be attached.
        let connection = SseConnection {
            source,
            on_message,
            on_error,
        };
        connection
            .source
            .add_event_listener_with_callback("message", connection.on_message.as_ref().unchecked_ref())
            .map_err(|err| ClientError::new(format!("failed to add message listener: {err:?}")))?;
        connection
            .source
            .add_event_listener_with_callback("error", connection.on_error.as_ref().unchecked_ref())
            .map_err(|err| ClientError::new(format!("failed to add error listener: {err:?}")))?;

        Ok(connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_stream_url_with_encoded_query() {
        let url = stream_url("Channel-Barcelona", "dashboard-ann lee", "a.b_c");

        assert_eq!(
            url,
            "/api/channels/Channel-Barcelona/stream?auth=a.b_c&uuid=dashboard-ann%20lee"
        );
    }

    #[test]
    fn should_escape_reserved_characters() {
        assert_eq!(encode_query_value("a&b=c+d%"), "a%26b%3Dc%2Bd%25");
    }
}
