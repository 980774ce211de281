//! Server-Sent Events stream of one channel.

use std::convert::Infallible;

use axum::extract::{Path, Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use serde::Deserialize;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_util::sync::CancellationToken;

use pottydog_app::ports::{
    AccessTokenIssuer, PasswordHasher, PottyLogRepository, PreferencesRepository, UserRepository,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Credentials of the subscribing client.
#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    #[serde(default)]
    pub auth: String,
    #[serde(default)]
    pub uuid: String,
}

/// `GET /api/channels/{channel}/stream?auth=<token>&uuid=<uuid>`
///
/// Each payload published on `channel` after the subscription is sent as a
/// JSON `data:` frame. The token must be scoped to this channel and uuid and
/// grant read, otherwise the request is refused with 403. The stream ends
/// when the server shuts down.
pub async fn stream<UR, PR, LR, TI, PH>(
    State(state): State<AppState<UR, PR, LR, TI, PH>>,
    Path(channel): Path<String>,
    Query(query): Query<StreamQuery>,
) -> Result<Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>>, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PreferencesRepository + Send + Sync + 'static,
    LR: PottyLogRepository + Send + Sync + 'static,
    TI: AccessTokenIssuer + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    let claims = state
        .grants
        .verify_subscription(&query.auth, &channel, &query.uuid)?;
    tracing::debug!(uuid = %claims.uuid, channel = %channel, "channel subscriber connected");

    let receiver = state.hub.subscribe();
    let frames = BroadcastStream::new(receiver)
        .filter_map(move |result| match result {
            Ok(message) if message.channel == channel => {
                match serde_json::to_string(&message.payload) {
                    Ok(json) => Some(Frame::Event(Event::default().data(json))),
                    Err(err) => {
                        tracing::warn!(%err, "failed to serialize channel payload");
                        None
                    }
                }
            }
            Ok(_) => None,
            Err(BroadcastStreamRecvError::Lagged(n)) => {
                tracing::warn!(skipped = n, "channel subscriber lagged, messages dropped");
                None
            }
        })
        .merge(stop_on(state.shutdown.clone()))
        .map_while(|frame| match frame {
            Frame::Event(event) => Some(Ok(event)),
            Frame::Stop => None,
        });

    Ok(Sse::new(frames).keep_alive(KeepAlive::default()))
}

enum Frame {
    Event(Event),
    Stop,
}

/// Yields a single [`Frame::Stop`] once `shutdown` is cancelled.
fn stop_on(shutdown: CancellationToken) -> impl tokio_stream::Stream<Item = Frame> + Send {
    tokio_stream::once(()).then(move |()| {
        let shutdown = shutdown.clone();
        async move {
            shutdown.cancelled_owned().await;
            Frame::Stop
        }
    })
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    use pottydog_app::ports::ChannelPublisher;
    use pottydog_domain::channel::ChannelMessage;

    use tokio_util::sync::CancellationToken;

    use crate::pages::test_support::{Fixture, fixture, get};
    use crate::router::build;

    async fn token_for(fx: &Fixture, can_read: bool) -> String {
        let user = fx.owner("alice", "alice@example.com", can_read);
        fx.state.grants.grant(user.id).await.unwrap().token.unwrap()
    }

    fn stream_uri(channel: &str, token: &str, uuid: &str) -> String {
        let token = url_encode(token);
        format!("/api/channels/{channel}/stream?auth={token}&uuid={uuid}")
    }

    fn url_encode(raw: &str) -> String {
        raw.bytes()
            .map(|b| match b {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' => {
                    (b as char).to_string()
                }
                _ => format!("%{b:02X}"),
            })
            .collect()
    }

    #[tokio::test]
    async fn should_refuse_token_for_another_uuid() {
        let fx = fixture();
        let token = token_for(&fx, true).await;

        let response = build(fx.state, None)
            .oneshot(get(
                &stream_uri("Channel-Barcelona", &token, "dashboard-mallory"),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn should_refuse_token_for_another_channel() {
        let fx = fixture();
        let token = token_for(&fx, true).await;

        let response = build(fx.state, None)
            .oneshot(get(
                &stream_uri("Channel-Madrid", &token, "dashboard-alice"),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn should_refuse_token_without_read() {
        let fx = fixture();
        let token = token_for(&fx, false).await;

        let response = build(fx.state, None)
            .oneshot(get(
                &stream_uri("Channel-Barcelona", &token, "dashboard-alice"),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn should_refuse_garbage_token() {
        let fx = fixture();
        let response = build(fx.state, None)
            .oneshot(get(
                &stream_uri("Channel-Barcelona", "garbage", "dashboard-alice"),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn should_forward_only_payloads_of_requested_channel() {
        let fx = fixture();
        let token = token_for(&fx, true).await;
        let hub = std::sync::Arc::clone(&fx.hub);

        let response = build(fx.state, None)
            .oneshot(get(
                &stream_uri("Channel-Barcelona", &token, "dashboard-alice"),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        hub.publish(ChannelMessage::new("Channel-Madrid", json!({"motion": "potty"})))
            .await
            .unwrap();
        hub.publish(ChannelMessage::new(
            "Channel-Barcelona",
            json!({"motion": "detected"}),
        ))
        .await
        .unwrap();

        let mut body = response.into_body();
        let frame = body.frame().await.unwrap().unwrap();
        let text = String::from_utf8(frame.into_data().unwrap().to_vec()).unwrap();
        assert!(text.contains("data: {\"motion\":\"detected\"}"));
    }

    #[tokio::test]
    async fn should_end_stream_when_server_shuts_down() {
        let fx = fixture();
        let token = token_for(&fx, true).await;
        let shutdown = CancellationToken::new();
        let state = fx.state.with_shutdown(shutdown.clone());

        let response = build(state, None)
            .oneshot(get(
                &stream_uri("Channel-Barcelona", &token, "dashboard-alice"),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        shutdown.cancel();
        let ended = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            response.into_body().collect(),
        )
        .await;

        assert!(ended.is_ok(), "stream still open after shutdown");
    }
}
