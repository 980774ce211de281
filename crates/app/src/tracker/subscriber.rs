//! Token-gated subscriber: grant fetch, then channel subscription.
//!
//! Runs once per page load and never goes back:
//!
//! ```text
//! Init ──fetch──▶ Unregistered   (no token: alert server message)
//!            ├──▶ Unauthorized   (no read: alert fixed message)
//!            ├──▶ Subscribed     (messages feed the renderer)
//!            └──▶ Failed         (fetch failed: log only)
//! ```
//!
//! There is no timeout on the grant fetch and no retry.

use std::future::Future;

use pottydog_domain::channel::dashboard_uuid;
use pottydog_domain::error::{AccessDenied, PottyError};
use pottydog_domain::grant::{AuthGrant, GrantDecision};
use pottydog_domain::status;

use super::renderer::{StatusRenderer, StatusSurface};

/// Callback invoked with every JSON payload received on the channel.
pub type MessageHandler = Box<dyn FnMut(serde_json::Value)>;

/// Where the grant comes from (the server's token endpoint).
pub trait GrantSource {
    fn fetch(&self) -> impl Future<Output = Result<AuthGrant, PottyError>>;
}

/// Opens a subscription on the real-time channel.
pub trait ChannelSource {
    /// Handle keeping the subscription open; dropping it may close it.
    type Subscription;

    /// Subscribe to `channel` as `uuid` using `token`.
    ///
    /// # Errors
    ///
    /// Returns [`PottyError::Transport`] if the subscription cannot be opened.
    fn subscribe(
        &self,
        channel: &str,
        uuid: &str,
        token: &str,
        on_message: MessageHandler,
    ) -> Result<Self::Subscription, PottyError>;
}

/// User-facing alerts and developer-facing logs.
pub trait Notifier {
    fn alert(&self, message: &str);
    fn log_error(&self, error: &PottyError);
}

/// Terminal state reached by [`TokenGatedSubscriber::run`].
#[derive(Debug)]
pub enum SubscriberOutcome<H> {
    Unregistered { message: String },
    Unauthorized,
    Subscribed(H),
    Failed,
}

/// Wires a grant, a channel and a renderer together.
pub struct TokenGatedSubscriber<G, C, N, S> {
    grants: G,
    channels: C,
    notifier: N,
    renderer: StatusRenderer<S>,
    channel: String,
}

impl<G, C, N, S> TokenGatedSubscriber<G, C, N, S>
where
    G: GrantSource,
    C: ChannelSource,
    N: Notifier,
    S: StatusSurface + 'static,
{
    pub fn new(
        grants: G,
        channels: C,
        notifier: N,
        renderer: StatusRenderer<S>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            grants,
            channels,
            notifier,
            renderer,
            channel: channel.into(),
        }
    }

    /// Run the state machine to its terminal state.
    pub async fn run(self) -> SubscriberOutcome<C::Subscription> {
        let grant = match self.grants.fetch().await {
            Ok(grant) => grant,
            Err(err) => {
                self.notifier.log_error(&err);
                return SubscriberOutcome::Failed;
            }
        };

        match grant.decide() {
            GrantDecision::Unregistered { message } => {
                self.notifier.alert(&message);
                SubscriberOutcome::Unregistered { message }
            }
            GrantDecision::Unauthorized => {
                self.notifier
                    .alert(&AccessDenied::NoReadAccess.to_string());
                SubscriberOutcome::Unauthorized
            }
            GrantDecision::Authorized { token, username } => {
                let uuid = dashboard_uuid(&username);
                let renderer = self.renderer;
                let handler: MessageHandler = Box::new(move |payload| {
                    if let Some(presentation) = status::for_payload(&payload) {
                        renderer.render(presentation);
                    }
                });
                match self
                    .channels
                    .subscribe(&self.channel, &uuid, &token, handler)
                {
                    Ok(subscription) => SubscriberOutcome::Subscribed(subscription),
                    Err(err) => {
                        self.notifier.log_error(&err);
                        SubscriberOutcome::Failed
                    }
                }
            }
        }
    }
}
