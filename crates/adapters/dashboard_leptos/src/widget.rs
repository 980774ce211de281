//! Wires the tracker subscriber to the browser.

use std::cell::RefCell;

use leptos::task::spawn_local;
use pottydog_app::tracker::{Notifier, StatusRenderer, SubscriberOutcome, TokenGatedSubscriber};
use pottydog_domain::error::PottyError;

use crate::dom::DomStatusSurface;
use crate::grant::HttpGrantSource;
use crate::sse::{EventSourceChannel, SseConnection};

thread_local! {
    static ACTIVE: RefCell<Option<SseConnection>> = const { RefCell::new(None) };
}

/// Reports to the user with `window.alert` and to the console.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn alert(&self, message: &str) {
        let Some(window) = web_sys::window() else {
            leptos::logging::warn!("{message}");
            return;
        };
        if let Err(err) = window.alert_with_message(message) {
            leptos::logging::warn!("failed to show alert: {err:?}");
        }
    }

    fn log_error(&self, error: &PottyError) {
        match std::error::Error::source(error) {
            Some(source) => leptos::logging::error!("{error}: {source}"),
            None => leptos::logging::error!("{error}"),
        }
    }
}

/// Fetch a grant and, when authorised, subscribe `channel` to the widget.
///
/// The subscription stays open until the page unloads or `mount` runs again.
pub fn mount(channel: String) {
    let Some(surface) = DomStatusSurface::from_window() else {
        leptos::logging::error!("no document to mount the status widget on");
        return;
    };
    let subscriber = TokenGatedSubscriber::new(
        HttpGrantSource::new(),
        EventSourceChannel,
        AlertNotifier,
        StatusRenderer::new(surface),
        channel,
    );

    spawn_local(async move {
        if let SubscriberOutcome::Subscribed(connection) = subscriber.run().await {
            ACTIVE.with(|active| active.replace(Some(connection)));
        }
    });
}
