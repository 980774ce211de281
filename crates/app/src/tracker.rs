//! Browser-side tracker logic.
//!
//! Runs inside the dashboard page: the [`renderer`] paints the status widget
//! from a [`StatusPresentation`](pottydog_domain::status::StatusPresentation)
//! and the [`subscriber`] fetches a grant and wires channel messages to the
//! renderer. Both are written against small traits so the DOM and network
//! bindings live in the client crate and tests use fakes.
//!
//! Everything here is single-threaded; nothing requires `Send`.

pub mod renderer;
pub mod subscriber;

pub use renderer::{StatusRenderer, StatusSurface};
pub use subscriber::{ChannelSource, GrantSource, Notifier, SubscriberOutcome, TokenGatedSubscriber};
