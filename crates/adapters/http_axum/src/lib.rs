//! # pottydog-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **server-side-rendered pages** (askama): landing page,
//!   registration and login forms, owner dashboard, potty activity,
//!   admin dashboard and settings
//! - Keep **cookie sessions** for logged-in owners and administrators
//! - Serve the **token endpoint** (`POST /get_pubnub_token`) the status
//!   widget calls before subscribing
//! - Serve the **channel stream** (`GET /api/channels/{channel}/stream`)
//!   as Server-Sent Events, gated by the access token
//! - Serve static assets (images, the wasm client bundle)
//!
//! ## Forms
//! Every form POSTs and then redirects (PRG) on success; failures re-render
//! the same page with the message and an error status.
//!
//! ## Dependency rule
//! Depends on `pottydog-app` (for port traits and services) and `pottydog-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
mod error;
pub mod pages;
pub mod router;
pub mod session;
pub mod state;

pub use error::{ApiError, PageError};
