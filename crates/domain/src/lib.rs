//! # pottydog-domain
//!
//! Pure domain model for the pottydog pet-monitoring dashboard.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **motion tags** reported by the door sensor and the static
//!   **status presentation** table used to display them
//! - Define **channel messages** carried by the real-time relay
//! - Define **auth grants** and access-token claims for channel subscriptions
//! - Define **users**, **preferences** and **potty logs**, including every
//!   validation rule applied at registration and settings updates
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod channel;
pub mod grant;
pub mod motion;
pub mod potty_log;
pub mod preferences;
pub mod status;
pub mod user;
