//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod account_service;
pub mod grant_service;
pub mod permission_service;
pub mod potty_log_service;
pub mod settings_service;

#[cfg(test)]
pub(crate) mod fakes;
