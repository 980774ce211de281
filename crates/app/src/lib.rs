//! # pottydog-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `UserRepository`, `PreferencesRepository`, `PottyLogRepository`: persistence
//!   - `ChannelPublisher`: publish on the real-time channel
//!   - `AccessTokenIssuer`: issue/verify channel access tokens
//!   - `PasswordHasher`: hash/verify account passwords
//! - Define **driving/inbound ports** as use-case structs:
//!   - `AccountService`: register, login, admin login
//!   - `GrantService`: per-user channel grants
//!   - `PermissionService`: admin permission management
//!   - `PottyLogService`, `SettingsService`
//! - Provide **in-process infrastructure** (channel hub) that doesn't need IO
//! - Provide the **tracker** logic run in the browser: status rendering and
//!   the token-gated channel subscription, expressed against small traits
//!
//! ## Dependency rule
//! Depends on `pottydog-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod channel_hub;
pub mod ports;
pub mod services;
pub mod tracker;
