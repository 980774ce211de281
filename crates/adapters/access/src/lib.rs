//! # pottydog-adapter-access
//!
//! Access adapter: signs the tokens browsers present when subscribing to
//! the real-time channel, and hashes account passwords.
//!
//! ## Responsibilities
//! - Implement `AccessTokenIssuer` with HS256 JWTs (`jsonwebtoken`)
//! - Implement `PasswordHasher` with argon2id
//!
//! ## Dependency rule
//! Depends on `pottydog-app` (for port traits) and `pottydog-domain` (for
//! claims and errors). Never imported by domain or app.

mod error;
mod jwt;
mod password;

pub use error::AccessError;
pub use jwt::JwtTokenIssuer;
pub use password::Argon2PasswordHasher;
