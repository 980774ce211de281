//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod access;
pub mod channel;
pub mod storage;

pub use access::{AccessRequest, AccessTokenIssuer, PasswordHasher};
pub use channel::ChannelPublisher;
pub use storage::{PottyLogRepository, PreferencesRepository, UserRepository};
