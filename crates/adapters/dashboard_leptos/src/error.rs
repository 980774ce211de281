//! Errors raised by the browser bindings.

use pottydog_domain::error::PottyError;

/// A failed request, an undecodable body or a refused browser API call.
#[derive(Debug, Clone)]
pub struct ClientError {
    pub message: String,
}

impl ClientError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ClientError {}

impl From<gloo_net::Error> for ClientError {
    fn from(err: gloo_net::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<ClientError> for PottyError {
    fn from(err: ClientError) -> Self {
        PottyError::Transport(Box::new(err))
    }
}
