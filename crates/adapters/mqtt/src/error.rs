//! MQTT adapter error types.

use pottydog_domain::error::PottyError;

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The rumqttc client rejected a request.
    #[error("MQTT client error")]
    Client(#[source] rumqttc::ClientError),

    /// Failed to parse an incoming MQTT payload as JSON.
    #[error("failed to parse MQTT payload")]
    PayloadParse(#[source] serde_json::Error),

    /// A domain-level error raised while forwarding a message.
    #[error("domain error")]
    Domain(#[source] PottyError),
}

impl MqttError {
    /// Convert into a [`PottyError::Transport`] for propagation across port
    /// boundaries.
    pub fn into_domain(self) -> PottyError {
        match self {
            Self::Domain(err) => err,
            other => PottyError::Transport(Box::new(other)),
        }
    }
}

impl From<MqttError> for PottyError {
    fn from(err: MqttError) -> Self {
        err.into_domain()
    }
}
