//! Fetches the caller's auth grant from the server.

use std::future::Future;

use gloo_net::http::Request;
use pottydog_app::tracker::GrantSource;
use pottydog_domain::error::PottyError;
use pottydog_domain::grant::AuthGrant;
use web_sys::RequestCredentials;

use crate::error::ClientError;

pub const GRANT_PATH: &str = "/get_pubnub_token";

/// `POST /get_pubnub_token` with the session cookie.
///
/// The body is decoded whatever the status code: refusals carry their
/// user-facing message in the same shape as a grant.
#[derive(Debug, Clone)]
pub struct HttpGrantSource {
    path: String,
}

impl HttpGrantSource {
    pub fn new() -> Self {
        Self {
            path: GRANT_PATH.to_string(),
        }
    }
}

impl Default for HttpGrantSource {
    fn default() -> Self {
        Self::new()
    }
}

impl GrantSource for HttpGrantSource {
    fn fetch(&self) -> impl Future<Output = Result<AuthGrant, PottyError>> {
        let path = self.path.clone();
        async move {
            let resp = Request::post(&path)
                .credentials(RequestCredentials::SameOrigin)
                .header("Accept", "application/json")
                .send()
                .await
                .map_err(ClientError::from)?;
            let grant: AuthGrant = resp.json().await.map_err(ClientError::from)?;
            Ok(grant)
        }
    }
}
