//! HS256 channel access tokens.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};

use pottydog_app::ports::{AccessRequest, AccessTokenIssuer};
use pottydog_domain::error::PottyError;
use pottydog_domain::grant::AccessClaims;

use crate::error::AccessError;

/// Signs and verifies [`AccessClaims`] with a shared secret.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    fn claims_for(request: &AccessRequest) -> AccessClaims {
        let now = chrono::Utc::now().timestamp();
        AccessClaims {
            sub: request.user_id.to_string(),
            uuid: request.uuid.clone(),
            channel: request.channel.clone(),
            read: request.permissions.read,
            write: request.permissions.write,
            iat: now,
            exp: now + i64::from(request.ttl_minutes) * 60,
        }
    }
}

impl AccessTokenIssuer for JwtTokenIssuer {
    fn issue(&self, request: &AccessRequest) -> Result<String, PottyError> {
        let claims = Self::claims_for(request);
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| AccessError::Sign(err).into())
    }

    fn verify(&self, token: &str) -> Result<AccessClaims, PottyError> {
        jsonwebtoken::decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!(error = %err, "access token rejected");
                AccessError::Rejected(err).into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pottydog_domain::error::AccessDenied;
    use pottydog_domain::grant::ChannelPermissions;
    use pottydog_domain::id::UserId;

    fn request(ttl_minutes: u32) -> AccessRequest {
        AccessRequest {
            user_id: UserId::new(),
            uuid: "dashboard-bob".to_string(),
            channel: "Channel-Barcelona".to_string(),
            permissions: ChannelPermissions {
                read: true,
                write: false,
            },
            ttl_minutes,
        }
    }

    #[test]
    fn should_round_trip_claims_with_same_secret() {
        let issuer = JwtTokenIssuer::new("test-secret");
        let req = request(1440);
        let token = issuer.issue(&req).unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.sub, req.user_id.to_string());
        assert_eq!(claims.uuid, "dashboard-bob");
        assert_eq!(claims.channel, "Channel-Barcelona");
        assert!(claims.read);
        assert!(!claims.write);
        assert_eq!(claims.exp - claims.iat, 1440 * 60);
    }

    #[test]
    fn should_reject_token_signed_with_other_secret() {
        let token = JwtTokenIssuer::new("secret-a").issue(&request(60)).unwrap();
        let result = JwtTokenIssuer::new("secret-b").verify(&token);
        assert!(matches!(
            result,
            Err(PottyError::Denied(AccessDenied::InvalidToken))
        ));
    }

    #[test]
    fn should_reject_expired_token() {
        let issuer = JwtTokenIssuer::new("test-secret");
        let mut claims = JwtTokenIssuer::claims_for(&request(1));
        claims.exp = claims.iat - 600;
        let token =
            jsonwebtoken::encode(&Header::default(), &claims, &issuer.encoding_key).unwrap();

        assert!(issuer.verify(&token).is_err());
    }

    #[test]
    fn should_reject_garbage() {
        let issuer = JwtTokenIssuer::new("test-secret");
        assert!(issuer.verify("invalid.token.here").is_err());
    }
}
