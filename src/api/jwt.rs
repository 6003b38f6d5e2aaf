use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::constants::SESSION_TOKEN_TYPE;
use crate::config::AuthConfig;
use crate::utils::generate_random_secret;

/// Session Token Claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Staff email
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    pub token_type: String,
}

/// JWT Service for issuing and validating staff sessions
///
/// Built once at startup and shared through `web::Data<Arc<JwtService>>`.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_minutes: u64,
}

impl JwtService {
    pub fn new(secret: &str, session_minutes: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_minutes,
        }
    }

    /// Create JwtService from the `[auth]` config section
    pub fn from_config(config: &AuthConfig) -> Self {
        let secret = if config.jwt_secret.is_empty() {
            warn!(
                "auth.jwt_secret is empty, generating a random secret. \
                 Sessions will not survive a restart."
            );
            generate_random_secret(48)
        } else {
            config.jwt_secret.clone()
        };

        Self::new(&secret, config.session_minutes)
    }

    pub fn session_minutes(&self) -> u64 {
        self.session_minutes
    }

    /// Generate a session token for a staff account
    pub fn generate_session_token(&self, email: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: email.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.session_minutes as i64)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            token_type: SESSION_TOKEN_TYPE.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Validate a session token
    pub fn validate_session_token(
        &self,
        token: &str,
    ) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())?;

        if token_data.claims.token_type != SESSION_TOKEN_TYPE {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_key_32_bytes_long!!";

    fn create_test_service() -> JwtService {
        JwtService::new(SECRET, 60)
    }

    fn sign(claims: &SessionClaims) -> String {
        let key = EncodingKey::from_secret(SECRET.as_bytes());
        encode(&Header::default(), claims, &key).unwrap()
    }

    #[test]
    fn test_generate_and_validate_session_token() {
        let service = create_test_service();
        let token = service.generate_session_token("profe@uni.edu").unwrap();
        let claims = service.validate_session_token(&token).unwrap();

        assert_eq!(claims.sub, "profe@uni.edu");
        assert_eq!(claims.token_type, SESSION_TOKEN_TYPE);
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_invalid_token_rejected() {
        let service = create_test_service();
        assert!(service.validate_session_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_test_service()
            .generate_session_token("profe@uni.edu")
            .unwrap();
        let other = JwtService::new("different_secret_key_32_bytes!!", 60);
        assert!(other.validate_session_token(&token).is_err());
    }

    #[test]
    fn test_wrong_token_type_rejected() {
        let now = Utc::now();
        let token = sign(&SessionClaims {
            sub: "profe@uni.edu".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(5)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            token_type: "refresh".to_string(),
        });

        assert!(create_test_service().validate_session_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // 过期时间早于默认 leeway
        let now = Utc::now();
        let token = sign(&SessionClaims {
            sub: "profe@uni.edu".to_string(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            token_type: SESSION_TOKEN_TYPE.to_string(),
        });

        let result = create_test_service().validate_session_token(&token);
        assert!(result.is_err(), "expired token accepted: {:?}", result);
    }

    #[test]
    fn test_from_config_generates_secret_when_empty() {
        let config = AuthConfig::default();
        let service = JwtService::from_config(&config);
        let token = service.generate_session_token("a@b.co").unwrap();
        assert!(service.validate_session_token(&token).is_ok());
        assert_eq!(service.session_minutes(), config.session_minutes);
    }
}
