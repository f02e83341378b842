use crate::error::{AppError, AppResult};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by access tokens. Tokens are issued by the external auth
/// service; this backend only validates them against the shared secret.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub email: String,
    pub exp: i64, // Expiration time
    pub iat: i64, // Issued at
}

pub struct JwtValidator {
    secret: String,
}

impl JwtValidator {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// Validate a JWT token and extract claims
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use uuid::Uuid;

    fn make_token(secret: &str, exp_offset_hours: i64) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "user@example.com".to_string(),
            exp: (now + Duration::hours(exp_offset_hours)).timestamp(),
            iat: now.timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_validate_accepts_token_signed_with_shared_secret() {
        let validator = JwtValidator::new("secret".to_string());
        let token = make_token("secret", 1);
        let claims = validator.validate_token(&token).unwrap();
        assert_eq!(claims.email, "user@example.com");
    }

    #[test]
    fn test_validate_rejects_wrong_secret() {
        let validator = JwtValidator::new("secret".to_string());
        let token = make_token("other-secret", 1);
        assert!(validator.validate_token(&token).is_err());
    }

    #[test]
    fn test_validate_rejects_expired_token() {
        let validator = JwtValidator::new("secret".to_string());
        let token = make_token("secret", -1);
        assert!(validator.validate_token(&token).is_err());
    }
}
