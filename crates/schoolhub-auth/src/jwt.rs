//! HS256 token codec.
//!
//! Tokens are self-contained: the guard decides tenant and role from the
//! claims alone, without touching the database.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use schoolhub_config::JwtConfig;
use schoolhub_core::AppError;

use crate::claims::{Claims, Role};

/// The account a token is being issued for.
#[derive(Debug, Clone)]
pub struct TokenSubject<'a> {
    pub id: Uuid,
    pub school_id: Uuid,
    pub role: Role,
    pub name: &'a str,
    pub image_url: Option<&'a str>,
}

pub fn issue_token(subject: &TokenSubject<'_>, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.expiry.max(0) as usize;

    let claims = Claims {
        sub: subject.id.to_string(),
        school_id: subject.school_id,
        role: subject.role,
        name: subject.name.to_string(),
        image_url: subject.image_url.map(str::to_string),
        iat: now,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid Token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            expiry: 3600,
            uniform_login_errors: false,
        }
    }

    fn teacher_subject(id: Uuid, school_id: Uuid) -> TokenSubject<'static> {
        TokenSubject {
            id,
            school_id,
            role: Role::Teacher,
            name: "Grace Hopper",
            image_url: Some("http://localhost:3000/files/teachers/a.png"),
        }
    }

    #[test]
    fn test_issue_then_verify_carries_claims() {
        let config = get_test_jwt_config();
        let id = Uuid::new_v4();
        let school_id = Uuid::new_v4();

        let token = issue_token(&teacher_subject(id, school_id), &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.school_id, school_id);
        assert_eq!(claims.role, Role::Teacher);
        assert_eq!(claims.name, "Grace Hopper");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_verify_token_invalid() {
        let config = get_test_jwt_config();
        let err = verify_token("invalid-token", &config).unwrap_err();
        assert_eq!(err.message(), "Invalid Token");
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let config = get_test_jwt_config();
        let token = issue_token(&teacher_subject(Uuid::new_v4(), Uuid::new_v4()), &config).unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            ..get_test_jwt_config()
        };

        assert!(verify_token(&token, &wrong_config).is_err());
    }

    #[test]
    fn test_verify_token_expired() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            school_id: Uuid::new_v4(),
            role: Role::School,
            name: "Old".to_string(),
            image_url: None,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(verify_token(&token, &config).is_err());
    }
}
