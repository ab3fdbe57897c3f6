//! HS256 access tokens. Claims carry the user id and role; the user record
//! is still re-loaded on every request, so role or account-status changes
//! take effect without waiting for expiry.

use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::Role;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The user's id.
    pub sub: Uuid,
    /// Role name at issue time.
    pub role: String,
    /// Issued-at (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration (UTC Unix timestamp).
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

const DEFAULT_EXPIRY_HOURS: i64 = 7 * 24;

impl JwtConfig {
    /// Reads `JWT_SECRET` (required) and `JWT_EXPIRES_HOURS` (default: one
    /// week).
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let expiry_hours = std::env::var("JWT_EXPIRES_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_EXPIRY_HOURS);

        Self {
            secret,
            expiry_hours,
        }
    }
}

pub fn issue(
    user_id: Uuid,
    role: Role,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        role: role.as_str().to_string(),
        iat,
        exp: iat + config.expiry_hours * 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

#[derive(Debug, PartialEq, Eq)]
pub enum VerifyError {
    Expired,
    Invalid,
}

pub fn verify(token: &str, config: &JwtConfig) -> Result<Claims, VerifyError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => VerifyError::Expired,
        _ => VerifyError::Invalid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "secreto-de-prueba-suficientemente-largo".into(),
            expiry_hours: 1,
        }
    }

    #[test]
    fn emite_y_verifica() {
        let id = Uuid::new_v4();
        let token = issue(id, Role::Admin, &config()).unwrap();
        let claims = verify(&token, &config()).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.role, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rechaza_otro_secreto() {
        let token = issue(Uuid::new_v4(), Role::Jugador, &config()).unwrap();
        let otra = JwtConfig {
            secret: "otro-secreto".into(),
            expiry_hours: 1,
        };
        assert_eq!(verify(&token, &otra), Err(VerifyError::Invalid));
    }

    #[test]
    fn distingue_token_expirado() {
        use jsonwebtoken::{encode, EncodingKey, Header};

        let ahora = chrono::Utc::now().timestamp();
        // Expirado hace cinco minutos, más allá del margen por defecto.
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: "jugador".into(),
            iat: ahora - 600,
            exp: ahora - 300,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config().secret.as_bytes()),
        )
        .unwrap();
        assert_eq!(verify(&token, &config()), Err(VerifyError::Expired));
    }
}
