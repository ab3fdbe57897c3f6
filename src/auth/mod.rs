//! The identity boundary: token issue/verify, password hashing, and the
//! request extractor that turns a `Bearer` token into an authenticated
//! [`Subject`]. The user record is re-read on every request and a
//! deactivated account is rejected here, before any role or ownership
//! gate runs.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::models::user::AccountStatus;
use crate::policy::Subject;
use crate::state::AppState;
use crate::utils::error::AppError;

pub mod jwt;
pub mod password;

/// Authenticated caller, extracted from the `Authorization` header.
///
/// Add it as a handler parameter to require authentication; handlers that
/// take it never see a request from a missing, expired, or deactivated
/// account.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Subject);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Token de acceso requerido".into()))?;

        // A bare token without the `Bearer` prefix is also accepted.
        let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
        if token.is_empty() {
            return Err(AppError::Unauthorized("Token de acceso requerido".into()));
        }

        let claims = jwt::verify(token, &state.jwt).map_err(|e| match e {
            jwt::VerifyError::Expired => AppError::Unauthorized(
                "Token expirado. Por favor, inicia sesión nuevamente".into(),
            ),
            jwt::VerifyError::Invalid => AppError::Unauthorized("Token inválido".into()),
        })?;

        let usuario = state
            .usuarios
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".into()))?;

        if usuario.estado == AccountStatus::Inactivo {
            return Err(AppError::Unauthorized(
                "Cuenta desactivada. Contacta al administrador".into(),
            ));
        }

        // The role comes from the store, not the claims: a role change
        // takes effect without re-issuing the token.
        Ok(AuthUser(Subject {
            id: usuario.id,
            role: usuario.role,
            estado: usuario.estado,
        }))
    }
}
