use axum::extract::State;
use axum::response::Response;
use axum::Json;

use crate::auth::AuthUser;
use crate::services::users::{LoginPayload, RegisterPayload};
use crate::services::UserDirectory;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};

fn directory(state: &AppState) -> UserDirectory {
    UserDirectory::new(state.usuarios.clone(), state.jwt.clone())
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<Response, AppError> {
    let usuario = directory(&state).register(&payload).await?;
    Ok(created("Usuario registrado exitosamente", usuario))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Response, AppError> {
    let usuario = directory(&state).login(&payload).await?;
    Ok(success("Inicio de sesión exitoso", usuario))
}

pub async fn verify_token(
    State(state): State<AppState>,
    AuthUser(subject): AuthUser,
) -> Result<Response, AppError> {
    let usuario = directory(&state).profile(&subject).await?;
    Ok(success("Token válido", usuario))
}

pub async fn me(
    State(state): State<AppState>,
    AuthUser(subject): AuthUser,
) -> Result<Response, AppError> {
    let usuario = directory(&state).profile(&subject).await?;
    Ok(success(
        "Información del usuario obtenida exitosamente",
        usuario,
    ))
}

/// Tokens are stateless, so logout is advisory: it exists so clients have
/// a uniform endpoint to call while discarding their copy.
pub async fn logout(AuthUser(subject): AuthUser) -> Result<Response, AppError> {
    tracing::info!(usuario = %subject.id, "Logout realizado");
    Ok(empty_success("Sesión cerrada exitosamente"))
}
