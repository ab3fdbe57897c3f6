use axum::extract::State;
use axum::response::Response;
use axum::Json;

use crate::auth::AuthUser;
use crate::services::users::{PasswordPayload, ProfilePayload};
use crate::services::UserDirectory;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{empty_success, success};

fn directory(state: &AppState) -> UserDirectory {
    UserDirectory::new(state.usuarios.clone(), state.jwt.clone())
}

pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(subject): AuthUser,
) -> Result<Response, AppError> {
    let usuario = directory(&state).profile(&subject).await?;
    Ok(success("Perfil obtenido correctamente", usuario))
}

pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(subject): AuthUser,
    Json(payload): Json<ProfilePayload>,
) -> Result<Response, AppError> {
    let usuario = directory(&state).update_profile(&subject, &payload).await?;
    Ok(success("Perfil actualizado correctamente", usuario))
}

pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(subject): AuthUser,
    Json(payload): Json<PasswordPayload>,
) -> Result<Response, AppError> {
    directory(&state).change_password(&subject, &payload).await?;
    Ok(empty_success("Contraseña cambiada correctamente"))
}

pub async fn deactivate_account(
    State(state): State<AppState>,
    AuthUser(subject): AuthUser,
) -> Result<Response, AppError> {
    directory(&state).deactivate(&subject).await?;
    Ok(empty_success(
        "Cuenta desactivada correctamente. Si deseas recuperarla, contacta al desarrollador.",
    ))
}
