use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::services::CourtRegistry;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};
use crate::validation::CourtPayload;

fn registry(state: &AppState) -> CourtRegistry {
    CourtRegistry::new(state.canchas.clone(), state.catalogo.clone())
}

pub async fn create_court(
    State(state): State<AppState>,
    AuthUser(subject): AuthUser,
    Json(payload): Json<CourtPayload>,
) -> Result<Response, AppError> {
    let cancha = registry(&state).create(&subject, &payload).await?;
    Ok(created("Cancha creada correctamente", cancha))
}

pub async fn list_owned_courts(
    State(state): State<AppState>,
    AuthUser(subject): AuthUser,
) -> Result<Response, AppError> {
    let canchas = registry(&state).list_owned(&subject).await?;
    Ok(success(
        format!("{} cancha(s) encontrada(s)", canchas.len()),
        canchas,
    ))
}

pub async fn get_owned_court(
    State(state): State<AppState>,
    AuthUser(subject): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let cancha = registry(&state).get_owned(&subject, id).await?;
    Ok(success("Cancha obtenida correctamente", cancha))
}

pub async fn update_court(
    State(state): State<AppState>,
    AuthUser(subject): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CourtPayload>,
) -> Result<Response, AppError> {
    let cancha = registry(&state).update(&subject, id, &payload).await?;
    Ok(success("Cancha actualizada correctamente", cancha))
}

pub async fn delete_court(
    State(state): State<AppState>,
    AuthUser(subject): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    registry(&state).soft_delete(&subject, id).await?;
    Ok(empty_success("Cancha eliminada correctamente"))
}

#[derive(Deserialize)]
pub struct PublicSearch {
    busqueda: Option<String>,
}

pub async fn list_public_courts(
    State(state): State<AppState>,
    Query(filtro): Query<PublicSearch>,
) -> Result<Response, AppError> {
    let canchas = registry(&state)
        .list_public(filtro.busqueda.as_deref().filter(|b| !b.is_empty()))
        .await?;
    Ok(success(
        format!("{} cancha(s) encontrada(s)", canchas.len()),
        canchas,
    ))
}

pub async fn get_public_court(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let cancha = registry(&state).get_public(id).await?;
    Ok(success("Cancha obtenida correctamente", cancha))
}

pub async fn get_options(State(state): State<AppState>) -> Result<Response, AppError> {
    Ok(success("Opciones obtenidas", registry(&state).options()))
}
