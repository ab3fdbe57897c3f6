use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::services::ReservationLifecycle;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};
use crate::validation::ReservationPayload;

fn lifecycle(state: &AppState) -> ReservationLifecycle {
    ReservationLifecycle::new(
        state.reservas.clone(),
        state.canchas.clone(),
        state.usuarios.clone(),
    )
}

pub async fn create_reservation(
    State(state): State<AppState>,
    AuthUser(subject): AuthUser,
    Json(payload): Json<ReservationPayload>,
) -> Result<Response, AppError> {
    let reserva = lifecycle(&state).create(&subject, &payload).await?;
    Ok(created("Reserva creada exitosamente", reserva))
}

pub async fn list_own_reservations(
    State(state): State<AppState>,
    AuthUser(subject): AuthUser,
) -> Result<Response, AppError> {
    let reservas = lifecycle(&state).list_for_user(&subject).await?;
    Ok(success("Reservas obtenidas", reservas))
}

pub async fn list_owned_court_reservations(
    State(state): State<AppState>,
    AuthUser(subject): AuthUser,
) -> Result<Response, AppError> {
    let reservas = lifecycle(&state).list_for_owned_courts(&subject).await?;
    Ok(success("Reservas obtenidas", reservas))
}

pub async fn update_reservation(
    State(state): State<AppState>,
    AuthUser(subject): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReservationPayload>,
) -> Result<Response, AppError> {
    let reserva = lifecycle(&state).update(&subject, id, &payload).await?;
    Ok(success("Reserva actualizada exitosamente", reserva))
}

pub async fn cancel_reservation(
    State(state): State<AppState>,
    AuthUser(subject): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let reserva = lifecycle(&state).cancel(&subject, id).await?;
    // The refund window is advisory; no payment integration sits behind it.
    Ok(success(
        "Reserva cancelada exitosamente. Se procesará tu reembolso en las próximas 24-48 horas.",
        reserva,
    ))
}
