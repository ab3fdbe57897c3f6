//! The document-store boundary. Services talk to these traits; the
//! Postgres adapter backs the binary and the in-memory adapter backs the
//! test suite. Stores do CRUD and indexed lookups only; visibility rules,
//! state transitions and validation all live above them.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::court::Court;
use crate::models::reservation::Reservation;
use crate::models::user::User;
use crate::utils::error::AppError;

pub mod memory;
pub mod postgres;

#[async_trait]
pub trait CourtStore: Send + Sync {
    async fn insert(&self, cancha: &Court) -> Result<(), AppError>;

    /// Full-document write of an existing court.
    async fn save(&self, cancha: &Court) -> Result<(), AppError>;

    /// Lookup by id regardless of `activa`: soft-deleted courts stay
    /// resolvable for reservation history.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Court>, AppError>;

    /// Active courts of one admin, newest first.
    async fn list_active_by_creator(&self, creador: Uuid) -> Result<Vec<Court>, AppError>;

    /// Ids only, for the two-phase owned-reservations query.
    async fn active_ids_by_creator(&self, creador: Uuid) -> Result<Vec<Uuid>, AppError>;

    /// Active and available courts, optionally filtered by a
    /// case-insensitive substring of name or type, newest first.
    async fn list_public(&self, busqueda: Option<&str>) -> Result<Vec<Court>, AppError>;

    /// Name collision check over active courts only; `excluir` skips the
    /// court being renamed.
    async fn active_name_in_use(
        &self,
        nombre: &str,
        excluir: Option<Uuid>,
    ) -> Result<bool, AppError>;
}

#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn insert(&self, reserva: &Reservation) -> Result<(), AppError>;

    async fn save(&self, reserva: &Reservation) -> Result<(), AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Reservation>, AppError>;

    /// All reservations of one user, date then start time, newest first.
    async fn list_by_user(&self, usuario: Uuid) -> Result<Vec<Reservation>, AppError>;

    /// All reservations over a set of courts, same ordering.
    async fn list_by_courts(&self, canchas: &[Uuid]) -> Result<Vec<Reservation>, AppError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, usuario: &User) -> Result<(), AppError>;

    async fn save(&self, usuario: &User) -> Result<(), AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Login lookup: active accounts only.
    async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn email_in_use(&self, email: &str) -> Result<bool, AppError>;

    async fn username_in_use(
        &self,
        username: &str,
        excluir: Option<Uuid>,
    ) -> Result<bool, AppError>;
}
