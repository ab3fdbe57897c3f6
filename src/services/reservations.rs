//! The reservation lifecycle: a reservation is confirmed the moment it is
//! created (`completada`) and can only ever move to `cancelada`, a
//! terminal state that also freezes every other field.
//!
//! Two reservations may occupy the same court and slot: there is no
//! overlap exclusion at the reservation level.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::models::court::Court;
use crate::models::reservation::{Reservation, ReservationStatus, ReservationView};
use crate::policy::{self, Subject};
use crate::store::{CourtStore, ReservationStore, UserStore};
use crate::utils::error::AppError;
use crate::validation::{
    compute_price, validate_new_reservation, validate_reservation_patch, validate_slot,
    ReservationPayload,
};

const NO_ENCONTRADA: &str = "Reserva no encontrada";

pub struct ReservationLifecycle {
    reservas: Arc<dyn ReservationStore>,
    canchas: Arc<dyn CourtStore>,
    usuarios: Arc<dyn UserStore>,
}

impl ReservationLifecycle {
    pub fn new(
        reservas: Arc<dyn ReservationStore>,
        canchas: Arc<dyn CourtStore>,
        usuarios: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            reservas,
            canchas,
            usuarios,
        }
    }

    pub async fn create(
        &self,
        subject: &Subject,
        payload: &ReservationPayload,
    ) -> Result<ReservationView, AppError> {
        // The court gate runs first: a missing id, an unavailable court and
        // a soft-deleted one are all the same answer.
        let cancha = match payload.cancha {
            Some(id) => self.canchas.find_by_id(id).await?,
            None => None,
        }
        .filter(Court::disponible)
        .ok_or_else(|| AppError::BadRequest("La cancha no está disponible".into()))?;

        let nueva = validate_new_reservation(payload).map_err(AppError::Validation)?;

        let ahora = Utc::now();
        let reserva = Reservation {
            id: Uuid::new_v4(),
            usuario: subject.id,
            cancha: cancha.id,
            fecha: nueva.fecha,
            hora_inicio: nueva.hora_inicio,
            duracion: nueva.duracion,
            participantes: nueva.participantes,
            metodo_pago: nueva.metodo_pago,
            estado: ReservationStatus::Completada,
            precio: compute_price(cancha.precio, nueva.duracion, nueva.precio),
            created_at: ahora,
            updated_at: ahora,
        };
        self.reservas.insert(&reserva).await?;

        tracing::info!(reserva = %reserva.id, cancha = %cancha.id, "Reserva creada");
        self.vista(&reserva).await
    }

    pub async fn list_for_user(
        &self,
        subject: &Subject,
    ) -> Result<Vec<ReservationView>, AppError> {
        let reservas = self.reservas.list_by_user(subject.id).await?;
        self.vistas(&reservas).await
    }

    /// Admin view over the reservations of every active court the caller
    /// owns. Two-phase: owned court ids first, then reservations by court.
    pub async fn list_for_owned_courts(
        &self,
        subject: &Subject,
    ) -> Result<Vec<ReservationView>, AppError> {
        policy::require_admin(subject, "Se requiere rol: admin")?;

        let canchas = self.canchas.active_ids_by_creator(subject.id).await?;
        let reservas = self.reservas.list_by_courts(&canchas).await?;
        self.vistas(&reservas).await
    }

    pub async fn update(
        &self,
        subject: &Subject,
        id: Uuid,
        payload: &ReservationPayload,
    ) -> Result<ReservationView, AppError> {
        let mut reserva = self
            .reservas
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NO_ENCONTRADA.into()))?;

        if !policy::can_act_on_reservation(subject, &reserva) {
            return Err(AppError::Forbidden(
                "No tienes permisos para actualizar esta reserva".into(),
            ));
        }
        if reserva.estado == ReservationStatus::Cancelada {
            return Err(AppError::BadRequest(
                "No se puede actualizar una reserva cancelada".into(),
            ));
        }

        // Moving the reservation to another court repeats the creation-time
        // availability gate against the new court.
        if let Some(nueva_cancha) = payload.cancha {
            if nueva_cancha != reserva.cancha {
                self.canchas
                    .find_by_id(nueva_cancha)
                    .await?
                    .filter(Court::disponible)
                    .ok_or_else(|| {
                        AppError::BadRequest("La nueva cancha no está disponible".into())
                    })?;
            }
        }

        let patch = validate_reservation_patch(payload).map_err(AppError::Validation)?;
        if let Some(cancha) = patch.cancha {
            reserva.cancha = cancha;
        }
        if let Some(fecha) = patch.fecha {
            reserva.fecha = fecha;
        }
        if let Some(hora_inicio) = patch.hora_inicio {
            reserva.hora_inicio = hora_inicio;
        }
        if let Some(duracion) = patch.duracion {
            reserva.duracion = duracion;
        }
        if let Some(participantes) = patch.participantes {
            reserva.participantes = participantes;
        }
        if let Some(metodo_pago) = patch.metodo_pago {
            reserva.metodo_pago = metodo_pago;
        }

        // The slot invariants run on the merged record; the price is not
        // re-derived on update.
        let violaciones = validate_slot(reserva.fecha, reserva.hora_inicio, reserva.duracion);
        if !violaciones.is_empty() {
            return Err(AppError::Validation(violaciones));
        }

        reserva.updated_at = Utc::now();
        self.reservas.save(&reserva).await?;
        self.vista(&reserva).await
    }

    /// One-way transition. Cancelling twice is an error, not a no-op.
    pub async fn cancel(&self, subject: &Subject, id: Uuid) -> Result<ReservationView, AppError> {
        let mut reserva = self
            .reservas
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NO_ENCONTRADA.into()))?;

        if !policy::can_act_on_reservation(subject, &reserva) {
            return Err(AppError::Forbidden(
                "No tienes permisos para cancelar esta reserva".into(),
            ));
        }
        if reserva.estado == ReservationStatus::Cancelada {
            return Err(AppError::BadRequest("La reserva ya está cancelada".into()));
        }

        reserva.estado = ReservationStatus::Cancelada;
        reserva.updated_at = Utc::now();
        self.reservas.save(&reserva).await?;

        tracing::info!(reserva = %reserva.id, "Reserva cancelada");
        self.vista(&reserva).await
    }

    /// Resolves the embedded court and user summaries. Both references are
    /// resolvable even after a soft delete, so a failure here is data
    /// corruption, not a caller mistake.
    async fn vista(&self, reserva: &Reservation) -> Result<ReservationView, AppError> {
        let cancha = self
            .canchas
            .find_by_id(reserva.cancha)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "La reserva {} referencia una cancha inexistente",
                    reserva.id
                ))
            })?;
        let usuario = self
            .usuarios
            .find_by_id(reserva.usuario)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "La reserva {} referencia un usuario inexistente",
                    reserva.id
                ))
            })?;
        Ok(reserva.to_view(cancha.summary(), usuario.summary()))
    }

    async fn vistas(
        &self,
        reservas: &[Reservation],
    ) -> Result<Vec<ReservationView>, AppError> {
        let mut resueltas = Vec::with_capacity(reservas.len());
        for reserva in reservas {
            resueltas.push(self.vista(reserva).await?);
        }
        Ok(resueltas)
    }
}
