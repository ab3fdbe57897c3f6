//! The court registry: create, list, update and soft-delete the courts an
//! admin owns, plus the unauthenticated public listing.
//!
//! Ownership is folded into every lookup, so a court that exists but
//! belongs to someone else answers exactly like one that never existed.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::catalog::{Catalog, CatalogOptions};
use crate::models::court::{Court, CourtStatus, CourtView};
use crate::policy::{self, Subject};
use crate::store::CourtStore;
use crate::utils::error::AppError;
use crate::validation::{validate_court_patch, validate_new_court, CourtPayload};

const ADMIN_REQUERIDO: &str = "Se requiere rol: admin";
const NO_ENCONTRADA: &str = "Cancha no encontrada";
const NOMBRE_EN_USO: &str = "Ya existe una cancha con ese nombre";

pub struct CourtRegistry {
    canchas: Arc<dyn CourtStore>,
    catalogo: Arc<Catalog>,
}

impl CourtRegistry {
    pub fn new(canchas: Arc<dyn CourtStore>, catalogo: Arc<Catalog>) -> Self {
        Self { canchas, catalogo }
    }

    pub async fn create(
        &self,
        subject: &Subject,
        payload: &CourtPayload,
    ) -> Result<CourtView, AppError> {
        policy::require_admin(subject, ADMIN_REQUERIDO)?;

        let nueva = validate_new_court(&self.catalogo, payload).map_err(AppError::Validation)?;

        if self.canchas.active_name_in_use(&nueva.nombre, None).await? {
            return Err(AppError::Conflict(NOMBRE_EN_USO.into()));
        }

        let ahora = Utc::now();
        let cancha = Court {
            id: Uuid::new_v4(),
            nombre: nueva.nombre,
            tipo: nueva.tipo,
            precio: nueva.precio,
            estado: nueva.estado,
            descripcion: nueva.descripcion,
            ubicacion: nueva.ubicacion,
            capacidad: nueva.capacidad,
            creador: subject.id,
            horarios: nueva.horarios,
            activa: true,
            created_at: ahora,
            updated_at: ahora,
        };
        self.canchas.insert(&cancha).await?;

        tracing::info!(cancha = %cancha.id, creador = %subject.id, "Cancha creada");
        Ok(cancha.to_view())
    }

    pub async fn list_owned(&self, subject: &Subject) -> Result<Vec<CourtView>, AppError> {
        policy::require_admin(subject, ADMIN_REQUERIDO)?;

        let canchas = self.canchas.list_active_by_creator(subject.id).await?;
        Ok(canchas.iter().map(Court::to_view).collect())
    }

    pub async fn get_owned(&self, subject: &Subject, id: Uuid) -> Result<CourtView, AppError> {
        policy::require_admin(subject, ADMIN_REQUERIDO)?;

        let cancha = self
            .canchas
            .find_by_id(id)
            .await?
            .filter(|c| policy::owns_court(subject, c) && c.activa)
            .ok_or_else(|| AppError::NotFound(NO_ENCONTRADA.into()))?;
        Ok(cancha.to_view())
    }

    pub async fn update(
        &self,
        subject: &Subject,
        id: Uuid,
        payload: &CourtPayload,
    ) -> Result<CourtView, AppError> {
        policy::require_admin(subject, ADMIN_REQUERIDO)?;

        let patch = validate_court_patch(&self.catalogo, payload).map_err(AppError::Validation)?;
        if patch.is_empty() {
            return Err(AppError::BadRequest("No hay campos para actualizar".into()));
        }

        let mut cancha = self
            .canchas
            .find_by_id(id)
            .await?
            .filter(|c| policy::owns_court(subject, c) && c.activa)
            .ok_or_else(|| AppError::NotFound(NO_ENCONTRADA.into()))?;

        if let Some(nombre) = &patch.nombre {
            if *nombre != cancha.nombre
                && self.canchas.active_name_in_use(nombre, Some(cancha.id)).await?
            {
                return Err(AppError::Conflict(NOMBRE_EN_USO.into()));
            }
            cancha.nombre = nombre.clone();
        }
        if let Some(tipo) = patch.tipo {
            cancha.tipo = tipo;
        }
        if let Some(precio) = patch.precio {
            cancha.precio = precio;
        }
        if let Some(ubicacion) = patch.ubicacion {
            cancha.ubicacion = ubicacion;
        }
        if let Some(capacidad) = patch.capacidad {
            cancha.capacidad = capacidad;
        }
        if let Some(estado) = patch.estado {
            cancha.estado = estado;
        }
        if let Some(horarios) = patch.horarios {
            cancha.horarios = horarios;
        }
        if let Some(descripcion) = patch.descripcion {
            cancha.descripcion = descripcion;
        }
        cancha.updated_at = Utc::now();

        self.canchas.save(&cancha).await?;
        Ok(cancha.to_view())
    }

    /// Soft delete: the court drops out of every listing but stays
    /// resolvable by id, so reservation history keeps its reference.
    pub async fn soft_delete(&self, subject: &Subject, id: Uuid) -> Result<(), AppError> {
        policy::require_admin(subject, ADMIN_REQUERIDO)?;

        let mut cancha = self
            .canchas
            .find_by_id(id)
            .await?
            .filter(|c| policy::owns_court(subject, c))
            .ok_or_else(|| AppError::NotFound(NO_ENCONTRADA.into()))?;

        cancha.activa = false;
        cancha.estado = CourtStatus::NoDisponible;
        cancha.updated_at = Utc::now();
        self.canchas.save(&cancha).await?;

        tracing::info!(cancha = %cancha.id, "Cancha desactivada");
        Ok(())
    }

    pub async fn list_public(
        &self,
        busqueda: Option<&str>,
    ) -> Result<Vec<CourtView>, AppError> {
        let canchas = self.canchas.list_public(busqueda).await?;
        Ok(canchas.iter().map(Court::to_view).collect())
    }

    pub async fn get_public(&self, id: Uuid) -> Result<CourtView, AppError> {
        let cancha = self
            .canchas
            .find_by_id(id)
            .await?
            .filter(Court::disponible)
            .ok_or_else(|| AppError::NotFound(NO_ENCONTRADA.into()))?;
        Ok(cancha.to_view())
    }

    pub fn options(&self) -> CatalogOptions {
        self.catalogo.opciones()
    }
}
