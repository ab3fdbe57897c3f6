//! Postgres adapter for the document-store traits. Queries are bound at
//! runtime; rows come back as plain text/numeric columns and are lifted
//! into domain types here, so a corrupt row surfaces as an internal error
//! instead of poisoning the domain layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::court::{AvailabilityWindow, Court, CourtStatus, SportType, Zone};
use crate::models::reservation::{
    BookingDuration, PartySize, PaymentMethod, Reservation, ReservationStatus,
};
use crate::models::time::TimeOfDay;
use crate::models::user::{AccountStatus, Role, User};
use crate::utils::error::AppError;

use super::{CourtStore, ReservationStore, UserStore};

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn corrupt(campo: &str, valor: &str) -> AppError {
    AppError::Internal(format!("Valor no reconocido en la columna {campo}: {valor}"))
}

const COURT_COLUMNS: &str = "id, nombre, tipo, precio, estado, descripcion, ubicacion, \
     capacidad, creador, horarios, activa, created_at, updated_at";

#[derive(FromRow)]
struct CourtRow {
    id: Uuid,
    nombre: String,
    tipo: String,
    precio: Decimal,
    estado: String,
    descripcion: String,
    ubicacion: String,
    capacidad: i32,
    creador: Uuid,
    horarios: Json<Vec<AvailabilityWindow>>,
    activa: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CourtRow> for Court {
    type Error = AppError;

    fn try_from(row: CourtRow) -> Result<Self, AppError> {
        Ok(Court {
            id: row.id,
            tipo: SportType::parse(&row.tipo).ok_or_else(|| corrupt("tipo", &row.tipo))?,
            estado: CourtStatus::parse(&row.estado)
                .ok_or_else(|| corrupt("estado", &row.estado))?,
            ubicacion: Zone::parse(&row.ubicacion)
                .ok_or_else(|| corrupt("ubicacion", &row.ubicacion))?,
            nombre: row.nombre,
            precio: row.precio,
            descripcion: row.descripcion,
            capacidad: row.capacidad,
            creador: row.creador,
            horarios: row.horarios.0,
            activa: row.activa,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl CourtStore for PgStore {
    async fn insert(&self, cancha: &Court) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO canchas (id, nombre, tipo, precio, estado, descripcion, ubicacion, \
             capacidad, creador, horarios, activa, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(cancha.id)
        .bind(&cancha.nombre)
        .bind(cancha.tipo.as_str())
        .bind(cancha.precio)
        .bind(cancha.estado.as_str())
        .bind(&cancha.descripcion)
        .bind(cancha.ubicacion.as_str())
        .bind(cancha.capacidad)
        .bind(cancha.creador)
        .bind(Json(&cancha.horarios))
        .bind(cancha.activa)
        .bind(cancha.created_at)
        .bind(cancha.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, cancha: &Court) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE canchas SET nombre = $2, tipo = $3, precio = $4, estado = $5, \
             descripcion = $6, ubicacion = $7, capacidad = $8, horarios = $9, activa = $10, \
             updated_at = $11 WHERE id = $1",
        )
        .bind(cancha.id)
        .bind(&cancha.nombre)
        .bind(cancha.tipo.as_str())
        .bind(cancha.precio)
        .bind(cancha.estado.as_str())
        .bind(&cancha.descripcion)
        .bind(cancha.ubicacion.as_str())
        .bind(cancha.capacidad)
        .bind(Json(&cancha.horarios))
        .bind(cancha.activa)
        .bind(cancha.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Court>, AppError> {
        let row = sqlx::query_as::<_, CourtRow>(&format!(
            "SELECT {COURT_COLUMNS} FROM canchas WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Court::try_from).transpose()
    }

    async fn list_active_by_creator(&self, creador: Uuid) -> Result<Vec<Court>, AppError> {
        let rows = sqlx::query_as::<_, CourtRow>(&format!(
            "SELECT {COURT_COLUMNS} FROM canchas WHERE creador = $1 AND activa \
             ORDER BY created_at DESC"
        ))
        .bind(creador)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Court::try_from).collect()
    }

    async fn active_ids_by_creator(&self, creador: Uuid) -> Result<Vec<Uuid>, AppError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM canchas WHERE creador = $1 AND activa",
        )
        .bind(creador)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn list_public(&self, busqueda: Option<&str>) -> Result<Vec<Court>, AppError> {
        let rows = sqlx::query_as::<_, CourtRow>(&format!(
            "SELECT {COURT_COLUMNS} FROM canchas \
             WHERE activa AND estado = 'disponible' \
             AND ($1::text IS NULL OR nombre ILIKE '%' || $1 || '%' OR tipo ILIKE '%' || $1 || '%') \
             ORDER BY created_at DESC"
        ))
        .bind(busqueda)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Court::try_from).collect()
    }

    async fn active_name_in_use(
        &self,
        nombre: &str,
        excluir: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let existe = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM canchas WHERE activa AND nombre = $1 \
             AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(nombre)
        .bind(excluir)
        .fetch_one(&self.pool)
        .await?;
        Ok(existe)
    }
}

const RESERVATION_COLUMNS: &str = "id, usuario, cancha, fecha, hora_inicio, duracion_minutos, \
     participantes, metodo_pago, estado, precio, created_at, updated_at";

#[derive(FromRow)]
struct ReservationRow {
    id: Uuid,
    usuario: Uuid,
    cancha: Uuid,
    fecha: chrono::NaiveDate,
    hora_inicio: String,
    duracion_minutos: i32,
    participantes: String,
    metodo_pago: String,
    estado: String,
    precio: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(row: ReservationRow) -> Result<Self, AppError> {
        Ok(Reservation {
            id: row.id,
            usuario: row.usuario,
            cancha: row.cancha,
            fecha: row.fecha,
            hora_inicio: row
                .hora_inicio
                .parse::<TimeOfDay>()
                .map_err(|_| corrupt("hora_inicio", &row.hora_inicio))?,
            duracion: BookingDuration::from_minutes(row.duracion_minutos.max(0) as u32)
                .ok_or_else(|| corrupt("duracion_minutos", &row.duracion_minutos.to_string()))?,
            participantes: PartySize::parse(&row.participantes)
                .ok_or_else(|| corrupt("participantes", &row.participantes))?,
            metodo_pago: PaymentMethod::parse(&row.metodo_pago)
                .ok_or_else(|| corrupt("metodo_pago", &row.metodo_pago))?,
            estado: ReservationStatus::parse(&row.estado)
                .ok_or_else(|| corrupt("estado", &row.estado))?,
            precio: row.precio,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ReservationStore for PgStore {
    async fn insert(&self, reserva: &Reservation) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO reservas (id, usuario, cancha, fecha, hora_inicio, duracion_minutos, \
             participantes, metodo_pago, estado, precio, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(reserva.id)
        .bind(reserva.usuario)
        .bind(reserva.cancha)
        .bind(reserva.fecha)
        .bind(reserva.hora_inicio.to_string())
        .bind(reserva.duracion.minutes() as i32)
        .bind(reserva.participantes.as_str())
        .bind(reserva.metodo_pago.as_str())
        .bind(reserva.estado.as_str())
        .bind(reserva.precio)
        .bind(reserva.created_at)
        .bind(reserva.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, reserva: &Reservation) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE reservas SET cancha = $2, fecha = $3, hora_inicio = $4, \
             duracion_minutos = $5, participantes = $6, metodo_pago = $7, estado = $8, \
             precio = $9, updated_at = $10 WHERE id = $1",
        )
        .bind(reserva.id)
        .bind(reserva.cancha)
        .bind(reserva.fecha)
        .bind(reserva.hora_inicio.to_string())
        .bind(reserva.duracion.minutes() as i32)
        .bind(reserva.participantes.as_str())
        .bind(reserva.metodo_pago.as_str())
        .bind(reserva.estado.as_str())
        .bind(reserva.precio)
        .bind(reserva.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Reservation>, AppError> {
        let row = sqlx::query_as::<_, ReservationRow>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservas WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Reservation::try_from).transpose()
    }

    async fn list_by_user(&self, usuario: Uuid) -> Result<Vec<Reservation>, AppError> {
        // hora_inicio is stored zero-padded, so the lexicographic order is
        // the chronological one.
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservas WHERE usuario = $1 \
             ORDER BY fecha DESC, hora_inicio DESC"
        ))
        .bind(usuario)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn list_by_courts(&self, canchas: &[Uuid]) -> Result<Vec<Reservation>, AppError> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservas WHERE cancha = ANY($1) \
             ORDER BY fecha DESC, hora_inicio DESC"
        ))
        .bind(canchas.to_vec())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Reservation::try_from).collect()
    }
}

const USER_COLUMNS: &str = "id, nombre, email, password_hash, role, username, avatar_url, \
     estado, created_at, updated_at";

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    nombre: String,
    email: String,
    password_hash: String,
    role: String,
    username: Option<String>,
    avatar_url: String,
    estado: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, AppError> {
        Ok(User {
            id: row.id,
            role: Role::parse(&row.role).ok_or_else(|| corrupt("role", &row.role))?,
            estado: AccountStatus::parse(&row.estado)
                .ok_or_else(|| corrupt("estado", &row.estado))?,
            nombre: row.nombre,
            email: row.email,
            password_hash: row.password_hash,
            username: row.username,
            avatar_url: row.avatar_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert(&self, usuario: &User) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO usuarios (id, nombre, email, password_hash, role, username, \
             avatar_url, estado, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(usuario.id)
        .bind(&usuario.nombre)
        .bind(&usuario.email)
        .bind(&usuario.password_hash)
        .bind(usuario.role.as_str())
        .bind(&usuario.username)
        .bind(&usuario.avatar_url)
        .bind(usuario.estado.as_str())
        .bind(usuario.created_at)
        .bind(usuario.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, usuario: &User) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE usuarios SET nombre = $2, email = $3, password_hash = $4, role = $5, \
             username = $6, avatar_url = $7, estado = $8, updated_at = $9 WHERE id = $1",
        )
        .bind(usuario.id)
        .bind(&usuario.nombre)
        .bind(&usuario.email)
        .bind(&usuario.password_hash)
        .bind(usuario.role.as_str())
        .bind(&usuario.username)
        .bind(&usuario.avatar_url)
        .bind(usuario.estado.as_str())
        .bind(usuario.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM usuarios WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(User::try_from).transpose()
    }

    async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM usuarios WHERE email = $1 AND estado = 'activo'"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(User::try_from).transpose()
    }

    async fn email_in_use(&self, email: &str) -> Result<bool, AppError> {
        let existe = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM usuarios WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(existe)
    }

    async fn username_in_use(
        &self,
        username: &str,
        excluir: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let existe = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM usuarios WHERE username = $1 \
             AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(username)
        .bind(excluir)
        .fetch_one(&self.pool)
        .await?;
        Ok(existe)
    }
}
