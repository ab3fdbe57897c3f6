use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::formato_cop;
use super::time::TimeOfDay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SportType {
    #[serde(rename = "Fútbol")]
    Futbol,
    #[serde(rename = "Básquetbol")]
    Basquetbol,
    #[serde(rename = "Tenis")]
    Tenis,
    #[serde(rename = "Voleibol")]
    Voleibol,
}

impl SportType {
    pub const ALL: [SportType; 4] = [
        SportType::Futbol,
        SportType::Basquetbol,
        SportType::Tenis,
        SportType::Voleibol,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SportType::Futbol => "Fútbol",
            SportType::Basquetbol => "Básquetbol",
            SportType::Tenis => "Tenis",
            SportType::Voleibol => "Voleibol",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourtStatus {
    #[serde(rename = "disponible")]
    Disponible,
    #[serde(rename = "no disponible")]
    NoDisponible,
    #[serde(rename = "mantenimiento")]
    Mantenimiento,
}

impl CourtStatus {
    pub const ALL: [CourtStatus; 3] = [
        CourtStatus::Disponible,
        CourtStatus::NoDisponible,
        CourtStatus::Mantenimiento,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CourtStatus::Disponible => "disponible",
            CourtStatus::NoDisponible => "no disponible",
            CourtStatus::Mantenimiento => "mantenimiento",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Zone {
    Centro,
    Norte,
    Sur,
    Este,
    Oeste,
}

impl Zone {
    pub const ALL: [Zone; 5] = [Zone::Centro, Zone::Norte, Zone::Sur, Zone::Este, Zone::Oeste];

    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Centro => "Centro",
            Zone::Norte => "Norte",
            Zone::Sur => "Sur",
            Zone::Este => "Este",
            Zone::Oeste => "Oeste",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Lunes,
    Martes,
    #[serde(rename = "Miércoles")]
    Miercoles,
    Jueves,
    Viernes,
    #[serde(rename = "Sábado")]
    Sabado,
    Domingo,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Lunes,
        Weekday::Martes,
        Weekday::Miercoles,
        Weekday::Jueves,
        Weekday::Viernes,
        Weekday::Sabado,
        Weekday::Domingo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Lunes => "Lunes",
            Weekday::Martes => "Martes",
            Weekday::Miercoles => "Miércoles",
            Weekday::Jueves => "Jueves",
            Weekday::Viernes => "Viernes",
            Weekday::Sabado => "Sábado",
            Weekday::Domingo => "Domingo",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == s)
    }
}

/// One weekly opening slot of a court. Persisted as JSON with the wire
/// field names, so the stored form and the API form coincide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub dia: Weekday,
    pub desde: TimeOfDay,
    pub hasta: TimeOfDay,
}

#[derive(Debug, Clone)]
pub struct Court {
    pub id: Uuid,
    pub nombre: String,
    pub tipo: SportType,
    pub precio: Decimal,
    pub estado: CourtStatus,
    pub descripcion: String,
    pub ubicacion: Zone,
    pub capacidad: i32,
    pub creador: Uuid,
    pub horarios: Vec<AvailabilityWindow>,
    pub activa: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Court {
    /// A court can take new reservations only while available and not
    /// soft-deleted.
    pub fn disponible(&self) -> bool {
        self.activa && self.estado == CourtStatus::Disponible
    }

    pub fn to_view(&self) -> CourtView {
        CourtView {
            id: self.id,
            nombre: self.nombre.clone(),
            tipo: self.tipo,
            precio: self.precio,
            estado: self.estado,
            descripcion: self.descripcion.clone(),
            ubicacion: self.ubicacion,
            capacidad: self.capacidad,
            creador: self.creador,
            horarios: self.horarios.clone(),
            activa: self.activa,
            disponible: self.disponible(),
            precio_formateado: formato_cop(self.precio),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn summary(&self) -> CourtSummary {
        CourtSummary {
            id: self.id,
            nombre: self.nombre.clone(),
            tipo: self.tipo,
            precio: self.precio,
            ubicacion: self.ubicacion,
        }
    }
}

/// Court record as served to clients: raw fields plus the read-time
/// computed fields. Never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtView {
    pub id: Uuid,
    pub nombre: String,
    pub tipo: SportType,
    #[serde(with = "rust_decimal::serde::float")]
    pub precio: Decimal,
    pub estado: CourtStatus,
    pub descripcion: String,
    pub ubicacion: Zone,
    pub capacidad: i32,
    pub creador: Uuid,
    pub horarios: Vec<AvailabilityWindow>,
    pub activa: bool,
    pub disponible: bool,
    pub precio_formateado: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The short form embedded in reservation views.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtSummary {
    pub id: Uuid,
    pub nombre: String,
    pub tipo: SportType,
    #[serde(with = "rust_decimal::serde::float")]
    pub precio: Decimal,
    pub ubicacion: Zone,
}
