use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::court::CourtSummary;
use super::formato_cop;
use super::time::{self, TimeOfDay};
use super::user::UserSummary;

/// The closed set of bookable durations, in hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingDuration {
    One,
    OneAndAHalf,
    Two,
    TwoAndAHalf,
    Three,
    Four,
}

impl BookingDuration {
    pub const ALL: [BookingDuration; 6] = [
        BookingDuration::One,
        BookingDuration::OneAndAHalf,
        BookingDuration::Two,
        BookingDuration::TwoAndAHalf,
        BookingDuration::Three,
        BookingDuration::Four,
    ];

    pub fn minutes(self) -> u32 {
        match self {
            BookingDuration::One => 60,
            BookingDuration::OneAndAHalf => 90,
            BookingDuration::Two => 120,
            BookingDuration::TwoAndAHalf => 150,
            BookingDuration::Three => 180,
            BookingDuration::Four => 240,
        }
    }

    pub fn from_minutes(minutos: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.minutes() == minutos)
    }

    /// Accepts the wire representation (hours as a number: 1, 1.5, … 4).
    pub fn from_hours(horas: f64) -> Option<Self> {
        let minutos = horas * 60.0;
        if minutos.fract() != 0.0 || !(0.0..=u32::MAX as f64).contains(&minutos) {
            return None;
        }
        Self::from_minutes(minutos as u32)
    }

    pub fn hours(self) -> f64 {
        self.minutes() as f64 / 60.0
    }

    pub fn as_decimal_hours(self) -> Decimal {
        Decimal::from(self.minutes()) / Decimal::from(60)
    }

    pub fn label(self) -> &'static str {
        match self {
            BookingDuration::One => "1 hora",
            BookingDuration::OneAndAHalf => "1.5 horas",
            BookingDuration::Two => "2 horas",
            BookingDuration::TwoAndAHalf => "2.5 horas",
            BookingDuration::Three => "3 horas",
            BookingDuration::Four => "4 horas",
        }
    }
}

/// Party-size buckets are enumerated strings on the wire, not raw counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartySize {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "11-20")]
    ElevenToTwenty,
    #[serde(rename = "21-30")]
    TwentyOneToThirty,
    #[serde(rename = "30+")]
    ThirtyPlus,
}

impl PartySize {
    pub const ALL: [PartySize; 13] = [
        PartySize::One,
        PartySize::Two,
        PartySize::Three,
        PartySize::Four,
        PartySize::Five,
        PartySize::Six,
        PartySize::Seven,
        PartySize::Eight,
        PartySize::Nine,
        PartySize::Ten,
        PartySize::ElevenToTwenty,
        PartySize::TwentyOneToThirty,
        PartySize::ThirtyPlus,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PartySize::One => "1",
            PartySize::Two => "2",
            PartySize::Three => "3",
            PartySize::Four => "4",
            PartySize::Five => "5",
            PartySize::Six => "6",
            PartySize::Seven => "7",
            PartySize::Eight => "8",
            PartySize::Nine => "9",
            PartySize::Ten => "10",
            PartySize::ElevenToTwenty => "11-20",
            PartySize::TwentyOneToThirty => "21-30",
            PartySize::ThirtyPlus => "30+",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "efectivo")]
    Efectivo,
    #[serde(rename = "nequi")]
    Nequi,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 2] = [PaymentMethod::Efectivo, PaymentMethod::Nequi];

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Efectivo => "efectivo",
            PaymentMethod::Nequi => "nequi",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Efectivo => "Efectivo",
            PaymentMethod::Nequi => "Nequi",
        }
    }
}

/// A reservation is confirmed the moment it is created; cancellation is the
/// only transition and it is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    #[serde(rename = "completada")]
    Completada,
    #[serde(rename = "cancelada")]
    Cancelada,
}

impl ReservationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Completada => "completada",
            ReservationStatus::Cancelada => "cancelada",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "completada" => Some(ReservationStatus::Completada),
            "cancelada" => Some(ReservationStatus::Cancelada),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReservationStatus::Completada => "Completada",
            ReservationStatus::Cancelada => "Cancelada",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: Uuid,
    pub usuario: Uuid,
    pub cancha: Uuid,
    pub fecha: NaiveDate,
    pub hora_inicio: TimeOfDay,
    pub duracion: BookingDuration,
    pub participantes: PartySize,
    pub metodo_pago: PaymentMethod,
    pub estado: ReservationStatus,
    pub precio: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// End of the slot in minutes past midnight. May equal 1440 (midnight)
    /// but never exceeds it for a persisted reservation.
    pub fn fin_minutos(&self) -> u32 {
        self.hora_inicio.minutes() as u32 + self.duracion.minutes()
    }

    pub fn to_view(&self, cancha: CourtSummary, usuario: UserSummary) -> ReservationView {
        ReservationView {
            id: self.id,
            usuario,
            cancha,
            fecha: self.fecha,
            hora_inicio: self.hora_inicio,
            duracion: self.duracion.hours(),
            participantes: self.participantes,
            metodo_pago: self.metodo_pago,
            estado: self.estado,
            precio: self.precio,
            precio_formateado: formato_cop(self.precio),
            duracion_formateada: self.duracion.label().to_string(),
            hora_fin: time::format_minutes(self.fin_minutos()),
            metodo_pago_formateado: self.metodo_pago.label().to_string(),
            estado_formateado: self.estado.label().to_string(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Reservation as served to clients: raw fields, the referenced court and
/// user summaries, and the read-time computed fields. Never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationView {
    pub id: Uuid,
    pub usuario: UserSummary,
    pub cancha: CourtSummary,
    pub fecha: NaiveDate,
    pub hora_inicio: TimeOfDay,
    pub duracion: f64,
    pub participantes: PartySize,
    pub metodo_pago: PaymentMethod,
    pub estado: ReservationStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub precio: Decimal,
    pub precio_formateado: String,
    pub duracion_formateada: String,
    pub hora_fin: String,
    pub metodo_pago_formateado: String,
    pub estado_formateado: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duracion_acepta_solo_el_conjunto_cerrado() {
        for horas in [1.0, 1.5, 2.0, 2.5, 3.0, 4.0] {
            assert!(BookingDuration::from_hours(horas).is_some(), "{horas}");
        }
        for horas in [0.5, 0.75, 3.5, 5.0, -1.0, 1.25] {
            assert!(BookingDuration::from_hours(horas).is_none(), "{horas}");
        }
    }

    #[test]
    fn etiquetas_de_duracion() {
        assert_eq!(BookingDuration::One.label(), "1 hora");
        assert_eq!(BookingDuration::OneAndAHalf.label(), "1.5 horas");
        assert_eq!(BookingDuration::Two.label(), "2 horas");
    }

    #[test]
    fn participantes_cubre_los_rangos() {
        assert_eq!(PartySize::parse("10"), Some(PartySize::Ten));
        assert_eq!(PartySize::parse("11-20"), Some(PartySize::ElevenToTwenty));
        assert_eq!(PartySize::parse("30+"), Some(PartySize::ThirtyPlus));
        assert_eq!(PartySize::parse("0"), None);
        assert_eq!(PartySize::parse("31"), None);
    }

    #[test]
    fn metodo_pago_formateado() {
        assert_eq!(PaymentMethod::Efectivo.label(), "Efectivo");
        assert_eq!(PaymentMethod::Nequi.label(), "Nequi");
    }
}
