//! The booking validator: pure functions that check payloads and time
//! arithmetic before anything touches the store.
//!
//! Violations are collected, not thrown one at a time, so a caller can
//! surface every broken constraint in a single response. Two rule sets
//! coexist on purpose and must not be unified: availability windows obey
//! the facility operating hours (06:00–23:00, 30–240 minutes), while
//! reservations only refuse to cross midnight.

use chrono::{Local, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::models::court::{AvailabilityWindow, CourtStatus, SportType, Weekday, Zone};
use crate::models::reservation::{BookingDuration, PartySize, PaymentMethod};
use crate::models::time::TimeOfDay;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub campo: &'static str,
    pub mensaje: String,
}

impl FieldViolation {
    pub fn new(campo: &'static str, mensaje: impl Into<String>) -> Self {
        Self {
            campo,
            mensaje: mensaje.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Payloads (create and patch share a shape; create enforces presence)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtPayload {
    pub nombre: Option<String>,
    pub tipo: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub precio: Option<Decimal>,
    pub ubicacion: Option<String>,
    pub capacidad: Option<i32>,
    pub estado: Option<String>,
    pub horarios: Option<Vec<WindowPayload>>,
    pub descripcion: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowPayload {
    pub dia: String,
    pub desde: String,
    pub hasta: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPayload {
    pub cancha: Option<Uuid>,
    pub fecha: Option<NaiveDate>,
    pub hora_inicio: Option<String>,
    pub duracion: Option<f64>,
    pub participantes: Option<String>,
    pub metodo_pago: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub precio: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Typed results
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct NewCourt {
    pub nombre: String,
    pub tipo: SportType,
    pub precio: Decimal,
    pub estado: CourtStatus,
    pub descripcion: String,
    pub ubicacion: Zone,
    pub capacidad: i32,
    pub horarios: Vec<AvailabilityWindow>,
}

#[derive(Debug, Default)]
pub struct CourtPatch {
    pub nombre: Option<String>,
    pub tipo: Option<SportType>,
    pub precio: Option<Decimal>,
    pub ubicacion: Option<Zone>,
    pub capacidad: Option<i32>,
    pub estado: Option<CourtStatus>,
    pub horarios: Option<Vec<AvailabilityWindow>>,
    pub descripcion: Option<String>,
}

impl CourtPatch {
    pub fn is_empty(&self) -> bool {
        self.nombre.is_none()
            && self.tipo.is_none()
            && self.precio.is_none()
            && self.ubicacion.is_none()
            && self.capacidad.is_none()
            && self.estado.is_none()
            && self.horarios.is_none()
            && self.descripcion.is_none()
    }
}

#[derive(Debug)]
pub struct NewReservation {
    pub fecha: NaiveDate,
    pub hora_inicio: TimeOfDay,
    pub duracion: BookingDuration,
    pub participantes: PartySize,
    pub metodo_pago: PaymentMethod,
    pub precio: Option<Decimal>,
}

#[derive(Debug, Default)]
pub struct ReservationPatch {
    pub cancha: Option<Uuid>,
    pub fecha: Option<NaiveDate>,
    pub hora_inicio: Option<TimeOfDay>,
    pub duracion: Option<BookingDuration>,
    pub participantes: Option<PartySize>,
    pub metodo_pago: Option<PaymentMethod>,
}

// ---------------------------------------------------------------------------
// Time arithmetic and price derivation
// ---------------------------------------------------------------------------

/// Facility operating-hours rule set. Governs availability-window edits
/// only; reservations are deliberately exempt (see module docs).
pub fn validate_operating_window(
    catalogo: &Catalog,
    desde: TimeOfDay,
    hasta: TimeOfDay,
) -> Vec<FieldViolation> {
    let mut violaciones = Vec::new();
    if desde.minutes() < catalogo.apertura.minutes() || hasta.minutes() > catalogo.cierre.minutes()
    {
        violaciones.push(FieldViolation::new(
            "horarios",
            format!(
                "Horario de funcionamiento: {} - {}",
                catalogo.apertura, catalogo.cierre
            ),
        ));
    }
    if hasta.minutes() <= desde.minutes() {
        violaciones.push(FieldViolation::new(
            "horarios",
            "La hora de fin debe ser mayor que la hora de inicio",
        ));
        return violaciones;
    }
    let duracion = hasta.minutes() - desde.minutes();
    if duracion < catalogo.ventana_minima {
        violaciones.push(FieldViolation::new(
            "horarios",
            format!(
                "La franja debe tener una duración mínima de {} minutos",
                catalogo.ventana_minima
            ),
        ));
    }
    if duracion > catalogo.ventana_maxima {
        violaciones.push(FieldViolation::new(
            "horarios",
            "La franja no puede exceder 4 horas de duración",
        ));
    }
    violaciones
}

/// Date-only comparison: today is bookable, yesterday is not.
pub fn validate_future_date(fecha: NaiveDate) -> Option<FieldViolation> {
    let hoy = Local::now().date_naive();
    (fecha < hoy).then(|| {
        FieldViolation::new("fecha", "No se pueden hacer reservas para fechas pasadas")
    })
}

/// A reservation may end exactly at midnight (1440) but never after it.
pub fn exceeds_day(inicio: TimeOfDay, duracion: BookingDuration) -> bool {
    inicio.minutes() as u32 + duracion.minutes() > 24 * 60
}

/// Derived price: the explicit amount wins, otherwise hourly price times
/// duration, rounded to the peso.
pub fn compute_price(
    precio_por_hora: Decimal,
    duracion: BookingDuration,
    explicito: Option<Decimal>,
) -> Decimal {
    explicito
        .unwrap_or_else(|| precio_por_hora * duracion.as_decimal_hours())
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// End of slot as `"HH:MM"`; renders `"24:00"` for a slot ending exactly
/// at midnight.
pub fn end_time(inicio: TimeOfDay, duracion: BookingDuration) -> String {
    crate::models::time::format_minutes(inicio.minutes() as u32 + duracion.minutes())
}

/// The invariants that must hold on a reservation about to be persisted,
/// whether freshly created or merged from a patch.
pub fn validate_slot(
    fecha: NaiveDate,
    inicio: TimeOfDay,
    duracion: BookingDuration,
) -> Vec<FieldViolation> {
    let mut violaciones = Vec::new();
    if let Some(v) = validate_future_date(fecha) {
        violaciones.push(v);
    }
    if exceeds_day(inicio, duracion) {
        violaciones.push(FieldViolation::new(
            "horaInicio",
            "La reserva excede el horario diario",
        ));
    }
    violaciones
}

// ---------------------------------------------------------------------------
// Court payload validation
// ---------------------------------------------------------------------------

pub fn validate_new_court(
    catalogo: &Catalog,
    payload: &CourtPayload,
) -> Result<NewCourt, Vec<FieldViolation>> {
    let mut violaciones = Vec::new();

    let nombre = match payload.nombre.as_deref().map(str::trim) {
        Some(n) if !n.is_empty() => {
            if n.chars().count() > catalogo.nombre_max {
                violaciones.push(FieldViolation::new(
                    "nombre",
                    format!("El nombre no puede exceder {} caracteres", catalogo.nombre_max),
                ));
            }
            Some(n.to_string())
        }
        _ => {
            violaciones.push(FieldViolation::new("nombre", "El nombre es obligatorio"));
            None
        }
    };

    let tipo = match payload.tipo.as_deref() {
        Some(t) => {
            let parsed = SportType::parse(t);
            if parsed.is_none() {
                violaciones.push(FieldViolation::new("tipo", "Tipo de cancha no válido"));
            }
            parsed
        }
        None => {
            violaciones.push(FieldViolation::new("tipo", "El tipo de cancha es obligatorio"));
            None
        }
    };

    let precio = match payload.precio {
        Some(p) => {
            if p < catalogo.precio_minimo {
                violaciones.push(FieldViolation::new(
                    "precio",
                    format!("El precio mínimo es {}", catalogo.precio_minimo),
                ));
            }
            Some(p)
        }
        None => {
            violaciones.push(FieldViolation::new("precio", "El precio es obligatorio"));
            None
        }
    };

    let ubicacion = match payload.ubicacion.as_deref() {
        Some(u) => {
            let parsed = Zone::parse(u);
            if parsed.is_none() {
                violaciones.push(FieldViolation::new("ubicacion", "Ubicación no válida"));
            }
            parsed
        }
        None => {
            violaciones.push(FieldViolation::new("ubicacion", "La ubicación es obligatoria"));
            None
        }
    };

    let capacidad = match payload.capacidad {
        Some(c) => {
            if c < catalogo.capacidad_minima {
                violaciones.push(FieldViolation::new(
                    "capacidad",
                    format!("La capacidad mínima es {} personas", catalogo.capacidad_minima),
                ));
            } else if c > catalogo.capacidad_maxima {
                violaciones.push(FieldViolation::new(
                    "capacidad",
                    format!("La capacidad máxima es {} personas", catalogo.capacidad_maxima),
                ));
            }
            Some(c)
        }
        None => {
            violaciones.push(FieldViolation::new("capacidad", "La capacidad es obligatoria"));
            None
        }
    };

    let estado = match payload.estado.as_deref() {
        Some(e) => match CourtStatus::parse(e) {
            Some(parsed) => parsed,
            None => {
                violaciones.push(FieldViolation::new("estado", "Estado no válido"));
                CourtStatus::Disponible
            }
        },
        None => CourtStatus::Disponible,
    };

    let descripcion = payload
        .descripcion
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    if descripcion.chars().count() > catalogo.descripcion_max {
        violaciones.push(FieldViolation::new(
            "descripcion",
            format!(
                "La descripción no puede exceder {} caracteres",
                catalogo.descripcion_max
            ),
        ));
    }

    let horarios = match payload.horarios.as_deref() {
        Some(ventanas) => match validate_windows(catalogo, ventanas) {
            Ok(parsed) => parsed,
            Err(mut errores) => {
                violaciones.append(&mut errores);
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    if !violaciones.is_empty() {
        return Err(violaciones);
    }

    // Every absent field pushed a violation above, so each Option is Some.
    Ok(NewCourt {
        nombre: nombre.unwrap(),
        tipo: tipo.unwrap(),
        precio: precio.unwrap(),
        estado,
        descripcion,
        ubicacion: ubicacion.unwrap(),
        capacidad: capacidad.unwrap(),
        horarios,
    })
}

pub fn validate_court_patch(
    catalogo: &Catalog,
    payload: &CourtPayload,
) -> Result<CourtPatch, Vec<FieldViolation>> {
    let mut violaciones = Vec::new();
    let mut patch = CourtPatch::default();

    if let Some(nombre) = payload.nombre.as_deref().map(str::trim) {
        if nombre.is_empty() {
            violaciones.push(FieldViolation::new("nombre", "El nombre es obligatorio"));
        } else if nombre.chars().count() > catalogo.nombre_max {
            violaciones.push(FieldViolation::new(
                "nombre",
                format!("El nombre no puede exceder {} caracteres", catalogo.nombre_max),
            ));
        } else {
            patch.nombre = Some(nombre.to_string());
        }
    }

    if let Some(tipo) = payload.tipo.as_deref() {
        match SportType::parse(tipo) {
            Some(parsed) => patch.tipo = Some(parsed),
            None => violaciones.push(FieldViolation::new("tipo", "Tipo de cancha no válido")),
        }
    }

    if let Some(precio) = payload.precio {
        if precio < catalogo.precio_minimo {
            violaciones.push(FieldViolation::new(
                "precio",
                format!("El precio mínimo es {}", catalogo.precio_minimo),
            ));
        } else {
            patch.precio = Some(precio);
        }
    }

    if let Some(ubicacion) = payload.ubicacion.as_deref() {
        match Zone::parse(ubicacion) {
            Some(parsed) => patch.ubicacion = Some(parsed),
            None => violaciones.push(FieldViolation::new("ubicacion", "Ubicación no válida")),
        }
    }

    if let Some(capacidad) = payload.capacidad {
        if capacidad < catalogo.capacidad_minima {
            violaciones.push(FieldViolation::new(
                "capacidad",
                format!("La capacidad mínima es {} personas", catalogo.capacidad_minima),
            ));
        } else if capacidad > catalogo.capacidad_maxima {
            violaciones.push(FieldViolation::new(
                "capacidad",
                format!("La capacidad máxima es {} personas", catalogo.capacidad_maxima),
            ));
        } else {
            patch.capacidad = Some(capacidad);
        }
    }

    if let Some(estado) = payload.estado.as_deref() {
        match CourtStatus::parse(estado) {
            Some(parsed) => patch.estado = Some(parsed),
            None => violaciones.push(FieldViolation::new("estado", "Estado no válido")),
        }
    }

    if let Some(ventanas) = payload.horarios.as_deref() {
        match validate_windows(catalogo, ventanas) {
            Ok(parsed) => patch.horarios = Some(parsed),
            Err(mut errores) => violaciones.append(&mut errores),
        }
    }

    if let Some(descripcion) = payload.descripcion.as_deref().map(str::trim) {
        if descripcion.chars().count() > catalogo.descripcion_max {
            violaciones.push(FieldViolation::new(
                "descripcion",
                format!(
                    "La descripción no puede exceder {} caracteres",
                    catalogo.descripcion_max
                ),
            ));
        } else {
            patch.descripcion = Some(descripcion.to_string());
        }
    }

    if violaciones.is_empty() {
        Ok(patch)
    } else {
        Err(violaciones)
    }
}

/// Parses and checks a full availability-window set: valid weekday and
/// times per entry, desde < hasta, the operating-hours rule set, and no
/// repeated weekday across the set.
pub fn validate_windows(
    catalogo: &Catalog,
    ventanas: &[WindowPayload],
) -> Result<Vec<AvailabilityWindow>, Vec<FieldViolation>> {
    let mut violaciones = Vec::new();
    let mut parsed = Vec::with_capacity(ventanas.len());

    for ventana in ventanas {
        let dia = Weekday::parse(&ventana.dia);
        if dia.is_none() {
            violaciones.push(FieldViolation::new("horarios", "Día no válido"));
        }
        let desde: Option<TimeOfDay> = ventana.desde.parse().ok();
        let hasta: Option<TimeOfDay> = ventana.hasta.parse().ok();
        if desde.is_none() || hasta.is_none() {
            violaciones.push(FieldViolation::new(
                "horarios",
                "Formato de hora inválido (HH:MM)",
            ));
        }
        let (Some(dia), Some(desde), Some(hasta)) = (dia, desde, hasta) else {
            continue;
        };
        if desde >= hasta {
            violaciones.push(FieldViolation::new(
                "horarios",
                "La hora de inicio debe ser menor que la hora de fin",
            ));
            continue;
        }
        violaciones.extend(validate_operating_window(catalogo, desde, hasta));
        parsed.push(AvailabilityWindow { dia, desde, hasta });
    }

    let mut dias: Vec<Weekday> = parsed.iter().map(|w| w.dia).collect();
    dias.sort_by_key(|d| d.as_str());
    dias.dedup();
    if dias.len() != parsed.len() {
        violaciones.push(FieldViolation::new(
            "horarios",
            "No puede haber días duplicados en los horarios",
        ));
    }

    if violaciones.is_empty() {
        Ok(parsed)
    } else {
        Err(violaciones)
    }
}

// ---------------------------------------------------------------------------
// Reservation payload validation
// ---------------------------------------------------------------------------

pub fn validate_new_reservation(
    payload: &ReservationPayload,
) -> Result<NewReservation, Vec<FieldViolation>> {
    let mut violaciones = Vec::new();

    let fecha = match payload.fecha {
        Some(f) => Some(f),
        None => {
            violaciones.push(FieldViolation::new("fecha", "La fecha es obligatoria"));
            None
        }
    };

    let hora_inicio = match payload.hora_inicio.as_deref() {
        Some(h) => match h.parse::<TimeOfDay>() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                violaciones.push(FieldViolation::new("horaInicio", e.to_string()));
                None
            }
        },
        None => {
            violaciones.push(FieldViolation::new(
                "horaInicio",
                "La hora de inicio es obligatoria",
            ));
            None
        }
    };

    let duracion = match payload.duracion {
        Some(d) => {
            let parsed = BookingDuration::from_hours(d);
            if parsed.is_none() {
                violaciones.push(FieldViolation::new("duracion", "Duración no válida"));
            }
            parsed
        }
        None => {
            violaciones.push(FieldViolation::new("duracion", "La duración es obligatoria"));
            None
        }
    };

    let participantes = match payload.participantes.as_deref() {
        Some(p) => {
            let parsed = PartySize::parse(p);
            if parsed.is_none() {
                violaciones.push(FieldViolation::new(
                    "participantes",
                    "Número de participantes no válido",
                ));
            }
            parsed
        }
        None => {
            violaciones.push(FieldViolation::new(
                "participantes",
                "Los participantes son obligatorios",
            ));
            None
        }
    };

    let metodo_pago = match payload.metodo_pago.as_deref() {
        Some(m) => {
            let parsed = PaymentMethod::parse(m);
            if parsed.is_none() {
                violaciones.push(FieldViolation::new("metodoPago", "Método de pago no válido"));
            }
            parsed
        }
        None => {
            violaciones.push(FieldViolation::new(
                "metodoPago",
                "El método de pago es obligatorio",
            ));
            None
        }
    };

    if let Some(precio) = payload.precio {
        if precio < Decimal::ZERO {
            violaciones.push(FieldViolation::new("precio", "El precio no puede ser negativo"));
        }
    }

    if let (Some(fecha), Some(inicio), Some(duracion)) = (fecha, hora_inicio, duracion) {
        violaciones.extend(validate_slot(fecha, inicio, duracion));
    }

    if !violaciones.is_empty() {
        return Err(violaciones);
    }

    Ok(NewReservation {
        fecha: fecha.unwrap(),
        hora_inicio: hora_inicio.unwrap(),
        duracion: duracion.unwrap(),
        participantes: participantes.unwrap(),
        metodo_pago: metodo_pago.unwrap(),
        precio: payload.precio,
    })
}

/// Field-level checks for an update; the slot invariants run afterwards on
/// the merged record.
pub fn validate_reservation_patch(
    payload: &ReservationPayload,
) -> Result<ReservationPatch, Vec<FieldViolation>> {
    let mut violaciones = Vec::new();
    let mut patch = ReservationPatch {
        cancha: payload.cancha,
        fecha: payload.fecha,
        ..ReservationPatch::default()
    };

    if let Some(h) = payload.hora_inicio.as_deref() {
        match h.parse::<TimeOfDay>() {
            Ok(parsed) => patch.hora_inicio = Some(parsed),
            Err(e) => violaciones.push(FieldViolation::new("horaInicio", e.to_string())),
        }
    }

    if let Some(d) = payload.duracion {
        match BookingDuration::from_hours(d) {
            Some(parsed) => patch.duracion = Some(parsed),
            None => violaciones.push(FieldViolation::new("duracion", "Duración no válida")),
        }
    }

    if let Some(p) = payload.participantes.as_deref() {
        match PartySize::parse(p) {
            Some(parsed) => patch.participantes = Some(parsed),
            None => violaciones.push(FieldViolation::new(
                "participantes",
                "Número de participantes no válido",
            )),
        }
    }

    if let Some(m) = payload.metodo_pago.as_deref() {
        match PaymentMethod::parse(m) {
            Some(parsed) => patch.metodo_pago = Some(parsed),
            None => violaciones.push(FieldViolation::new("metodoPago", "Método de pago no válido")),
        }
    }

    if violaciones.is_empty() {
        Ok(patch)
    } else {
        Err(violaciones)
    }
}
