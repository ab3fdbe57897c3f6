//! The allowed-value catalog: every enumerated set and numeric bound the
//! registry and the validators enforce, carried as one injected value
//! instead of literals scattered through the call sites. `getOptions()`
//! serves the client-facing subset of it.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::court::{CourtStatus, SportType, Weekday, Zone};
use crate::models::time::TimeOfDay;

#[derive(Debug, Clone)]
pub struct Catalog {
    pub nombre_max: usize,
    pub descripcion_max: usize,
    pub precio_minimo: Decimal,
    pub capacidad_minima: i32,
    pub capacidad_maxima: i32,
    /// Facility operating hours; availability windows must fall inside.
    pub apertura: TimeOfDay,
    pub cierre: TimeOfDay,
    /// Length bounds for a single availability window, in minutes.
    pub ventana_minima: u16,
    pub ventana_maxima: u16,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            nombre_max: 100,
            descripcion_max: 500,
            precio_minimo: Decimal::from(1000),
            capacidad_minima: 2,
            capacidad_maxima: 100,
            apertura: TimeOfDay::from_minutes(6 * 60).unwrap(),
            cierre: TimeOfDay::from_minutes(23 * 60).unwrap(),
            ventana_minima: 30,
            ventana_maxima: 240,
        }
    }
}

impl Catalog {
    pub fn opciones(&self) -> CatalogOptions {
        CatalogOptions {
            tipos: SportType::ALL.iter().map(|t| t.as_str()).collect(),
            ubicaciones: Zone::ALL.iter().map(|u| u.as_str()).collect(),
            estados: CourtStatus::ALL.iter().map(|e| e.as_str()).collect(),
            dias: Weekday::ALL.iter().map(|d| d.as_str()).collect(),
        }
    }
}

/// Static allowed-value sets served to clients for form population.
#[derive(Debug, Serialize)]
pub struct CatalogOptions {
    pub tipos: Vec<&'static str>,
    pub ubicaciones: Vec<&'static str>,
    pub estados: Vec<&'static str>,
    pub dias: Vec<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opciones_expone_los_conjuntos_completos() {
        let opciones = Catalog::default().opciones();
        assert_eq!(
            opciones.tipos,
            vec!["Fútbol", "Básquetbol", "Tenis", "Voleibol"]
        );
        assert_eq!(
            opciones.ubicaciones,
            vec!["Centro", "Norte", "Sur", "Este", "Oeste"]
        );
        assert_eq!(
            opciones.estados,
            vec!["disponible", "no disponible", "mantenimiento"]
        );
        assert_eq!(opciones.dias.len(), 7);
        assert_eq!(opciones.dias[0], "Lunes");
        assert_eq!(opciones.dias[6], "Domingo");
    }

    #[test]
    fn horario_de_funcionamiento_por_defecto() {
        let catalogo = Catalog::default();
        assert_eq!(catalogo.apertura.to_string(), "06:00");
        assert_eq!(catalogo.cierre.to_string(), "23:00");
    }
}
