//! Authorization policy: role and ownership gates, one function per
//! decision, independent of transport.
//!
//! The two gates are deliberately different in strength. Courts are scoped
//! to their owning admin; another admin editing them is told `NotFound`
//! (callers fold ownership into the lookup so foreign records are
//! indistinguishable from absent ones). Reservations are looser: any admin
//! may act on any reservation, otherwise only its owner may.

use uuid::Uuid;

use crate::models::court::Court;
use crate::models::reservation::Reservation;
use crate::models::user::{AccountStatus, Role};
use crate::utils::error::AppError;

/// The already-authenticated caller. Deactivated accounts are rejected at
/// the authentication boundary, so an instance of this type always refers
/// to an active user.
#[derive(Debug, Clone)]
pub struct Subject {
    pub id: Uuid,
    pub role: Role,
    pub estado: AccountStatus,
}

impl Subject {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Role gate: the operation exists only for admins.
pub fn require_admin(subject: &Subject, mensaje: &str) -> Result<(), AppError> {
    if subject.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden(mensaje.to_string()))
    }
}

/// Ownership gate for courts: strictly the creating admin.
pub fn owns_court(subject: &Subject, cancha: &Court) -> bool {
    cancha.creador == subject.id
}

/// Ownership gate for reservations: the booking user, or any admin.
pub fn can_act_on_reservation(subject: &Subject, reserva: &Reservation) -> bool {
    subject.is_admin() || reserva.usuario == subject.id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::court::{CourtStatus, SportType, Zone};
    use crate::models::reservation::{
        BookingDuration, PartySize, PaymentMethod, ReservationStatus,
    };
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn sujeto(role: Role) -> Subject {
        Subject {
            id: Uuid::new_v4(),
            role,
            estado: AccountStatus::Activo,
        }
    }

    fn cancha_de(creador: Uuid) -> Court {
        let ahora = Utc::now();
        Court {
            id: Uuid::new_v4(),
            nombre: "Cancha".into(),
            tipo: SportType::Tenis,
            precio: Decimal::from(20000),
            estado: CourtStatus::Disponible,
            descripcion: String::new(),
            ubicacion: Zone::Norte,
            capacidad: 4,
            creador,
            horarios: Vec::new(),
            activa: true,
            created_at: ahora,
            updated_at: ahora,
        }
    }

    fn reserva_de(usuario: Uuid) -> Reservation {
        let ahora = Utc::now();
        Reservation {
            id: Uuid::new_v4(),
            usuario,
            cancha: Uuid::new_v4(),
            fecha: ahora.date_naive(),
            hora_inicio: "10:00".parse().unwrap(),
            duracion: BookingDuration::One,
            participantes: PartySize::Four,
            metodo_pago: PaymentMethod::Efectivo,
            estado: ReservationStatus::Completada,
            precio: Decimal::from(20000),
            created_at: ahora,
            updated_at: ahora,
        }
    }

    #[test]
    fn el_rol_admin_pasa_la_puerta_de_rol() {
        assert!(require_admin(&sujeto(Role::Admin), "no").is_ok());
        assert!(matches!(
            require_admin(&sujeto(Role::Jugador), "no"),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn solo_el_creador_posee_la_cancha() {
        let admin = sujeto(Role::Admin);
        assert!(owns_court(&admin, &cancha_de(admin.id)));
        // Otro admin no es dueño: el alcance de canchas es por propietario.
        assert!(!owns_court(&admin, &cancha_de(Uuid::new_v4())));
    }

    #[test]
    fn cualquier_admin_actua_sobre_cualquier_reserva() {
        let admin = sujeto(Role::Admin);
        assert!(can_act_on_reservation(&admin, &reserva_de(Uuid::new_v4())));
    }

    #[test]
    fn un_jugador_solo_actua_sobre_su_reserva() {
        let jugador = sujeto(Role::Jugador);
        assert!(can_act_on_reservation(&jugador, &reserva_de(jugador.id)));
        assert!(!can_act_on_reservation(&jugador, &reserva_de(Uuid::new_v4())));
    }
}
