//! Hash-map document store. Backs the test suite; mirrors the Postgres
//! adapter's filtering and ordering exactly.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::court::{Court, CourtStatus};
use crate::models::reservation::Reservation;
use crate::models::user::{AccountStatus, User};
use crate::utils::error::AppError;

use super::{CourtStore, ReservationStore, UserStore};

#[derive(Default)]
pub struct MemoryStore {
    canchas: RwLock<HashMap<Uuid, Court>>,
    reservas: RwLock<HashMap<Uuid, Reservation>>,
    usuarios: RwLock<HashMap<Uuid, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(canchas: &mut [Court]) {
    canchas.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn by_date_desc(reservas: &mut [Reservation]) {
    reservas.sort_by(|a, b| {
        b.fecha
            .cmp(&a.fecha)
            .then_with(|| b.hora_inicio.cmp(&a.hora_inicio))
    });
}

#[async_trait]
impl CourtStore for MemoryStore {
    async fn insert(&self, cancha: &Court) -> Result<(), AppError> {
        self.canchas
            .write()
            .expect("court store lock poisoned")
            .insert(cancha.id, cancha.clone());
        Ok(())
    }

    async fn save(&self, cancha: &Court) -> Result<(), AppError> {
        self.canchas
            .write()
            .expect("court store lock poisoned")
            .insert(cancha.id, cancha.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Court>, AppError> {
        Ok(self
            .canchas
            .read()
            .expect("court store lock poisoned")
            .get(&id)
            .cloned())
    }

    async fn list_active_by_creator(&self, creador: Uuid) -> Result<Vec<Court>, AppError> {
        let mut encontradas: Vec<Court> = self
            .canchas
            .read()
            .expect("court store lock poisoned")
            .values()
            .filter(|c| c.creador == creador && c.activa)
            .cloned()
            .collect();
        newest_first(&mut encontradas);
        Ok(encontradas)
    }

    async fn active_ids_by_creator(&self, creador: Uuid) -> Result<Vec<Uuid>, AppError> {
        Ok(self
            .canchas
            .read()
            .expect("court store lock poisoned")
            .values()
            .filter(|c| c.creador == creador && c.activa)
            .map(|c| c.id)
            .collect())
    }

    async fn list_public(&self, busqueda: Option<&str>) -> Result<Vec<Court>, AppError> {
        let aguja = busqueda.map(str::to_lowercase);
        let mut encontradas: Vec<Court> = self
            .canchas
            .read()
            .expect("court store lock poisoned")
            .values()
            .filter(|c| c.activa && c.estado == CourtStatus::Disponible)
            .filter(|c| match &aguja {
                Some(q) => {
                    c.nombre.to_lowercase().contains(q)
                        || c.tipo.as_str().to_lowercase().contains(q)
                }
                None => true,
            })
            .cloned()
            .collect();
        newest_first(&mut encontradas);
        Ok(encontradas)
    }

    async fn active_name_in_use(
        &self,
        nombre: &str,
        excluir: Option<Uuid>,
    ) -> Result<bool, AppError> {
        Ok(self
            .canchas
            .read()
            .expect("court store lock poisoned")
            .values()
            .any(|c| c.activa && c.nombre == nombre && Some(c.id) != excluir))
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn insert(&self, reserva: &Reservation) -> Result<(), AppError> {
        self.reservas
            .write()
            .expect("reservation store lock poisoned")
            .insert(reserva.id, reserva.clone());
        Ok(())
    }

    async fn save(&self, reserva: &Reservation) -> Result<(), AppError> {
        self.reservas
            .write()
            .expect("reservation store lock poisoned")
            .insert(reserva.id, reserva.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Reservation>, AppError> {
        Ok(self
            .reservas
            .read()
            .expect("reservation store lock poisoned")
            .get(&id)
            .cloned())
    }

    async fn list_by_user(&self, usuario: Uuid) -> Result<Vec<Reservation>, AppError> {
        let mut encontradas: Vec<Reservation> = self
            .reservas
            .read()
            .expect("reservation store lock poisoned")
            .values()
            .filter(|r| r.usuario == usuario)
            .cloned()
            .collect();
        by_date_desc(&mut encontradas);
        Ok(encontradas)
    }

    async fn list_by_courts(&self, canchas: &[Uuid]) -> Result<Vec<Reservation>, AppError> {
        let mut encontradas: Vec<Reservation> = self
            .reservas
            .read()
            .expect("reservation store lock poisoned")
            .values()
            .filter(|r| canchas.contains(&r.cancha))
            .cloned()
            .collect();
        by_date_desc(&mut encontradas);
        Ok(encontradas)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, usuario: &User) -> Result<(), AppError> {
        self.usuarios
            .write()
            .expect("user store lock poisoned")
            .insert(usuario.id, usuario.clone());
        Ok(())
    }

    async fn save(&self, usuario: &User) -> Result<(), AppError> {
        self.usuarios
            .write()
            .expect("user store lock poisoned")
            .insert(usuario.id, usuario.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self
            .usuarios
            .read()
            .expect("user store lock poisoned")
            .get(&id)
            .cloned())
    }

    async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .usuarios
            .read()
            .expect("user store lock poisoned")
            .values()
            .find(|u| u.email == email && u.estado == AccountStatus::Activo)
            .cloned())
    }

    async fn email_in_use(&self, email: &str) -> Result<bool, AppError> {
        Ok(self
            .usuarios
            .read()
            .expect("user store lock poisoned")
            .values()
            .any(|u| u.email == email))
    }

    async fn username_in_use(
        &self,
        username: &str,
        excluir: Option<Uuid>,
    ) -> Result<bool, AppError> {
        Ok(self
            .usuarios
            .read()
            .expect("user store lock poisoned")
            .values()
            .any(|u| u.username.as_deref() == Some(username) && Some(u.id) != excluir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::court::{SportType, Zone};
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    fn cancha(nombre: &str, creador: Uuid, hace_dias: i64) -> Court {
        let momento = Utc::now() - Duration::days(hace_dias);
        Court {
            id: Uuid::new_v4(),
            nombre: nombre.into(),
            tipo: SportType::Futbol,
            precio: Decimal::from(20000),
            estado: CourtStatus::Disponible,
            descripcion: String::new(),
            ubicacion: Zone::Centro,
            capacidad: 10,
            creador,
            horarios: Vec::new(),
            activa: true,
            created_at: momento,
            updated_at: momento,
        }
    }

    #[tokio::test]
    async fn lista_del_creador_mas_reciente_primero() {
        let store = MemoryStore::new();
        let admin = Uuid::new_v4();
        CourtStore::insert(&store, &cancha("Vieja", admin, 2)).await.unwrap();
        CourtStore::insert(&store, &cancha("Nueva", admin, 0)).await.unwrap();
        CourtStore::insert(&store, &cancha("Ajena", Uuid::new_v4(), 1))
            .await
            .unwrap();

        let propias = store.list_active_by_creator(admin).await.unwrap();
        let nombres: Vec<_> = propias.iter().map(|c| c.nombre.as_str()).collect();
        assert_eq!(nombres, vec!["Nueva", "Vieja"]);
    }

    #[tokio::test]
    async fn busqueda_publica_ignora_mayusculas() {
        let store = MemoryStore::new();
        let admin = Uuid::new_v4();
        CourtStore::insert(&store, &cancha("Cancha Central", admin, 0))
            .await
            .unwrap();

        assert_eq!(store.list_public(Some("central")).await.unwrap().len(), 1);
        // También debe coincidir contra el tipo.
        assert_eq!(store.list_public(Some("fútbol")).await.unwrap().len(), 1);
        assert!(store.list_public(Some("tenis")).await.unwrap().is_empty());
    }
}
