use std::sync::Arc;

use crate::auth::jwt::JwtConfig;
use crate::catalog::Catalog;
use crate::store::{CourtStore, ReservationStore, UserStore};

/// Shared application state handed to every handler via `State<AppState>`.
/// The three store handles usually point at the same adapter (Postgres in
/// the binary, the in-memory store in tests); splitting them keeps each
/// service declaring only the collections it touches.
#[derive(Clone)]
pub struct AppState {
    pub canchas: Arc<dyn CourtStore>,
    pub reservas: Arc<dyn ReservationStore>,
    pub usuarios: Arc<dyn UserStore>,
    pub catalogo: Arc<Catalog>,
    pub jwt: Arc<JwtConfig>,
}
