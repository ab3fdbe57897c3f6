use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "jugador")]
    Jugador,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Jugador => "jugador",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "jugador" => Some(Role::Jugador),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// Deactivation is one-way: an `Inactivo` account can no longer
/// authenticate, but the record stays behind its reservations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    #[serde(rename = "activo")]
    Activo,
    #[serde(rename = "inactivo")]
    Inactivo,
}

impl AccountStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountStatus::Activo => "activo",
            AccountStatus::Inactivo => "inactivo",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "activo" => Some(AccountStatus::Activo),
            "inactivo" => Some(AccountStatus::Inactivo),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub nombre: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub username: Option<String>,
    pub avatar_url: String,
    pub estado: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The password hash never leaves the store layer; every outward shape
    /// goes through this view.
    pub fn to_view(&self) -> UserView {
        UserView {
            id: self.id,
            nombre: self.nombre.clone(),
            email: self.email.clone(),
            role: self.role,
            username: self.username.clone(),
            avatar_url: self.avatar_url.clone(),
            estado: self.estado,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            nombre: self.nombre.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub nombre: String,
    pub email: String,
    pub role: Role,
    pub username: Option<String>,
    pub avatar_url: String,
    pub estado: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The short form embedded in reservation views.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub nombre: String,
    pub email: String,
}

/// Login/registration response: the safe view plus a freshly issued token.
#[derive(Debug, Serialize)]
pub struct AuthView {
    #[serde(flatten)]
    pub usuario: UserView,
    pub token: String,
}
