//! Registration, login and profile management. Passwords never leave this
//! module un-hashed, and account deactivation is one-way: the record stays
//! behind its reservations but stops authenticating.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::jwt::{self, JwtConfig};
use crate::auth::password::{hash_password, verify_password};
use crate::models::user::{AccountStatus, AuthView, Role, User, UserView};
use crate::policy::Subject;
use crate::store::UserStore;
use crate::utils::error::AppError;
use crate::validation::FieldViolation;

const USUARIO_NO_ENCONTRADO: &str = "Usuario no encontrado";
const CREDENCIALES_INVALIDAS: &str = "Credenciales inválidas";
const EMAIL_EN_USO: &str = "El correo ya está registrado";
const USERNAME_EN_USO: &str = "El nombre de usuario ya está en uso";
const PASSWORD_CORTA: &str = "La contraseña debe tener al menos 6 caracteres";

const PASSWORD_MIN: usize = 6;
const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 20;

#[derive(Debug, Default, Deserialize)]
pub struct RegisterPayload {
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginPayload {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// `username` distinguishes "not sent" from an explicit `null`: sending
/// `null` (or an empty string) clears the username.
#[derive(Debug, Default, Deserialize)]
pub struct ProfilePayload {
    pub nombre: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub username: Option<Option<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordPayload {
    pub password_actual: Option<String>,
    pub password_nueva: Option<String>,
}

fn email_valido(email: &str) -> bool {
    let Some((local, dominio)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !dominio.is_empty()
        && !dominio.starts_with('.')
        && !dominio.ends_with('.')
        && dominio.contains('.')
        && !email.chars().any(char::is_whitespace)
        && !dominio.contains('@')
}

fn username_violation(username: &str) -> Option<FieldViolation> {
    if username.chars().count() < USERNAME_MIN || username.chars().count() > USERNAME_MAX {
        return Some(FieldViolation::new(
            "username",
            format!(
                "El nombre de usuario debe tener entre {USERNAME_MIN} y {USERNAME_MAX} caracteres"
            ),
        ));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Some(FieldViolation::new(
            "username",
            "El nombre de usuario solo puede contener letras, números y guiones bajos",
        ));
    }
    None
}

pub struct UserDirectory {
    usuarios: Arc<dyn UserStore>,
    jwt: Arc<JwtConfig>,
}

impl UserDirectory {
    pub fn new(usuarios: Arc<dyn UserStore>, jwt: Arc<JwtConfig>) -> Self {
        Self { usuarios, jwt }
    }

    fn issue_token(&self, usuario: &User) -> Result<String, AppError> {
        jwt::issue(usuario.id, usuario.role, &self.jwt)
            .map_err(|e| AppError::Internal(format!("No se pudo emitir el token: {e}")))
    }

    pub async fn register(&self, payload: &RegisterPayload) -> Result<AuthView, AppError> {
        let mut violaciones = Vec::new();

        let nombre = payload.nombre.as_deref().map(str::trim).unwrap_or_default();
        if nombre.is_empty() {
            violaciones.push(FieldViolation::new("nombre", "El nombre es requerido"));
        }

        let email = payload
            .email
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_lowercase();
        if email.is_empty() {
            violaciones.push(FieldViolation::new("email", "El email es requerido"));
        } else if !email_valido(&email) {
            violaciones.push(FieldViolation::new("email", "Formato de email inválido"));
        }

        match payload.password.as_deref() {
            None | Some("") => {
                violaciones.push(FieldViolation::new("password", "La contraseña es requerida"));
            }
            Some(password) if password.chars().count() < PASSWORD_MIN => {
                violaciones.push(FieldViolation::new("password", PASSWORD_CORTA));
            }
            Some(_) => {}
        }

        let username = payload
            .username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty());
        if let Some(username) = username {
            if let Some(v) = username_violation(username) {
                violaciones.push(v);
            }
        }

        if !violaciones.is_empty() {
            return Err(AppError::Validation(violaciones));
        }

        if self.usuarios.email_in_use(&email).await? {
            return Err(AppError::Conflict(EMAIL_EN_USO.into()));
        }
        if let Some(username) = username {
            if self.usuarios.username_in_use(username, None).await? {
                return Err(AppError::Conflict(USERNAME_EN_USO.into()));
            }
        }

        // An unknown role falls back to jugador; admin must be explicit.
        let role = payload
            .role
            .as_deref()
            .and_then(Role::parse)
            .unwrap_or(Role::Jugador);

        let password_hash = hash_password(payload.password.as_deref().unwrap_or_default())
            .map_err(|e| AppError::Internal(format!("No se pudo hashear la contraseña: {e}")))?;

        let ahora = Utc::now();
        let usuario = User {
            id: Uuid::new_v4(),
            nombre: nombre.to_string(),
            email,
            password_hash,
            role,
            username: username.map(str::to_string),
            avatar_url: String::new(),
            estado: AccountStatus::Activo,
            created_at: ahora,
            updated_at: ahora,
        };
        self.usuarios.insert(&usuario).await?;

        tracing::info!(email = %usuario.email, "Nuevo usuario registrado");
        let token = self.issue_token(&usuario)?;
        Ok(AuthView {
            usuario: usuario.to_view(),
            token,
        })
    }

    pub async fn login(&self, payload: &LoginPayload) -> Result<AuthView, AppError> {
        let email = payload.email.as_deref().map(str::trim).unwrap_or_default();
        let password = payload.password.as_deref().unwrap_or_default();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::BadRequest("Email y contraseña son requeridos".into()));
        }

        let email = email.to_lowercase();
        // Inactive accounts are invisible here: same answer as a wrong
        // password, so login failures reveal nothing about the account.
        let Some(usuario) = self.usuarios.find_active_by_email(&email).await? else {
            tracing::warn!(email = %email, "Login fallido: usuario no encontrado");
            return Err(AppError::Unauthorized(CREDENCIALES_INVALIDAS.into()));
        };

        let valido = verify_password(password, &usuario.password_hash)
            .map_err(|e| AppError::Internal(format!("Hash de contraseña ilegible: {e}")))?;
        if !valido {
            tracing::warn!(email = %email, "Login fallido: contraseña incorrecta");
            return Err(AppError::Unauthorized(CREDENCIALES_INVALIDAS.into()));
        }

        tracing::info!(email = %email, "Login exitoso");
        let token = self.issue_token(&usuario)?;
        Ok(AuthView {
            usuario: usuario.to_view(),
            token,
        })
    }

    pub async fn profile(&self, subject: &Subject) -> Result<UserView, AppError> {
        let usuario = self
            .usuarios
            .find_by_id(subject.id)
            .await?
            .filter(|u| u.estado == AccountStatus::Activo)
            .ok_or_else(|| AppError::NotFound(USUARIO_NO_ENCONTRADO.into()))?;
        Ok(usuario.to_view())
    }

    pub async fn update_profile(
        &self,
        subject: &Subject,
        payload: &ProfilePayload,
    ) -> Result<UserView, AppError> {
        let mut usuario = self
            .usuarios
            .find_by_id(subject.id)
            .await?
            .filter(|u| u.estado == AccountStatus::Activo)
            .ok_or_else(|| AppError::NotFound(USUARIO_NO_ENCONTRADO.into()))?;

        if let Some(nombre) = payload.nombre.as_deref().map(str::trim) {
            if !nombre.is_empty() {
                usuario.nombre = nombre.to_string();
            }
        }

        if let Some(password) = payload.password.as_deref() {
            if !password.is_empty() {
                if password.chars().count() < PASSWORD_MIN {
                    return Err(AppError::Validation(vec![FieldViolation::new(
                        "password",
                        PASSWORD_CORTA,
                    )]));
                }
                usuario.password_hash = hash_password(password).map_err(|e| {
                    AppError::Internal(format!("No se pudo hashear la contraseña: {e}"))
                })?;
            }
        }

        match &payload.username {
            None => {}
            Some(None) => usuario.username = None,
            Some(Some(username)) => {
                let username = username.trim();
                if username.is_empty() {
                    usuario.username = None;
                } else {
                    if let Some(v) = username_violation(username) {
                        return Err(AppError::Validation(vec![v]));
                    }
                    if self
                        .usuarios
                        .username_in_use(username, Some(usuario.id))
                        .await?
                    {
                        return Err(AppError::Conflict(USERNAME_EN_USO.into()));
                    }
                    usuario.username = Some(username.to_string());
                }
            }
        }

        usuario.updated_at = Utc::now();
        self.usuarios.save(&usuario).await?;
        Ok(usuario.to_view())
    }

    pub async fn change_password(
        &self,
        subject: &Subject,
        payload: &PasswordPayload,
    ) -> Result<(), AppError> {
        let (Some(actual), Some(nueva)) = (
            payload.password_actual.as_deref().filter(|p| !p.is_empty()),
            payload.password_nueva.as_deref().filter(|p| !p.is_empty()),
        ) else {
            return Err(AppError::BadRequest("Contraseñas requeridas".into()));
        };

        let mut usuario = self
            .usuarios
            .find_by_id(subject.id)
            .await?
            .ok_or_else(|| AppError::NotFound(USUARIO_NO_ENCONTRADO.into()))?;

        let coincide = verify_password(actual, &usuario.password_hash)
            .map_err(|e| AppError::Internal(format!("Hash de contraseña ilegible: {e}")))?;
        if !coincide {
            return Err(AppError::BadRequest("Contraseña actual incorrecta".into()));
        }
        if nueva.chars().count() < PASSWORD_MIN {
            return Err(AppError::Validation(vec![FieldViolation::new(
                "password",
                PASSWORD_CORTA,
            )]));
        }

        usuario.password_hash = hash_password(nueva)
            .map_err(|e| AppError::Internal(format!("No se pudo hashear la contraseña: {e}")))?;
        usuario.updated_at = Utc::now();
        self.usuarios.save(&usuario).await?;
        Ok(())
    }

    /// One-way soft deactivation; a second attempt is an error.
    pub async fn deactivate(&self, subject: &Subject) -> Result<(), AppError> {
        let mut usuario = self
            .usuarios
            .find_by_id(subject.id)
            .await?
            .ok_or_else(|| AppError::NotFound(USUARIO_NO_ENCONTRADO.into()))?;

        if usuario.estado == AccountStatus::Inactivo {
            return Err(AppError::BadRequest("Cuenta ya desactivada".into()));
        }

        usuario.estado = AccountStatus::Inactivo;
        usuario.avatar_url = String::new();
        usuario.updated_at = Utc::now();
        self.usuarios.save(&usuario).await?;

        tracing::info!(usuario = %usuario.id, "Cuenta desactivada");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_validos_e_invalidos() {
        assert!(email_valido("ana@example.com"));
        assert!(email_valido("a.b+c@sub.dominio.co"));
        for caso in ["", "sin-arroba", "@dominio.com", "ana@", "ana@dominio", "a b@x.com", "ana@.com"] {
            assert!(!email_valido(caso), "aceptó {caso:?}");
        }
    }

    #[test]
    fn username_con_limites_y_caracteres() {
        assert!(username_violation("ana_99").is_none());
        assert!(username_violation("ab").is_some());
        assert!(username_violation(&"a".repeat(21)).is_some());
        assert!(username_violation("ana maría").is_some());
    }
}
