//! Argon2id password hashing in PHC string format: parameters and salt
//! travel inside the stored hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// `Ok(false)` is a wrong password; `Err` is a malformed stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashea_y_verifica() {
        let hash = hash_password("Secreta123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Secreta123", &hash).unwrap());
        assert!(!verify_password("otra", &hash).unwrap());
    }

    #[test]
    fn hash_corrupto_es_error() {
        assert!(verify_password("x", "no-es-un-hash").is_err());
    }
}
