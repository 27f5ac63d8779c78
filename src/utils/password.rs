use pbkdf2::{
    password_hash::{Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Params, Pbkdf2,
};
use rand::Rng;

// Moins d'itérations en test pour garder les builds debug rapides
#[cfg(not(test))]
const ITERATIONS: u32 = 260_000;
#[cfg(test)]
const ITERATIONS: u32 = 1_000;

const KEY_LENGTH: usize = 32;
const SALT_LENGTH: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(HashError),
    #[error("stored password hash is invalid: {0}")]
    InvalidHash(HashError),
}

/// Hash un mot de passe avec PBKDF2-HMAC-SHA256 et un salt aléatoire de 16 bytes
/// Format PHC: $pbkdf2-sha256$i=iterations,l=32$salt$hash
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill(&mut salt);
    let salt = SaltString::encode_b64(&salt).map_err(PasswordError::Hash)?;

    let params = Params {
        rounds: ITERATIONS,
        output_length: KEY_LENGTH,
    };

    let hash = Pbkdf2
        .hash_password_customized(
            password.as_bytes(),
            Some(Algorithm::Pbkdf2Sha256.ident()),
            None,
            params,
            &salt,
        )
        .map_err(PasswordError::Hash)?;

    Ok(hash.to_string())
}

/// Vérifie un mot de passe contre un hash PHC
/// Les itérations et le salt sont relus depuis le hash stocké,
/// la comparaison est faite en temps constant par pbkdf2
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored_hash).map_err(PasswordError::InvalidHash)?;

    match Pbkdf2.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(e) => Err(PasswordError::InvalidHash(e)),
    }
}
