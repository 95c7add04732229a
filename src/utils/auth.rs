use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

/// Compare two configured secrets in constant time.
///
/// Used for the static admin credentials, where a byte-by-byte early exit
/// would leak how much of a guess matched.
pub fn verify_secret(provided: &str, expected: &str) -> bool {
    provided.as_bytes().len() == expected.as_bytes().len()
        && provided
            .as_bytes()
            .iter()
            .zip(expected.as_bytes().iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

/// Hash a user password with argon2 and a fresh random salt.
///
/// Returns the PHC string that goes into the user record.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a login attempt against a stored PHC string.
///
/// An unparseable stored hash counts as a failed verification rather than an
/// error; the caller only needs yes/no.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_secret_valid() {
        assert!(verify_secret("panel-secret", "panel-secret"));
    }

    #[test]
    fn test_verify_secret_invalid() {
        assert!(!verify_secret("wrong-secret", "panel-secret"));
    }

    #[test]
    fn test_verify_secret_different_length() {
        assert!(!verify_secret("short", "much-longer-secret"));
    }

    #[test]
    fn test_verify_secret_case_sensitive() {
        assert!(!verify_secret("Panel-Secret", "panel-secret"));
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("hunter2").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("hunter2").unwrap();
        let second = hash_password("hunter2").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_password_garbage_hash() {
        assert!(!verify_password("hunter2", "not-a-phc-string"));
        assert!(!verify_password("hunter2", ""));
    }
}
