use bcrypt::{hash, verify, BcryptError};

/// bcrypt cost used for stored passwords.
const BCRYPT_COST: u32 = 10;

/// Hash a password using bcrypt
///
/// # Example
/// ```
/// use folio_utils::hash::{bcrypt_check, bcrypt_hash};
///
/// let hashed = bcrypt_hash("my_password").unwrap();
/// assert!(bcrypt_check("my_password", &hashed));
/// ```
pub fn bcrypt_hash(password: &str) -> Result<String, BcryptError> {
    hash(password.as_bytes(), BCRYPT_COST)
}

/// Compare a plaintext password against a bcrypt hash.
///
/// Malformed hashes never match.
pub fn bcrypt_check(password: &str, hash: &str) -> bool {
    verify(password.as_bytes(), hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcrypt_hash_and_check() {
        let password = "test_password";
        let hash = bcrypt_hash(password).unwrap();

        assert!(bcrypt_check(password, &hash));
        assert!(!bcrypt_check("wrong_password", &hash));
    }

    #[test]
    fn test_bcrypt_check_rejects_garbage_hash() {
        assert!(!bcrypt_check("anything", "not-a-bcrypt-hash"));
    }
}
