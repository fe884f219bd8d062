//! Server utility functions

/// Hash a password with argon2 and a random salt
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    use argon2::{Argon2, PasswordHasher};
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Registration password policy: at least 8 chars, one lowercase letter,
/// one non-alphanumeric character.
pub fn password_meets_policy(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_lowercase())
        && password.chars().any(|c| !c.is_alphanumeric())
}

/// Trim and lowercase an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Constant-time string comparison for table access tokens
pub fn tokens_match(supplied: &str, stored: &str) -> bool {
    ring::constant_time::verify_slices_are_equal(supplied.as_bytes(), stored.as_bytes()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("s3cret-pw!").unwrap();
        assert!(verify_password("s3cret-pw!", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(!verify_password("whatever", "not-a-phc-string"));
    }

    #[test]
    fn test_password_policy() {
        assert!(password_meets_policy("abcdefg!"));
        assert!(password_meets_policy("long enough pass"));
        assert!(!password_meets_policy("short!a"));
        assert!(!password_meets_policy("ALLUPPER123!"));
        assert!(!password_meets_policy("alllowercase1"));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Staff@Mesa.TEST "), "staff@mesa.test");
    }

    #[test]
    fn test_tokens_match() {
        assert!(tokens_match("abc123", "abc123"));
        assert!(!tokens_match("abc123", "abc124"));
        assert!(!tokens_match("abc", "abc123"));
    }
}
