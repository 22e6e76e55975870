//! Shared-password check for the admin page.
//!
//! Only a SHA-256 digest of the password is kept in memory.

use sha2::{Digest, Sha256};

/// Verifies login attempts against the configured admin password.
#[derive(Debug, Clone, Default)]
pub struct PasswordCheck {
    digest: Option<[u8; 32]>,
}

impl PasswordCheck {
    /// Creates a check for `password`. With `None`, every attempt fails.
    pub fn new(password: Option<&str>) -> Self {
        Self {
            digest: password.map(digest),
        }
    }

    /// Returns true if an admin password is configured.
    pub fn is_configured(&self) -> bool {
        self.digest.is_some()
    }

    /// Returns true if `attempt` matches the configured password.
    pub fn verify(&self, attempt: &str) -> bool {
        let Some(expected) = &self.digest else {
            return false;
        };
        let actual = digest(attempt);
        expected
            .iter()
            .zip(actual.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

fn digest(password: &str) -> [u8; 32] {
    Sha256::digest(password.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_correct_password() {
        let check = PasswordCheck::new(Some("LetMeIn42"));
        assert!(check.is_configured());
        assert!(check.verify("LetMeIn42"));
    }

    #[test]
    fn test_verify_wrong_password() {
        let check = PasswordCheck::new(Some("LetMeIn42"));
        assert!(!check.verify("letmein42"));
        assert!(!check.verify("LetMeIn4"));
        assert!(!check.verify(""));
    }

    #[test]
    fn test_unconfigured_rejects_everything() {
        let check = PasswordCheck::new(None);
        assert!(!check.is_configured());
        assert!(!check.verify(""));
        assert!(!check.verify("anything"));
    }
}
