use crate::utils::time::current_timestamp;
use dashmap::DashMap;
use rand::RngCore;

/// Bearer tokens issued by the admin panel login.
///
/// Every admin-only endpoint other than the login itself requires a live
/// token; possession of an approval URL alone is not enough. Tokens are 32
/// random bytes, hex-encoded, and expire after the configured TTL.
pub struct AdminSessions {
    tokens: DashMap<String, i64>,
    ttl_seconds: i64,
}

impl AdminSessions {
    pub fn new(ttl_seconds: i64) -> Self {
        Self {
            tokens: DashMap::new(),
            ttl_seconds,
        }
    }

    /// Mint a fresh token for a successful panel login.
    pub fn issue(&self) -> String {
        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);

        self.tokens.insert(token.clone(), current_timestamp());
        token
    }

    /// Check a presented token; expired tokens are removed as they are seen.
    pub fn verify(&self, token: &str) -> bool {
        let issued_at = match self.tokens.get(token) {
            Some(entry) => *entry.value(),
            None => return false,
        };

        if current_timestamp() - issued_at > self.ttl_seconds {
            self.tokens.remove(token);
            return false;
        }

        true
    }

    pub fn active_count(&self) -> usize {
        self.tokens.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_token_verifies() {
        let sessions = AdminSessions::new(3600);
        let token = sessions.issue();

        assert_eq!(token.len(), 64);
        assert!(sessions.verify(&token));
        assert_eq!(sessions.active_count(), 1);
    }

    #[test]
    fn test_unknown_token_rejected() {
        let sessions = AdminSessions::new(3600);
        sessions.issue();

        assert!(!sessions.verify("deadbeef"));
        assert!(!sessions.verify(""));
    }

    #[test]
    fn test_tokens_are_unique() {
        let sessions = AdminSessions::new(3600);
        assert_ne!(sessions.issue(), sessions.issue());
    }

    #[test]
    fn test_expired_token_rejected_and_purged() {
        let sessions = AdminSessions::new(3600);
        let token = sessions.issue();

        // age the token past the TTL
        sessions
            .tokens
            .insert(token.clone(), current_timestamp() - 7200);

        assert!(!sessions.verify(&token));
        assert_eq!(sessions.active_count(), 0);
    }
}
