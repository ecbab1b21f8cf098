//! Session configuration.
//!
//! - `SESSION_TTL_SECONDS`: Lifetime of a stored session (default: 86400)
//! - `SESSION_NAMESPACE`: Prefix of every session key (default: `USER_SESSION`)
//! - `SESSION_HEADER`: Request header carrying the session key (default: `session`)

use std::env;

pub const DEFAULT_TTL_SECONDS: u64 = 86_400;
pub const DEFAULT_NAMESPACE: &str = "USER_SESSION";
pub const DEFAULT_HEADER: &str = "session";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub ttl_seconds: u64,
    pub namespace: String,
    pub header_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_TTL_SECONDS,
            namespace: DEFAULT_NAMESPACE.to_string(),
            header_name: DEFAULT_HEADER.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ttl_seconds: env::var("SESSION_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(defaults.ttl_seconds),
            namespace: env::var("SESSION_NAMESPACE")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.namespace),
            header_name: env::var("SESSION_HEADER")
                .ok()
                .map(|v| v.to_ascii_lowercase())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.header_name),
        }
    }

    /// Builds the store key for a session token.
    pub fn key_for(&self, token: &str) -> String {
        format!("{}:{}", self.namespace, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.ttl_seconds, 86_400);
        assert_eq!(config.namespace, "USER_SESSION");
        assert_eq!(config.header_name, "session");
    }

    #[test]
    fn key_is_namespaced() {
        let config = SessionConfig::default();
        assert_eq!(config.key_for("abc"), "USER_SESSION:abc");
    }
}
