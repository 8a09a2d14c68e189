//! Console configuration loaded from environment variables.

use std::env;

use murmur_client::SessionConfig;

/// Host configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub feed_limit: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            feed_limit: env::var("FEED_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
        }
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            feed_limit: self.feed_limit,
        }
    }
}
