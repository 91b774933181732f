use crate::error::{SecurityError, SecurityResult};
use serde::Deserialize;
use std::time::Duration;

/// Tunables for the security layer, loadable from TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Cap on sanitized free-text length, in characters.
    pub max_input_length: usize,
    /// Rate-limit attempt cap per window.
    pub max_attempts: u32,
    /// Rate-limit window length in seconds.
    pub window_secs: u64,
    /// Session-liveness poll interval in seconds.
    pub session_poll_secs: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_length: 1000,
            max_attempts: 5,
            window_secs: 60,
            session_poll_secs: 120,
        }
    }
}

impl SecurityConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(input: &str) -> SecurityResult<Self> {
        toml::from_str(input).map_err(|e| SecurityError::Config(e.to_string()))
    }

    /// Rate-limit window as a [`Duration`].
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Session poll interval as a [`Duration`].
    pub fn session_poll_interval(&self) -> Duration {
        Duration::from_secs(self.session_poll_secs)
    }
}
