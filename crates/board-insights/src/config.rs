//! Configuration for the board-insights service.

use std::env;
use std::fmt;

use crate::ai::openai::{DEFAULT_MODEL, OPENAI_API_URL};

/// Environment variable holding the AI provider key.
pub const ENV_AI_API_KEY: &str = "AI_API_KEY";

/// Prefix of keys issued by the provider.
const PROVIDER_KEY_PREFIX: &str = "sk-";

/// Which implementation backs the analysis capabilities.
///
/// Resolved once at startup and read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMode {
    /// Calls the remote language model.
    Remote,
    /// Uses the local rule-based heuristics.
    Heuristic,
}

impl EngineMode {
    /// Select the mode from a configured credential.
    ///
    /// Only a non-empty key with the provider prefix enables the remote path;
    /// anything else (absent, empty, malformed) selects the heuristics.
    pub fn from_credential(api_key: Option<&str>) -> Self {
        match api_key {
            Some(key) if !key.is_empty() && key.starts_with(PROVIDER_KEY_PREFIX) => Self::Remote,
            _ => Self::Heuristic,
        }
    }

    pub fn is_remote_available(self) -> bool {
        self == Self::Remote
    }

    /// Provider name reported by the health endpoint.
    pub fn provider_label(self) -> &'static str {
        match self {
            Self::Remote => "openai",
            Self::Heuristic => "rule-based",
        }
    }
}

impl fmt::Display for EngineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Remote => "remote",
            Self::Heuristic => "heuristic",
        })
    }
}

/// Service configuration.
#[derive(Clone)]
pub struct Config {
    /// AI provider key; `None` when unset or empty.
    pub api_key: Option<String>,
    /// Model used for every remote call.
    pub model: String,
    /// Chat-completions endpoint (override for proxies).
    pub api_base_url: String,
    /// Interface to bind.
    pub host: String,
    /// HTTP server port.
    pub port: u16,
}

impl Config {
    /// Mode implied by the configured key.
    pub fn engine_mode(&self) -> EngineMode {
        EngineMode::from_credential(self.api_key.as_deref())
    }

    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: env::var(ENV_AI_API_KEY).ok().filter(|s| !s.is_empty()),
            model: env::var("AI_MODEL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base_url: env::var("AI_API_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| OPENAI_API_URL.to_string()),
            host: env::var("HOST")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8000),
        }
    }
}

// The key is a secret; keep it out of debug output.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}
