use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ResumatchConfig {
    pub server: ServerConfig,
    pub embedding: EmbeddingConfig,
    pub jobs: JobsConfig,
    pub matching: MatchingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: String,
    pub model: String,
    pub cache_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct JobsConfig {
    /// Listing endpoint queried once per upload request.
    pub endpoint: String,
    /// Postings taken from the response before any filtering.
    pub max_postings: usize,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum cosine similarity (exclusive) for a posting to appear in results.
    pub threshold: f32,
    /// Maximum number of matches returned.
    pub limit: usize,
    /// Display length cap for posting descriptions.
    pub description_preview_chars: usize,
}

impl Default for ResumatchConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            embedding: EmbeddingConfig::default(),
            jobs: JobsConfig::default(),
            matching: MatchingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            log_level: "info".into(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        let cache_dir = default_resumatch_dir()
            .join("models")
            .to_string_lossy()
            .into_owned();
        Self {
            provider: "local".into(),
            model: "all-MiniLM-L6-v2".into(),
            cache_dir,
        }
    }
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://remotive.com/api/remote-jobs".into(),
            max_postings: 50,
            timeout_secs: 30,
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            limit: 5,
            description_preview_chars: 200,
        }
    }
}

/// Returns `~/.resumatch/`
pub fn default_resumatch_dir() -> PathBuf {
    dirs::home_dir()
        .expect("home directory must exist")
        .join(".resumatch")
}

/// Returns the default config file path: `~/.resumatch/config.toml`
pub fn default_config_path() -> PathBuf {
    default_resumatch_dir().join("config.toml")
}

impl ResumatchConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            ResumatchConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    /// (RESUMATCH_PORT, RESUMATCH_JOBS_ENDPOINT, RESUMATCH_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("RESUMATCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("RESUMATCH_JOBS_ENDPOINT") {
            self.jobs.endpoint = val;
        }
        if let Ok(val) = std::env::var("RESUMATCH_LOG_LEVEL") {
            self.server.log_level = val;
        }
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .expect("home directory must exist")
            .join(rest)
    } else {
        PathBuf::from(path)
    }
}
