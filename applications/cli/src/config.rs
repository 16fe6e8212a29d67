/// Application configuration
use anyhow::{bail, Context, Result};
use playlist_client::{ClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "playlists.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds; unset means no client-side limit
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_password")]
    pub password: String,
}

impl AppConfig {
    /// Load configuration from file and environment.
    ///
    /// An explicit `path` must exist. Without one, `playlists.toml` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    bail!("Configuration file not found: {}", path.display());
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (PLAYLISTS_SERVER__BASE_URL, ...)
        settings = settings.add_source(
            config::Environment::with_prefix("PLAYLISTS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.base_url.trim().is_empty() {
            bail!("Server base URL is required (set PLAYLISTS_SERVER__BASE_URL)");
        }

        if self.auth.username.is_empty() {
            bail!("Username is required (set PLAYLISTS_AUTH__USERNAME)");
        }

        Ok(())
    }

    pub fn to_client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.server.base_url.clone())
            .with_credentials(self.auth.username.clone(), self.auth.password.clone());

        match self.server.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        base_url: default_base_url(),
        timeout_secs: None,
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        username: default_username(),
        password: default_password(),
    }
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_password() -> String {
    "password".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            auth: default_auth(),
        }
    }
}
