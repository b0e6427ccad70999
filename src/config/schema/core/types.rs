use super::super::{AttachmentsConfig, FormConfig, ServiceConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// State directory (session file, secret key) - computed from home, not serialized
    #[serde(skip)]
    pub state_dir: PathBuf,
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub attachments: AttachmentsConfig,

    #[serde(default)]
    pub form: FormConfig,

    #[serde(default)]
    pub secrets: SecretsConfig,
}

fn default_log_level() -> String {
    "info".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretsConfig {
    /// Encrypt the session token at rest
    #[serde(default = "default_true")]
    pub encrypt: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self { encrypt: true }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from(".intro-writer"),
            config_path: PathBuf::from(".intro-writer").join("config.toml"),
            log_level: default_log_level(),
            service: ServiceConfig::default(),
            attachments: AttachmentsConfig::default(),
            form: FormConfig::default(),
            secrets: SecretsConfig::default(),
        }
    }
}

impl Config {
    pub fn session_path(&self) -> PathBuf {
        self.state_dir.join("session.json")
    }
}
