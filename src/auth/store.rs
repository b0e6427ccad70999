use super::credential::{Credential, UserProfile};
use crate::config::Config;
use crate::security::{StoredToken, TokenCipher};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const SESSION_VERSION: u32 = 1;

fn default_session_version() -> u32 {
    SESSION_VERSION
}

/// On-disk shape of `session.json`. The token is sealed when encryption is on.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSession {
    #[serde(default = "default_session_version")]
    version: u32,
    token: StoredToken,
    #[serde(default)]
    user: UserProfile,
    saved_at: DateTime<Utc>,
}

/// Persists the single active credential across runs.
pub struct SessionStore {
    path: PathBuf,
    cipher: TokenCipher,
    /// Off stores new tokens in plain text; sealed ones still open.
    encrypt: bool,
}

impl SessionStore {
    pub fn new(state_dir: &Path, encrypt: bool) -> Self {
        Self {
            path: state_dir.join("session.json"),
            cipher: TokenCipher::new(state_dir),
            encrypt,
        }
    }

    pub fn for_config(config: &Config) -> Self {
        Self {
            path: config.session_path(),
            cipher: TokenCipher::new(&config.state_dir),
            encrypt: config.secrets.encrypt,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<Credential>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session file: {}", self.path.display()))?;
        let persisted: PersistedSession = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session file: {}", self.path.display()))?;

        let token = self
            .cipher
            .open(&persisted.token, &account_binding(&persisted.user))
            .context("Failed to decrypt session token")?;
        if token.trim().is_empty() {
            return Ok(None);
        }

        debug!(saved_at = %persisted.saved_at, "loaded session");
        Ok(Some(Credential::new(token, persisted.user)))
    }

    pub fn save(&self, credential: &Credential) -> Result<()> {
        let persisted = PersistedSession {
            version: SESSION_VERSION,
            token: if self.encrypt {
                self.cipher
                    .seal(credential.token(), &account_binding(credential.user()))?
            } else {
                StoredToken::Plain(credential.token().to_string())
            },
            user: credential.user().clone(),
            saved_at: Utc::now(),
        };

        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create session directory: {}", parent.display())
        })?;

        let json = serde_json::to_string_pretty(&persisted)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write session file: {}", self.path.display()))?;
        Ok(())
    }

    /// Returns whether a session file was removed.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(error) => Err(error).with_context(|| {
                format!("Failed to remove session file: {}", self.path.display())
            }),
        }
    }

    /// A session file that fails to load counts as absent.
    pub fn is_present(&self) -> bool {
        matches!(self.load(), Ok(Some(_)))
    }
}

/// Associated data tying a sealed token to the profile saved beside it.
fn account_binding(user: &UserProfile) -> String {
    format!(
        "{}:{}",
        user.id.as_deref().unwrap_or_default(),
        user.email.as_deref().unwrap_or_default()
    )
}
