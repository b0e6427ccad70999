use serde::{Deserialize, Serialize};

/// Where the generation and auth services live and how to talk to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL shared by the generation and auth endpoints
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Generation endpoint path (default: /get-introduction)
    #[serde(default = "default_generate_path")]
    pub generate_path: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_register_path")]
    pub register_path: String,
    /// Dotted path of the draft text inside a generation response, e.g. `intro_outline.plan`
    #[serde(default = "default_draft_path")]
    pub draft_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".into()
}

fn default_generate_path() -> String {
    "/get-introduction".into()
}

fn default_login_path() -> String {
    "/login".into()
}

fn default_register_path() -> String {
    "/register".into()
}

fn default_draft_path() -> String {
    "plan".into()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            generate_path: default_generate_path(),
            login_path: default_login_path(),
            register_path: default_register_path(),
            draft_path: default_draft_path(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl ServiceConfig {
    /// Join `path` onto the base URL without doubling or dropping slashes.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }

    pub fn generate_url(&self) -> String {
        self.endpoint(&self.generate_path)
    }

    pub fn login_url(&self) -> String {
        self.endpoint(&self.login_path)
    }

    pub fn register_url(&self) -> String {
        self.endpoint(&self.register_path)
    }
}
