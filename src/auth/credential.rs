use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl UserProfile {
    /// Reads `id`/`email`/`name` from a nested `user` object, else from the top level.
    pub fn from_value(body: &Value) -> Self {
        let source = body
            .get("user")
            .filter(|user| user.is_object())
            .unwrap_or(body);

        Self {
            id: source.get("id").and_then(scalar_to_string),
            email: source.get("email").and_then(non_empty_str),
            name: source.get("name").and_then(non_empty_str),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("unknown user")
    }
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        other => non_empty_str(other),
    }
}

/// An opaque bearer token plus whatever the auth backend said about the user.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    user: UserProfile,
}

impl Credential {
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// `None` when the body has no non-empty `token`.
    pub fn from_value(body: &Value) -> Option<Self> {
        let token = body.get("token").and_then(non_empty_str)?;
        Some(Self::new(token, UserProfile::from_value(body)))
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}
