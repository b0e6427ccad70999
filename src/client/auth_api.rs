use super::http_client::build_service_client;
use super::response::{error_message, field_errors};
use crate::auth::Credential;
use crate::config::ServiceConfig;
use crate::error::{AuthError, Result, TransportError};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{info, warn};

pub const LOGIN_FALLBACK_MESSAGE: &str =
    "An error occurred while logging in. Please use valid credentials.";
pub const REGISTER_FALLBACK_MESSAGE: &str =
    "An error occurred while registration. Please use valid data.";

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub confirm_password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// JSON client for the login and register endpoints.
pub struct AuthApi {
    login_url: String,
    register_url: String,
    client: Client,
}

impl AuthApi {
    pub fn new(config: &ServiceConfig) -> Self {
        Self::with_client(config, build_service_client(config))
    }

    pub fn with_client(config: &ServiceConfig, client: Client) -> Self {
        Self {
            login_url: config.login_url(),
            register_url: config.register_url(),
            client,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Credential> {
        let body = LoginBody { email, password };
        self.post(&self.login_url, &body, LOGIN_FALLBACK_MESSAGE)
            .await
    }

    /// Fails with [`AuthError::PasswordMismatch`] before any I/O when the
    /// confirmation differs.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Credential> {
        if request.password != request.confirm_password {
            return Err(AuthError::PasswordMismatch.into());
        }
        self.post(&self.register_url, request, REGISTER_FALLBACK_MESSAGE)
            .await
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        fallback: &str,
    ) -> Result<Credential> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|error| {
                warn!(endpoint = url, %error, "auth request failed");
                rejected(fallback.to_string(), BTreeMap::new())
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|error| {
            warn!(endpoint = url, %error, "failed to read auth response body");
            rejected(fallback.to_string(), BTreeMap::new())
        })?;

        if !status.is_success() {
            warn!(endpoint = url, status = status.as_u16(), "auth request rejected");
            return Err(rejected(error_message(&text, fallback), field_errors(&text)));
        }

        let value: Value = serde_json::from_str(&text)
            .map_err(|error| TransportError::Decode(format!("auth response: {error}")))?;
        let credential = Credential::from_value(&value)
            .ok_or_else(|| TransportError::Decode("auth response has no token".into()))?;

        info!(endpoint = url, status = status.as_u16(), "authenticated");
        Ok(credential)
    }
}

fn rejected(
    message: String,
    field_errors: BTreeMap<String, String>,
) -> crate::error::WriterError {
    AuthError::Rejected {
        message,
        field_errors,
    }
    .into()
}
