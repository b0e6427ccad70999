//! Sign-in, registration and the stored session.

pub mod credential;
pub mod guard;
pub mod store;

pub use credential::{Credential, UserProfile};
pub use guard::{AuthGuard, GuardDecision, Route};
pub use store::SessionStore;

use crate::client::{AuthApi, RegisterRequest};
use crate::error::{AuthError, Result};
use tracing::info;

/// Sign in and persist the returned credential.
pub async fn login(
    api: &AuthApi,
    store: &SessionStore,
    email: &str,
    password: &str,
) -> Result<Credential> {
    let credential = api.login(email.trim(), password).await?;
    persist(store, &credential)?;
    info!(user = credential.user().display_name(), "signed in");
    Ok(credential)
}

/// Create an account and persist the returned credential.
pub async fn register(
    api: &AuthApi,
    store: &SessionStore,
    request: &RegisterRequest,
) -> Result<Credential> {
    let credential = api.register(request).await?;
    persist(store, &credential)?;
    info!(user = credential.user().display_name(), "registered");
    Ok(credential)
}

/// Drop the stored credential. Returns whether one existed.
pub fn logout(store: &SessionStore) -> Result<bool> {
    let removed = store
        .clear()
        .map_err(|error| AuthError::Store(format!("{error:#}")))?;
    info!(removed, "signed out");
    Ok(removed)
}

/// The stored credential, or [`AuthError::NotAuthenticated`].
pub fn require(store: &SessionStore) -> Result<Credential> {
    match AuthGuard::check(store) {
        GuardDecision::Render(credential) => Ok(credential),
        GuardDecision::Redirect(_) | GuardDecision::Proceed => {
            Err(AuthError::NotAuthenticated.into())
        }
    }
}

fn persist(store: &SessionStore, credential: &Credential) -> Result<()> {
    store
        .save(credential)
        .map_err(|error| AuthError::Store(format!("{error:#}")).into())
}
