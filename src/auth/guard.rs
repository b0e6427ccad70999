use super::credential::Credential;
use super::store::SessionStore;
use strum::Display;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Route {
    Landing,
    Login,
    Register,
    Dashboard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render(Credential),
    Redirect(Route),
    /// Only produced by [`AuthGuard::redirect_if_authenticated`].
    Proceed,
}

/// Evaluated once per command; a token revoked server-side is only noticed
/// on the next invocation.
pub struct AuthGuard;

impl AuthGuard {
    /// Gate for the form: render with the stored credential, or go to login.
    pub fn check(store: &SessionStore) -> GuardDecision {
        match load(store) {
            Some(credential) => {
                debug!(user = credential.user().display_name(), "guard: render");
                GuardDecision::Render(credential)
            }
            None => {
                debug!(route = %Route::Login, "guard: redirect");
                GuardDecision::Redirect(Route::Login)
            }
        }
    }

    /// Gate for the login/register views: a signed-in user goes to the dashboard.
    pub fn redirect_if_authenticated(store: &SessionStore) -> GuardDecision {
        if load(store).is_some() {
            GuardDecision::Redirect(Route::Dashboard)
        } else {
            GuardDecision::Proceed
        }
    }
}

fn load(store: &SessionStore) -> Option<Credential> {
    store.load().unwrap_or_else(|error| {
        warn!(%error, "ignoring unreadable session");
        None
    })
}
