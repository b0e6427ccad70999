use tempfile::TempDir;

use intro_writer::auth::{self, AuthGuard, GuardDecision, Route, SessionStore};

use super::service_harness::credential;

#[test]
fn guard_follows_the_stored_session() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path(), true);

    assert_eq!(AuthGuard::check(&store), GuardDecision::Redirect(Route::Login));

    store.save(&credential()).unwrap();
    assert_eq!(AuthGuard::check(&store), GuardDecision::Render(credential()));
    assert_eq!(
        AuthGuard::redirect_if_authenticated(&store),
        GuardDecision::Redirect(Route::Dashboard)
    );

    assert!(auth::logout(&store).unwrap());
    assert_eq!(AuthGuard::check(&store), GuardDecision::Redirect(Route::Login));
}

#[test]
fn session_survives_a_new_store_instance() {
    let dir = TempDir::new().unwrap();
    SessionStore::new(dir.path(), true)
        .save(&credential())
        .unwrap();

    let reopened = SessionStore::new(dir.path(), true);
    assert_eq!(AuthGuard::check(&reopened), GuardDecision::Render(credential()));
}
