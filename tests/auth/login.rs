use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use intro_writer::WriterError;
use intro_writer::auth::{self, SessionStore};
use intro_writer::client::AuthApi;
use intro_writer::error::{AuthError, TransportError};

use super::service_harness::service_config;

#[tokio::test]
async fn login_persists_credential() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"email": "ada@example.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-login",
            "user": {"id": 1, "email": "ada@example.com", "name": "Ada"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path(), true);
    let api = AuthApi::new(&service_config(&server));

    let credential = auth::login(&api, &store, " ada@example.com ", "secret")
        .await
        .unwrap();
    assert_eq!(credential.token(), "tok-login");
    assert_eq!(credential.user().id.as_deref(), Some("1"));

    let stored = store.load().unwrap().unwrap();
    assert_eq!(stored, credential);
    server.verify().await;
}

#[tokio::test]
async fn rejected_login_reports_server_message_and_field_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid credentials",
            "errors": {"email": ["No account for this email"]}
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path(), true);
    let api = AuthApi::new(&service_config(&server));

    let err = auth::login(&api, &store, "ada@example.com", "wrong")
        .await
        .unwrap_err();
    match err {
        WriterError::Auth(AuthError::Rejected {
            message,
            field_errors,
        }) => {
            assert_eq!(message, "Invalid credentials");
            assert_eq!(field_errors["email"], "No account for this email");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn opaque_failure_uses_login_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let api = AuthApi::new(&service_config(&server));
    let err = api.login("ada@example.com", "secret").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "auth: An error occurred while logging in. Please use valid credentials."
    );
}

#[tokio::test]
async fn success_without_token_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"email": "ada@example.com"})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path(), true);
    let api = AuthApi::new(&service_config(&server));

    let err = auth::login(&api, &store, "ada@example.com", "secret")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WriterError::Transport(TransportError::Decode(_))
    ));
    assert!(!store.is_present());
}
