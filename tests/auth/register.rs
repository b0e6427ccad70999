use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use intro_writer::WriterError;
use intro_writer::auth::{self, SessionStore};
use intro_writer::client::{AuthApi, RegisterRequest};
use intro_writer::error::AuthError;

use super::service_harness::service_config;

fn request(confirm: &str) -> RegisterRequest {
    RegisterRequest {
        email: "ada@example.com".into(),
        password: "secret".into(),
        name: "Ada".into(),
        confirm_password: confirm.into(),
    }
}

#[tokio::test]
async fn register_sends_all_fields_and_signs_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .and(body_json(json!({
            "email": "ada@example.com",
            "password": "secret",
            "name": "Ada",
            "confirm_password": "secret"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": "tok-new",
            "id": "u-9",
            "email": "ada@example.com",
            "name": "Ada"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path(), true);
    let api = AuthApi::new(&service_config(&server));

    let credential = auth::register(&api, &store, &request("secret"))
        .await
        .unwrap();
    assert_eq!(credential.user().display_name(), "Ada");
    assert_eq!(store.load().unwrap().unwrap().token(), "tok-new");
    server.verify().await;
}

#[tokio::test]
async fn mismatched_passwords_fail_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path(), true);
    let api = AuthApi::new(&service_config(&server));

    let err = auth::register(&api, &store, &request("different"))
        .await
        .unwrap_err();
    assert!(matches!(err, WriterError::Auth(AuthError::PasswordMismatch)));
    server.verify().await;
}

#[tokio::test]
async fn validation_failure_uses_registration_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "errors": {"email": ["The email has already been taken."]}
        })))
        .mount(&server)
        .await;

    let api = AuthApi::new(&service_config(&server));
    let err = api.register(&request("secret")).await.unwrap_err();
    match err {
        WriterError::Auth(AuthError::Rejected {
            message,
            field_errors,
        }) => {
            assert_eq!(
                message,
                "An error occurred while registration. Please use valid data."
            );
            assert_eq!(field_errors["email"], "The email has already been taken.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
