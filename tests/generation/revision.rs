use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use intro_writer::WriterError;
use intro_writer::error::ValidationError;
use intro_writer::workflow::DraftState;

use super::service_harness::{bodies, filled_session, part_value};

async fn mount_submission(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/get-introduction"))
        .and(body_string_contains("name=\"selectedStyle\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"plan": "Draft text"})))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn reject_then_revise_produces_final_draft() {
    let server = MockServer::start().await;
    mount_submission(&server).await;
    Mock::given(method("POST"))
        .and(path("/get-introduction"))
        .and(body_string_contains("name=\"changes_recommended\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"plan": "Shorter draft"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = filled_session(&server);
    session.submit().await.unwrap();

    session.reject().unwrap();
    assert_eq!(bodies(&server).await.len(), 1, "reject is local");

    session.set_revision_instructions("Make it shorter");
    let final_draft = session.submit_revision().await.unwrap();

    assert_eq!(final_draft.as_deref(), Some("Shorter draft"));
    assert_eq!(session.state(), &DraftState::Final("Shorter draft".into()));
    assert_eq!(session.workflow().instructions(), "");

    let revision = &bodies(&server).await[1];
    assert_eq!(part_value(revision, "user_response"), Some("No"));
    assert_eq!(
        part_value(revision, "changes_recommended"),
        Some("Make it shorter")
    );
    server.verify().await;
}

#[tokio::test]
async fn blank_revision_never_reaches_the_service() {
    let server = MockServer::start().await;
    mount_submission(&server).await;

    let mut session = filled_session(&server);
    session.submit().await.unwrap();
    session.reject().unwrap();
    session.set_revision_instructions(" \t ");

    let err = session.submit_revision().await.unwrap_err();
    assert!(matches!(
        err,
        WriterError::Validation(ValidationError::MissingRevisionInstructions)
    ));
    assert!(session.workflow().revision_error());
    assert!(matches!(
        session.state(),
        DraftState::AwaitingRevisionInput { .. }
    ));
    server.verify().await;
}

#[tokio::test]
async fn failed_revision_keeps_instructions_for_retry() {
    let server = MockServer::start().await;
    mount_submission(&server).await;
    Mock::given(method("POST"))
        .and(body_string_contains("name=\"changes_recommended\""))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("name=\"changes_recommended\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"plan": "Shorter draft"})))
        .mount(&server)
        .await;

    let mut session = filled_session(&server);
    session.submit().await.unwrap();
    session.reject().unwrap();
    session.set_revision_instructions("Make it shorter");

    assert!(session.submit_revision().await.is_err());
    assert_eq!(session.workflow().instructions(), "Make it shorter");
    assert!(matches!(
        session.state(),
        DraftState::AwaitingRevisionInput { .. }
    ));

    let final_draft = session.submit_revision().await.unwrap();
    assert_eq!(final_draft.as_deref(), Some("Shorter draft"));
}

#[tokio::test]
async fn accepting_twice_sends_two_acknowledgments() {
    let server = MockServer::start().await;
    mount_submission(&server).await;
    Mock::given(method("POST"))
        .and(body_string_contains("name=\"user_response\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(2)
        .mount(&server)
        .await;

    let mut session = filled_session(&server);
    session.submit().await.unwrap();
    session.accept().await.unwrap();
    session.accept().await.unwrap();

    for body in &bodies(&server).await[1..] {
        assert_eq!(part_value(body, "user_response"), Some("Yes"));
    }
    assert_eq!(session.state(), &DraftState::Proposed("Draft text".into()));
    server.verify().await;
}

#[tokio::test]
async fn failed_acknowledgment_is_swallowed() {
    let server = MockServer::start().await;
    mount_submission(&server).await;
    Mock::given(method("POST"))
        .and(body_string_contains("name=\"user_response\""))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "down"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = filled_session(&server);
    session.submit().await.unwrap();

    session.accept().await.unwrap();
    assert_eq!(session.state(), &DraftState::Proposed("Draft text".into()));
    server.verify().await;
}
