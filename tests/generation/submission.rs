use serde_json::json;
use wiremock::matchers::{header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use intro_writer::WriterError;
use intro_writer::attachments::{Bucket, load_candidate};
use intro_writer::config::ServiceConfig;
use intro_writer::error::{TransportError, ValidationError};
use intro_writer::form::WritingStyle;
use intro_writer::workflow::DraftState;

use super::service_harness::{
    TOKEN, bodies, filled_session, part_value, pdf, service_config, session_for,
};

#[tokio::test]
async fn submission_carries_fields_style_and_files_in_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get-introduction"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .and(header_regex("content-type", "^multipart/form-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"plan": "Draft text"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = filled_session(&server);
    session.add_attachments(
        Bucket::TheoreticalFramework,
        vec![pdf(Bucket::TheoreticalFramework, "framework.pdf")],
    );
    session.add_attachments(
        Bucket::SupportingLiterature,
        vec![
            pdf(Bucket::SupportingLiterature, "lit-a.pdf"),
            pdf(Bucket::SupportingLiterature, "lit-b.pdf"),
        ],
    );

    let draft = session.submit().await.unwrap();
    assert_eq!(draft.as_deref(), Some("Draft text"));
    assert_eq!(session.state(), &DraftState::Proposed("Draft text".into()));

    let bodies = bodies(&server).await;
    let body = &bodies[0];
    assert_eq!(
        part_value(body, "mainQuery"),
        Some("Does remote work affect creativity?")
    );
    assert_eq!(part_value(body, "selectedStyle"), Some("AOM writing style"));
    assert_eq!(part_value(body, "user_id"), Some("45"));
    assert_eq!(part_value(body, "user_email"), Some("abc@abc.com"));
    assert!(part_value(body, "customStyleDetails").is_none());

    assert!(body.contains("name=\"theoreticalFrameworkFiles\""));
    assert!(body.contains("filename=\"framework.pdf\""));
    assert_eq!(body.matches("name=\"supportingLiteratureFiles\"").count(), 2);
    assert!(!body.contains("name=\"relevantTheoryFiles\""));

    server.verify().await;
}

#[tokio::test]
async fn file_attachment_is_uploaded_from_disk() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get-introduction"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"plan": "Draft text"})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("theory.pdf");
    std::fs::write(&file, b"%PDF-1.4\nstreamed theory").unwrap();
    let candidate = load_candidate(Bucket::RelevantTheory, file.to_str().unwrap())
        .await
        .unwrap();

    let mut session = filled_session(&server);
    session.add_attachments(Bucket::RelevantTheory, vec![candidate]);
    session.submit().await.unwrap();

    let body = &bodies(&server).await[0];
    assert!(body.contains("name=\"relevantTheoryFiles\"; filename=\"theory.pdf\""));
    assert!(body.to_ascii_lowercase().contains("content-type: application/pdf"));
    assert!(body.contains("%PDF-1.4\nstreamed theory"));
    server.verify().await;
}

#[tokio::test]
async fn custom_style_sends_the_sample() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get-introduction"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"plan": "Draft text"})))
        .mount(&server)
        .await;

    let mut session = session_for(&service_config(&server), WritingStyle::Custom);
    session
        .form_mut()
        .set_field("customStyleDetails", "Open with a vivid anecdote.");
    session.submit().await.unwrap();

    let body = &bodies(&server).await[0];
    assert_eq!(
        part_value(body, "customStyleDetails"),
        Some("Open with a vivid anecdote.")
    );
    assert_eq!(part_value(body, "selectedStyle"), Some("Custom writing style"));
}

#[tokio::test]
async fn invalid_form_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = session_for(&service_config(&server), WritingStyle::Custom);
    session.form_mut().set_field("mainQuery", "   ");

    let err = session.submit().await.unwrap_err();
    match err {
        WriterError::Validation(ValidationError::MissingFields { keys, focus }) => {
            assert_eq!(focus, "mainQuery");
            assert!(keys.contains(&"customStyleDetails".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(session.form().has_error("mainQuery"));
    server.verify().await;
}

#[tokio::test]
async fn server_message_is_surfaced_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get-introduction"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"message": "Model is overloaded"})),
        )
        .mount(&server)
        .await;

    let mut session = filled_session(&server);
    let err = session.submit().await.unwrap_err();

    match err {
        WriterError::Transport(TransportError::Status { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "Model is overloaded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(session.state(), &DraftState::Empty);
}

#[tokio::test]
async fn non_json_failure_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad gateway"))
        .mount(&server)
        .await;

    let mut session = filled_session(&server);
    let err = session.submit().await.unwrap_err();
    let WriterError::Transport(transport) = err else {
        panic!("expected transport error");
    };
    assert_eq!(
        transport.user_message(),
        "An error occurred while submitting the form."
    );
}

#[tokio::test]
async fn missing_plan_leaves_state_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "queued"})))
        .mount(&server)
        .await;

    let mut session = filled_session(&server);
    assert_eq!(session.submit().await.unwrap(), None);
    assert_eq!(session.state(), &DraftState::Empty);
}

#[tokio::test]
async fn nested_draft_path_is_configurable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"intro_outline": {"plan": "Nested draft"}})),
        )
        .mount(&server)
        .await;

    let config = ServiceConfig {
        draft_path: "intro_outline.plan".into(),
        ..service_config(&server)
    };
    let mut session = session_for(&config, WritingStyle::JournalOfMarketing);
    assert_eq!(
        session.submit().await.unwrap().as_deref(),
        Some("Nested draft")
    );
}

#[tokio::test]
async fn unreachable_service_reports_generic_message() {
    let config = ServiceConfig {
        base_url: "http://127.0.0.1:9".into(),
        timeout_secs: 2,
        connect_timeout_secs: 1,
        ..ServiceConfig::default()
    };
    let mut session = session_for(&config, WritingStyle::Aom);

    let err = session.submit().await.unwrap_err();
    let WriterError::Transport(TransportError::Request { message }) = err else {
        panic!("expected request error");
    };
    assert_eq!(message, "An error occurred while submitting the form.");
    assert!(session.workflow().in_flight().is_none());
}
