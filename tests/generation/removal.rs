use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use intro_writer::attachments::Bucket;
use intro_writer::workflow::REMOVE_FAILED_MESSAGE;

use super::service_harness::{bodies, filled_session, part_value, pdf};

#[tokio::test]
async fn confirmed_delete_removes_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get-introduction"))
        .and(body_string_contains("name=\"file\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"plan": "File deleted"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = filled_session(&server).with_remote_delete(true);
    session.add_attachments(Bucket::RelevantTheory, vec![pdf(Bucket::RelevantTheory, "theory.pdf")]);

    assert!(session
        .remove_attachment(Bucket::RelevantTheory, "theory.pdf")
        .await
        .unwrap());
    assert!(session.attachments().files(Bucket::RelevantTheory).is_empty());
    assert_eq!(part_value(&bodies(&server).await[0], "file"), Some("theory.pdf"));
    server.verify().await;
}

#[tokio::test]
async fn failed_delete_keeps_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut session = filled_session(&server).with_remote_delete(true);
    session.add_attachments(Bucket::RelevantTheory, vec![pdf(Bucket::RelevantTheory, "theory.pdf")]);

    let err = session
        .remove_attachment(Bucket::RelevantTheory, "theory.pdf")
        .await
        .unwrap_err();
    assert!(err.to_string().contains(REMOVE_FAILED_MESSAGE));
    assert!(session.attachments().contains(Bucket::RelevantTheory, "theory.pdf"));
}

#[tokio::test]
async fn local_removal_skips_the_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = filled_session(&server);
    session.add_attachments(Bucket::RelevantTheory, vec![pdf(Bucket::RelevantTheory, "theory.pdf")]);

    assert!(session
        .remove_attachment(Bucket::RelevantTheory, "theory.pdf")
        .await
        .unwrap());
    assert!(!session
        .remove_attachment(Bucket::RelevantTheory, "theory.pdf")
        .await
        .unwrap());
    server.verify().await;
}
