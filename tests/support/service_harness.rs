#![allow(dead_code)]

use std::sync::Arc;

use intro_writer::attachments::{Attachment, AttachmentCollector, Bucket};
use intro_writer::auth::{Credential, UserProfile};
use intro_writer::client::HttpGenerationService;
use intro_writer::config::ServiceConfig;
use intro_writer::form::{FormState, WritingStyle, default_fields};
use intro_writer::workflow::FormSession;
use wiremock::MockServer;

pub const TOKEN: &str = "tok-123";

pub fn service_config(server: &MockServer) -> ServiceConfig {
    ServiceConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        connect_timeout_secs: 2,
        ..ServiceConfig::default()
    }
}

pub fn credential() -> Credential {
    Credential::new(
        TOKEN,
        UserProfile {
            id: Some("45".into()),
            email: Some("abc@abc.com".into()),
            name: Some("Ada".into()),
        },
    )
}

pub fn session_for(config: &ServiceConfig, style: WritingStyle) -> FormSession {
    let credential = credential();
    let service = Arc::new(HttpGenerationService::new(config, Some(&credential)));
    let mut session = FormSession::new(
        FormState::new(default_fields(), style),
        AttachmentCollector::default(),
        service,
    )
    .with_credential(credential);

    let form = session.form_mut();
    form.set_field("mainQuery", "Does remote work affect creativity?");
    form.set_field("background", "Hybrid work is now common.");
    form.set_field("significance", "Managers need evidence.");
    session
}

pub fn filled_session(server: &MockServer) -> FormSession {
    session_for(&service_config(server), WritingStyle::Aom)
}

pub fn pdf(bucket: Bucket, name: &str) -> Attachment {
    Attachment::from_bytes(bucket, name, "application/pdf", b"%PDF-1.4\nbody".to_vec())
}

/// Raw bodies of every request the server saw, in order.
pub async fn bodies(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .expect("mock server should record received requests")
        .iter()
        .map(|request| String::from_utf8_lossy(&request.body).into_owned())
        .collect()
}

/// Value of a multipart text part, if present.
pub fn part_value<'a>(body: &'a str, name: &str) -> Option<&'a str> {
    let marker = format!("name=\"{name}\"\r\n\r\n");
    let start = body.find(&marker)? + marker.len();
    let end = body[start..].find("\r\n")?;
    Some(&body[start..start + end])
}
