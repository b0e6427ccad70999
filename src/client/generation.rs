use super::http_client::build_service_client;
use super::response::{DraftPath, DraftReply, error_message};
use super::traits::{GenerationRequest, GenerationService};
use crate::attachments::{Attachment, AttachmentData};
use crate::auth::Credential;
use crate::config::ServiceConfig;
use crate::error::TransportError;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, info, warn};

pub const SUBMIT_FALLBACK_MESSAGE: &str = "An error occurred while submitting the form.";

/// Multipart client for the `get-introduction` endpoint.
pub struct HttpGenerationService {
    url: String,
    draft_path: DraftPath,
    /// Pre-computed `Authorization` header value.
    bearer: Option<String>,
    client: Client,
}

impl HttpGenerationService {
    pub fn new(config: &ServiceConfig, credential: Option<&Credential>) -> Self {
        Self::with_client(config, credential, build_service_client(config))
    }

    pub fn with_client(
        config: &ServiceConfig,
        credential: Option<&Credential>,
        client: Client,
    ) -> Self {
        Self {
            url: config.generate_url(),
            draft_path: DraftPath::parse(&config.draft_path),
            bearer: credential.map(|c| format!("Bearer {}", c.token())),
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn build_form(request: &GenerationRequest) -> Result<Form, TransportError> {
        let mut form = Form::new();
        for (key, value) in request.text_parts() {
            form = form.text(key, value);
        }

        for attachment in request.attachments() {
            let part = attachment_part(attachment).await?;
            form = form.part(attachment.bucket.field_name(), part);
        }

        Ok(form)
    }

    async fn send(&self, request: &GenerationRequest) -> Result<DraftReply, TransportError> {
        let form = Self::build_form(request).await?;
        debug!(
            kind = request.kind(),
            attachments = request.attachments().len(),
            "sending generation request"
        );

        let mut builder = self.client.post(&self.url).multipart(form);
        if let Some(bearer) = &self.bearer {
            builder = builder.header(AUTHORIZATION, bearer);
        }

        let response = builder.send().await.map_err(|error| {
            warn!(kind = request.kind(), endpoint = %self.url, %error, "generation request failed");
            TransportError::Request {
                message: SUBMIT_FALLBACK_MESSAGE.into(),
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|error| {
            warn!(kind = request.kind(), %error, "failed to read generation response body");
            TransportError::Request {
                message: SUBMIT_FALLBACK_MESSAGE.into(),
            }
        })?;

        if !status.is_success() {
            let message = error_message(&body, SUBMIT_FALLBACK_MESSAGE);
            warn!(kind = request.kind(), status = status.as_u16(), %message, "generation service returned an error");
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let reply = DraftReply::from_body(&body, &self.draft_path);
        info!(
            kind = request.kind(),
            status = status.as_u16(),
            has_draft = reply.draft.is_some(),
            "generation request complete"
        );
        Ok(reply)
    }
}

/// File-backed attachments are streamed from disk rather than buffered.
async fn attachment_part(attachment: &Attachment) -> Result<Part, TransportError> {
    let part = match &attachment.data {
        AttachmentData::Bytes(bytes) => Part::bytes(bytes.to_vec()),
        AttachmentData::File(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .map_err(|error| TransportError::Request {
                    message: format!("Failed to read attachment {}: {error}", attachment.name),
                })?;
            Part::stream_with_length(file, attachment.size)
        }
    };
    let part = part.file_name(attachment.name.clone());

    if attachment.mime_type.parse::<mime::Mime>().is_err() {
        warn!(file = %attachment.name, mime = %attachment.mime_type, "invalid attachment MIME type; sending without one");
        return Ok(part);
    }
    part.mime_str(&attachment.mime_type)
        .map_err(|error| TransportError::Request {
            message: format!("Invalid MIME type for {}: {error}", attachment.name),
        })
}

impl GenerationService for HttpGenerationService {
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<DraftReply, TransportError>> + Send + 'a>> {
        Box::pin(self.send(request))
    }
}
