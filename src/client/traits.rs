use super::response::DraftReply;
use crate::attachments::Attachment;
use crate::error::TransportError;
use crate::form::WritingStyle;
use std::future::Future;
use std::pin::Pin;

/// Everything the initial generation request carries.
#[derive(Debug, Clone)]
pub struct Submission {
    /// Text fields in form order, already filtered for the selected style.
    pub fields: Vec<(String, String)>,
    pub style: WritingStyle,
    pub attachments: Vec<Attachment>,
}

/// One call to the generation endpoint.
#[derive(Debug, Clone)]
pub enum GenerationRequest {
    Submission(Submission),
    /// The user accepted the draft.
    Feedback,
    /// The user rejected the draft and described the changes they want.
    Revision { instructions: String },
    /// Ask the service to drop an uploaded file.
    DeleteFile { name: String },
}

impl GenerationRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Submission(_) => "submission",
            Self::Feedback => "feedback",
            Self::Revision { .. } => "revision",
            Self::DeleteFile { .. } => "delete_file",
        }
    }

    /// Text parts of the multipart body, in send order.
    pub fn text_parts(&self) -> Vec<(String, String)> {
        match self {
            Self::Submission(submission) => {
                let mut parts = submission.fields.clone();
                parts.push(("selectedStyle".into(), submission.style.to_string()));
                parts
            }
            Self::Feedback => vec![("user_response".into(), "Yes".into())],
            Self::Revision { instructions } => vec![
                ("user_response".into(), "No".into()),
                ("changes_recommended".into(), instructions.clone()),
            ],
            Self::DeleteFile { name } => vec![("file".into(), name.clone())],
        }
    }

    pub fn attachments(&self) -> &[Attachment] {
        match self {
            Self::Submission(submission) => &submission.attachments,
            _ => &[],
        }
    }
}

/// The remote text-generation service.
///
/// Implementations issue exactly one request per call and never retry.
pub trait GenerationService: Send + Sync {
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<DraftReply, TransportError>> + Send + 'a>>;
}
