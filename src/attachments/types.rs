use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use strum::{Display, EnumIter};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Bucket {
    TheoreticalFramework,
    RelevantTheory,
    SupportingLiterature,
}

impl Bucket {
    pub const ALL: [Self; 3] = [
        Self::TheoreticalFramework,
        Self::RelevantTheory,
        Self::SupportingLiterature,
    ];

    /// Multipart field name the generation service expects for this bucket.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::TheoreticalFramework => "theoreticalFrameworkFiles",
            Self::RelevantTheory => "relevantTheoryFiles",
            Self::SupportingLiterature => "supportingLiteratureFiles",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::TheoreticalFramework => "Theoretical Framework",
            Self::RelevantTheory => "Relevant Theory",
            Self::SupportingLiterature => "Supporting Literature",
        }
    }
}

/// Where an attachment's bytes live until upload.
#[derive(Debug, Clone)]
pub enum AttachmentData {
    Bytes(Arc<[u8]>),
    File(PathBuf),
}

/// A selected file; `bucket` is fixed once it is accepted into a collector.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub bucket: Bucket,
    pub data: AttachmentData,
}

impl Attachment {
    pub fn from_bytes(bucket: Bucket, name: &str, mime_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            size: bytes.len() as u64,
            mime_type: mime_type.to_string(),
            bucket,
            data: AttachmentData::Bytes(bytes.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    Duplicate,
    TooLarge { limit_bytes: u64 },
    InvalidName,
    UnsupportedType { mime_type: String },
}

impl RejectReason {
    pub fn message(&self, file_name: &str) -> String {
        match self {
            Self::Duplicate => format!("File {file_name} has already been uploaded."),
            Self::TooLarge { limit_bytes } => format!(
                "File {file_name} exceeds the size limit of {}MB.",
                limit_bytes / (1024 * 1024)
            ),
            Self::InvalidName => format!(
                "File {file_name} contains invalid characters (commas, apostrophes, inverted commas, or slashes)."
            ),
            Self::UnsupportedType { mime_type } => {
                format!("File {file_name} has an unsupported type ({mime_type}).")
            }
        }
    }
}
