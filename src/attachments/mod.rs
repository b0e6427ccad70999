//! Supporting documents grouped into the three named buckets.

pub mod collector;
pub mod detection;
pub mod types;

pub use collector::{AddOutcome, AttachmentCollector, AttachmentPolicy, Rejection};
pub use detection::{detect_media_type, load_candidate};
pub use types::{Attachment, AttachmentData, Bucket, RejectReason};
