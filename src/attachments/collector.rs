use super::types::{Attachment, Bucket, RejectReason};
use crate::config::AttachmentsConfig;
use crate::error::ValidationError;
use std::collections::BTreeMap;
use tracing::debug;

/// Characters a file name must not contain.
const FORBIDDEN_NAME_CHARS: [char; 6] = [',', '\'', '"', '`', '\\', '/'];

const DEFAULT_MAX_SIZE_BYTES: u64 = 200 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AttachmentPolicy {
    pub max_size_bytes: u64,
    /// MIME patterns per bucket (`application/pdf`, `image/*`); missing or empty accepts all.
    pub accept: BTreeMap<Bucket, Vec<String>>,
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            accept: BTreeMap::new(),
        }
    }
}

impl AttachmentPolicy {
    pub fn from_config(config: &AttachmentsConfig) -> Self {
        let accept = Bucket::ALL
            .into_iter()
            .map(|bucket| (bucket, config.accept_for(bucket).to_vec()))
            .filter(|(_, patterns)| !patterns.is_empty())
            .collect();
        Self {
            max_size_bytes: config.max_file_size_bytes(),
            accept,
        }
    }

    fn accepts_type(&self, bucket: Bucket, mime_type: &str) -> bool {
        match self.accept.get(&bucket) {
            None => true,
            Some(patterns) if patterns.is_empty() => true,
            Some(patterns) => patterns.iter().any(|p| mime_matches(p, mime_type)),
        }
    }
}

fn mime_matches(pattern: &str, mime_type: &str) -> bool {
    let (Ok(pattern), Ok(actual)) = (
        pattern.trim().parse::<mime::Mime>(),
        mime_type.trim().parse::<mime::Mime>(),
    ) else {
        return false;
    };
    pattern.type_() == actual.type_()
        && (pattern.subtype() == mime::STAR || pattern.subtype() == actual.subtype())
}

pub fn is_valid_file_name(name: &str) -> bool {
    !name.contains(FORBIDDEN_NAME_CHARS)
}

#[derive(Debug, Clone)]
pub struct Rejection {
    pub file: Attachment,
    pub reason: RejectReason,
}

impl Rejection {
    pub fn message(&self) -> String {
        self.reason.message(&self.file.name)
    }

    pub fn to_error(&self) -> ValidationError {
        ValidationError::AttachmentRejected {
            name: self.file.name.clone(),
            reason: self.message(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AddOutcome {
    pub accepted: Vec<Attachment>,
    pub rejected: Vec<Rejection>,
}

/// Files grouped by bucket, each bucket keeping arrival order.
#[derive(Debug, Clone, Default)]
pub struct AttachmentCollector {
    policy: AttachmentPolicy,
    buckets: BTreeMap<Bucket, Vec<Attachment>>,
}

impl AttachmentCollector {
    pub fn new(policy: AttachmentPolicy) -> Self {
        Self {
            policy,
            buckets: BTreeMap::new(),
        }
    }

    pub fn policy(&self) -> &AttachmentPolicy {
        &self.policy
    }

    /// Validate each candidate (duplicate, size, name, type; first failure wins)
    /// and append the accepted ones to `bucket`.
    pub fn add(&mut self, bucket: Bucket, candidates: Vec<Attachment>) -> AddOutcome {
        let mut outcome = AddOutcome::default();

        for mut file in candidates {
            file.bucket = bucket;
            match self.check(bucket, &file) {
                Some(reason) => {
                    debug!(bucket = %bucket, file = %file.name, ?reason, "attachment rejected");
                    outcome.rejected.push(Rejection { file, reason });
                }
                None => {
                    self.buckets.entry(bucket).or_default().push(file.clone());
                    outcome.accepted.push(file);
                }
            }
        }

        outcome
    }

    fn check(&self, bucket: Bucket, file: &Attachment) -> Option<RejectReason> {
        if self.contains(bucket, &file.name) {
            return Some(RejectReason::Duplicate);
        }
        if file.size > self.policy.max_size_bytes {
            return Some(RejectReason::TooLarge {
                limit_bytes: self.policy.max_size_bytes,
            });
        }
        if !is_valid_file_name(&file.name) {
            return Some(RejectReason::InvalidName);
        }
        if !self.policy.accepts_type(bucket, &file.mime_type) {
            return Some(RejectReason::UnsupportedType {
                mime_type: file.mime_type.clone(),
            });
        }
        None
    }

    /// Remove the file called `name`; returns whether anything was removed.
    pub fn remove(&mut self, bucket: Bucket, name: &str) -> bool {
        let Some(files) = self.buckets.get_mut(&bucket) else {
            return false;
        };
        let before = files.len();
        files.retain(|file| file.name != name);
        before != files.len()
    }

    pub fn contains(&self, bucket: Bucket, name: &str) -> bool {
        self.files(bucket).iter().any(|file| file.name == name)
    }

    pub fn files(&self, bucket: Bucket) -> &[Attachment] {
        self.buckets.get(&bucket).map_or(&[], Vec::as_slice)
    }

    /// Every attachment, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = &Attachment> {
        Bucket::ALL
            .into_iter()
            .flat_map(move |bucket| self.files(bucket).iter())
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
