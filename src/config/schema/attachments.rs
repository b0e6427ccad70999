use crate::attachments::Bucket;
use serde::{Deserialize, Serialize};

const BYTES_PER_MB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentsConfig {
    /// Per-file size ceiling in MiB (default: 200)
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
    /// Ask the generation service to confirm before dropping an attachment
    #[serde(default)]
    pub confirm_remote_delete: bool,
    #[serde(default)]
    pub accept: AcceptConfig,
}

/// MIME patterns accepted per bucket. An empty list accepts every type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AcceptConfig {
    #[serde(default)]
    pub theoretical_framework: Vec<String>,
    #[serde(default)]
    pub relevant_theory: Vec<String>,
    #[serde(default)]
    pub supporting_literature: Vec<String>,
}

fn default_max_file_size_mb() -> u64 {
    200
}

impl Default for AttachmentsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: default_max_file_size_mb(),
            confirm_remote_delete: false,
            accept: AcceptConfig::default(),
        }
    }
}

impl AttachmentsConfig {
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(BYTES_PER_MB)
    }

    pub fn accept_for(&self, bucket: Bucket) -> &[String] {
        match bucket {
            Bucket::TheoreticalFramework => &self.accept.theoretical_framework,
            Bucket::RelevantTheory => &self.accept.relevant_theory,
            Bucket::SupportingLiterature => &self.accept.supporting_literature,
        }
    }
}
