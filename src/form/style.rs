use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Academic writing style the generated introduction should follow.
///
/// The display form is the exact value sent as `selectedStyle`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum WritingStyle {
    #[default]
    #[serde(rename = "AOM writing style")]
    #[strum(serialize = "AOM writing style")]
    Aom,
    #[serde(rename = "Science Direct writing style")]
    #[strum(serialize = "Science Direct writing style")]
    ScienceDirect,
    #[serde(rename = "Journal of Marketing writing style")]
    #[strum(serialize = "Journal of Marketing writing style")]
    JournalOfMarketing,
    #[serde(rename = "Custom writing style")]
    #[strum(serialize = "Custom writing style")]
    Custom,
}

impl WritingStyle {
    pub fn requires_sample(self) -> bool {
        self == Self::Custom
    }

    /// Short CLI-friendly name (`aom`, `science-direct`, ...).
    pub fn slug(self) -> &'static str {
        match self {
            Self::Aom => "aom",
            Self::ScienceDirect => "science-direct",
            Self::JournalOfMarketing => "journal-of-marketing",
            Self::Custom => "custom",
        }
    }

    /// Accepts either the slug or the full display name.
    pub fn parse_loose(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        <Self as strum::IntoEnumIterator>::iter().find(|style| {
            style.slug().eq_ignore_ascii_case(trimmed)
                || style.to_string().eq_ignore_ascii_case(trimmed)
        })
    }
}
