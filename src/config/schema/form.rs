use crate::form::{FieldDescriptor, WritingStyle, default_fields};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default)]
    pub default_style: WritingStyle,
    /// Questions asked by the form, in display order
    #[serde(default = "default_fields")]
    pub fields: Vec<FieldDescriptor>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_style: WritingStyle::default(),
            fields: default_fields(),
        }
    }
}
