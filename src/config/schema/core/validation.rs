use super::Config;
use crate::error::ConfigError;
use crate::form::CUSTOM_STYLE_FIELD;
use std::collections::HashSet;

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = url::Url::parse(&self.service.base_url).map_err(|e| {
            ConfigError::Validation(format!(
                "service.base_url '{}' is not a valid URL: {e}",
                self.service.base_url
            ))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "service.base_url must use http or https, got '{}'",
                base.scheme()
            )));
        }

        let draft_path = self.service.draft_path.trim();
        if draft_path.is_empty() || draft_path.split('.').any(str::is_empty) {
            return Err(ConfigError::Validation(format!(
                "service.draft_path '{}' must be a dotted path like 'plan' or 'intro_outline.plan'",
                self.service.draft_path
            )));
        }

        if self.service.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "service.timeout_secs must be greater than zero".into(),
            ));
        }

        if self.attachments.max_file_size_mb == 0 {
            return Err(ConfigError::Validation(
                "attachments.max_file_size_mb must be greater than zero".into(),
            ));
        }

        let mut seen = HashSet::new();
        for field in &self.form.fields {
            let key = field.key.trim();
            if key.is_empty() {
                return Err(ConfigError::Validation(
                    "form.fields entries need a non-empty key".into(),
                ));
            }
            if !seen.insert(key) {
                return Err(ConfigError::Validation(format!(
                    "form.fields key '{key}' is listed more than once"
                )));
            }
        }
        if !seen.contains(CUSTOM_STYLE_FIELD) {
            return Err(ConfigError::Validation(format!(
                "form.fields must include '{CUSTOM_STYLE_FIELD}' for the custom writing style"
            )));
        }

        Ok(())
    }
}
