use super::fields::{CUSTOM_STYLE_FIELD, FieldDescriptor};
use super::style::WritingStyle;
use crate::error::ValidationError;
use std::collections::BTreeSet;

/// Result of a validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub errors: BTreeSet<String>,
    /// First invalid key in required-field order; the field that should receive focus.
    pub focus: Option<String>,
}

impl Validation {
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self.focus {
            None => Ok(()),
            Some(focus) => Err(ValidationError::MissingFields {
                keys: self.errors.into_iter().collect(),
                focus,
            }),
        }
    }
}

/// Answers typed into the form plus the selected writing style.
///
/// Errors are only recomputed by [`FormState::validate`]; editing a field
/// clears that field's error and nothing else.
#[derive(Debug, Clone)]
pub struct FormState {
    descriptors: Vec<FieldDescriptor>,
    values: Vec<(String, String)>,
    style: WritingStyle,
    errors: BTreeSet<String>,
}

impl FormState {
    pub fn new(descriptors: Vec<FieldDescriptor>, style: WritingStyle) -> Self {
        let values = descriptors
            .iter()
            .map(|field| (field.key.clone(), String::new()))
            .collect();
        Self {
            descriptors,
            values,
            style,
            errors: BTreeSet::new(),
        }
    }

    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    pub fn style(&self) -> WritingStyle {
        self.style
    }

    pub fn set_style(&mut self, style: WritingStyle) {
        self.style = style;
    }

    pub fn set_field(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.values.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => *slot = value,
            None => self.values.push((key.to_string(), value)),
        }
        self.errors.remove(key);
    }

    pub fn field(&self, key: &str) -> &str {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map_or("", |(_, v)| v.as_str())
    }

    pub fn errors(&self) -> &BTreeSet<String> {
        &self.errors
    }

    pub fn has_error(&self, key: &str) -> bool {
        self.errors.contains(key)
    }

    /// Required keys in focus order; the custom sample goes last and only for the custom style.
    pub fn required_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .descriptors
            .iter()
            .filter(|field| field.required && !field.is_custom_style())
            .map(|field| field.key.clone())
            .collect();
        if self.style.requires_sample() {
            keys.push(CUSTOM_STYLE_FIELD.to_string());
        }
        keys
    }

    /// Replace the error set with the empty-after-trim keys among `required_keys`.
    pub fn validate(&mut self, required_keys: &[String]) -> Validation {
        let errors: BTreeSet<String> = required_keys
            .iter()
            .filter(|key| self.field(key).trim().is_empty())
            .cloned()
            .collect();
        let focus = required_keys
            .iter()
            .find(|key| errors.contains(*key))
            .cloned();
        self.errors.clone_from(&errors);

        Validation {
            valid: errors.is_empty(),
            errors,
            focus,
        }
    }

    pub fn validate_for_submit(&mut self) -> Validation {
        let required = self.required_keys();
        self.validate(&required)
    }

    /// Text parts for the outbound request, in field order.
    pub fn payload_fields(&self) -> Vec<(String, String)> {
        let include_sample = self.style.requires_sample();
        self.values
            .iter()
            .filter(|(key, _)| include_sample || key != CUSTOM_STYLE_FIELD)
            .cloned()
            .collect()
    }
}
