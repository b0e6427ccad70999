//! Form answers, writing-style selection and required-field validation.

pub mod fields;
pub mod state;
pub mod style;

pub use fields::{CUSTOM_STYLE_FIELD, FieldDescriptor, default_fields};
pub use state::{FormState, Validation};
pub use style::WritingStyle;
