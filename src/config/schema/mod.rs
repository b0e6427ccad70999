mod attachments;
mod core;
mod form;
mod service;

pub use attachments::{AcceptConfig, AttachmentsConfig};
pub use self::core::{Config, SecretsConfig};
pub use form::FormConfig;
pub use service::ServiceConfig;
