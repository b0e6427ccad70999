pub mod schema;

pub use schema::{AcceptConfig, AttachmentsConfig, Config, FormConfig, SecretsConfig, ServiceConfig};
