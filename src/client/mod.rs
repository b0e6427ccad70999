//! HTTP glue for the generation and auth services.

pub mod auth_api;
pub mod generation;
pub mod http_client;
pub mod response;
pub mod scrub;
pub mod traits;

pub use auth_api::{AuthApi, RegisterRequest};
pub use generation::HttpGenerationService;
pub use http_client::build_service_client;
pub use response::{DraftPath, DraftReply};
pub use traits::{GenerationRequest, GenerationService, Submission};
