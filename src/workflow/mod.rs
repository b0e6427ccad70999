pub mod machine;
pub mod session;
pub mod state;

pub use machine::{REVISION_FIELD, RevisionWorkflow};
pub use session::{FormSession, REMOVE_FAILED_MESSAGE};
pub use state::{DraftState, InFlight};
