pub mod dispatch;
pub mod status;
pub mod write;

pub use dispatch::dispatch;
