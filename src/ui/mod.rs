pub mod prompts;
pub mod style;
