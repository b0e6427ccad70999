use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// `intro-writer` - draft research-paper introductions from a structured questionnaire.
#[derive(Parser, Debug)]
#[command(name = "intro-writer")]
#[command(version)]
#[command(about = "Draft research-paper introductions from a structured questionnaire.", long_about = None)]
pub struct Cli {
    /// Log at DEBUG level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session token
    Login {
        /// Account email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// Create an account and sign in
    Register {
        /// Account email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,

        /// Display name (prompted when omitted)
        #[arg(long)]
        name: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show configuration and session state
    Status,

    /// List the questionnaire fields and writing styles
    Fields,

    /// Fill the form, submit it and review the draft
    Write(WriteArgs),
}

#[derive(Args, Debug, Default)]
pub struct WriteArgs {
    /// Writing style: aom, science-direct, journal-of-marketing or custom
    #[arg(long)]
    pub style: Option<String>,

    /// TOML file of `fieldKey = "answer"` pairs (and optionally `style`)
    #[arg(long, value_name = "TOML")]
    pub answers: Option<PathBuf>,

    /// Theoretical framework document (repeatable)
    #[arg(long = "theoretical-framework", value_name = "PATH")]
    pub theoretical_framework: Vec<String>,

    /// Relevant theory document (repeatable)
    #[arg(long = "relevant-theory", value_name = "PATH")]
    pub relevant_theory: Vec<String>,

    /// Supporting literature document (repeatable)
    #[arg(long = "supporting-literature", value_name = "PATH")]
    pub supporting_literature: Vec<String>,

    /// Reject the draft and request these changes
    #[arg(long, conflicts_with = "accept")]
    pub revision: Option<String>,

    /// Accept the draft without prompting
    #[arg(long)]
    pub accept: bool,

    /// Never prompt; fail when required answers are missing
    #[arg(long)]
    pub no_input: bool,
}
