use strum::Display;

/// Where the draft is in the accept/reject/revise lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DraftState {
    #[default]
    Empty,
    /// A draft awaiting the user's verdict.
    Proposed(String),
    /// The user rejected `rejected` and is writing revision instructions.
    AwaitingRevisionInput { rejected: String },
    /// The revised draft. Terminal.
    Final(String),
}

impl DraftState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Proposed(_) => "proposed",
            Self::AwaitingRevisionInput { .. } => "awaiting_revision_input",
            Self::Final(_) => "final",
        }
    }

    /// Text currently shown to the user, if any.
    pub fn draft(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Proposed(text) | Self::Final(text) => Some(text),
            Self::AwaitingRevisionInput { rejected } => Some(rejected),
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::Final(_))
    }
}

/// The one network action allowed to be pending at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum InFlight {
    Submitting,
    Accepting,
    Revising,
    RemovingFile,
}
