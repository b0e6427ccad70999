use std::collections::BTreeMap;

use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `intro-writer`.
///
/// Validation errors are always recovered locally and never reach the network
/// layer. Transport errors are terminal for the single operation that produced
/// them; nothing in the crate retries.
#[derive(Debug, Error)]
pub enum WriterError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Local validation ────────────────────────────────────────────────
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),

    // ── Network / HTTP ──────────────────────────────────────────────────
    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    // ── Authentication ──────────────────────────────────────────────────
    #[error("auth: {0}")]
    Auth(#[from] AuthError),

    // ── Draft workflow ──────────────────────────────────────────────────
    #[error("workflow: {0}")]
    Workflow(#[from] WorkflowError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Validation errors ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `focus` is the first invalid key in required-field order.
    #[error("required fields are empty: {}", keys.join(", "))]
    MissingFields { keys: Vec<String>, focus: String },

    #[error("revision instructions are required")]
    MissingRevisionInstructions,

    #[error("{name}: {reason}")]
    AttachmentRejected { name: String, reason: String },
}

// ─── Transport errors ───────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{message}")]
    Request { message: String },

    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    #[error("response decode failed: {0}")]
    Decode(String),
}

impl TransportError {
    /// The message meant for the person at the keyboard.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Request { message } | Self::Status { message, .. } | Self::Decode(message) => {
                message
            }
        }
    }
}

// ─── Auth errors ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not signed in; run `intro-writer login` first")]
    NotAuthenticated,

    #[error("password and confirmation do not match")]
    PasswordMismatch,

    #[error("{message}")]
    Rejected {
        message: String,
        field_errors: BTreeMap<String, String>,
    },

    #[error("session store: {0}")]
    Store(String),
}

// ─── Workflow errors ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("another action is already in flight: {in_flight}")]
    Busy { in_flight: String },

    #[error("cannot {action} while draft is {state}")]
    InvalidTransition { action: String, state: String },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, WriterError>;
