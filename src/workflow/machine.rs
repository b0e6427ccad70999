//! Sans-IO draft lifecycle.
//!
//! Every network-backed action is split into a `begin_*` call, which checks
//! the transition and claims the single in-flight slot, and a `complete_*` or
//! [`RevisionWorkflow::fail`] call once the response is in. The async driver
//! lives in [`super::session`].

use super::state::{DraftState, InFlight};
use crate::error::{Result, ValidationError, WorkflowError};
use tracing::{info, warn};

/// Focus target reported when revision instructions are missing.
pub const REVISION_FIELD: &str = "changes_recommended";

#[derive(Debug, Clone, Default)]
pub struct RevisionWorkflow {
    state: DraftState,
    in_flight: Option<InFlight>,
    instructions: String,
    revision_error: bool,
}

impl RevisionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DraftState {
        &self.state
    }

    pub fn in_flight(&self) -> Option<InFlight> {
        self.in_flight
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Set by an empty revision attempt; cleared by editing or a successful revision.
    pub fn revision_error(&self) -> bool {
        self.revision_error
    }

    pub fn set_instructions(&mut self, text: impl Into<String>) {
        self.instructions = text.into();
        self.revision_error = false;
    }

    pub fn begin_submit(&mut self) -> Result<()> {
        self.ensure_idle()?;
        if self.state != DraftState::Empty {
            return Err(self.invalid("submit"));
        }
        self.claim(InFlight::Submitting);
        Ok(())
    }

    /// `None` leaves the state untouched.
    pub fn complete_submit(&mut self, draft: Option<String>) -> bool {
        self.release(InFlight::Submitting);
        match draft {
            Some(text) => {
                self.transition(DraftState::Proposed(text));
                true
            }
            None => {
                warn!(state = self.state.name(), "submission returned no draft");
                false
            }
        }
    }

    /// Accepting does not move the state; it is allowed any number of times.
    pub fn begin_accept(&mut self) -> Result<()> {
        self.ensure_idle()?;
        if !matches!(self.state, DraftState::Proposed(_)) {
            return Err(self.invalid("accept"));
        }
        self.claim(InFlight::Accepting);
        Ok(())
    }

    pub fn complete_accept(&mut self) {
        self.release(InFlight::Accepting);
    }

    /// Local only.
    pub fn reject(&mut self) -> Result<()> {
        self.ensure_idle()?;
        let DraftState::Proposed(text) = &self.state else {
            return Err(self.invalid("reject"));
        };
        let rejected = text.clone();
        self.transition(DraftState::AwaitingRevisionInput { rejected });
        Ok(())
    }

    /// Returns the instructions to send, exactly as typed.
    ///
    /// Blank instructions raise the revision error flag and fail with
    /// [`ValidationError::MissingRevisionInstructions`] without claiming the slot.
    pub fn begin_revision(&mut self) -> Result<String> {
        self.ensure_idle()?;
        if !matches!(self.state, DraftState::AwaitingRevisionInput { .. }) {
            return Err(self.invalid("submit revision"));
        }

        if self.instructions.trim().is_empty() {
            self.revision_error = true;
            return Err(ValidationError::MissingRevisionInstructions.into());
        }

        let instructions = self.instructions.clone();
        self.claim(InFlight::Revising);
        Ok(instructions)
    }

    /// `Some` finalizes the draft and clears the instructions; `None` keeps
    /// waiting for input.
    pub fn complete_revision(&mut self, draft: Option<String>) -> bool {
        self.release(InFlight::Revising);
        match draft {
            Some(text) => {
                self.instructions.clear();
                self.revision_error = false;
                self.transition(DraftState::Final(text));
                true
            }
            None => {
                warn!(state = self.state.name(), "revision returned no draft");
                false
            }
        }
    }

    /// File removal does not depend on the draft state.
    pub fn begin_remove_file(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.claim(InFlight::RemovingFile);
        Ok(())
    }

    pub fn complete_remove_file(&mut self) {
        self.release(InFlight::RemovingFile);
    }

    /// The pending request failed; state and instructions stay as they were.
    pub fn fail(&mut self) {
        if let Some(action) = self.in_flight.take() {
            warn!(%action, state = self.state.name(), "request failed");
        }
    }

    fn ensure_idle(&self) -> Result<()> {
        match self.in_flight {
            Some(action) => Err(WorkflowError::Busy {
                in_flight: action.to_string(),
            }
            .into()),
            None => Ok(()),
        }
    }

    fn claim(&mut self, action: InFlight) {
        self.in_flight = Some(action);
    }

    fn release(&mut self, expected: InFlight) {
        if self.in_flight != Some(expected) {
            warn!(
                expected = %expected,
                actual = ?self.in_flight,
                "completion without matching begin"
            );
        }
        self.in_flight = None;
    }

    fn transition(&mut self, next: DraftState) {
        info!(from = self.state.name(), to = next.name(), "draft state changed");
        self.state = next;
    }

    fn invalid(&self, action: &str) -> crate::error::WriterError {
        WorkflowError::InvalidTransition {
            action: action.to_string(),
            state: self.state.name().to_string(),
        }
        .into()
    }
}
