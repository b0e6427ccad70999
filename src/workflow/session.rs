use super::machine::RevisionWorkflow;
use super::state::DraftState;
use crate::attachments::{AddOutcome, Attachment, AttachmentCollector, AttachmentPolicy, Bucket};
use crate::auth::Credential;
use crate::client::{GenerationRequest, GenerationService, Submission};
use crate::config::Config;
use crate::error::{Result, TransportError};
use crate::form::FormState;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const REMOVE_FAILED_MESSAGE: &str = "Failed to remove the file. Please try again.";

/// One form, its attachments and its draft, driven against a generation service.
///
/// Dropping a request future part way (for example under a timeout) frees the
/// in-flight slot and leaves the draft state where it was.
pub struct FormSession {
    id: Uuid,
    form: FormState,
    attachments: AttachmentCollector,
    workflow: RevisionWorkflow,
    service: Arc<dyn GenerationService>,
    credential: Option<Credential>,
    confirm_remote_delete: bool,
}

impl FormSession {
    pub fn new(
        form: FormState,
        attachments: AttachmentCollector,
        service: Arc<dyn GenerationService>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            form,
            attachments,
            workflow: RevisionWorkflow::new(),
            service,
            credential: None,
            confirm_remote_delete: false,
        }
    }

    pub fn from_config(config: &Config, service: Arc<dyn GenerationService>) -> Self {
        let form = FormState::new(config.form.fields.clone(), config.form.default_style);
        let attachments = AttachmentCollector::new(AttachmentPolicy::from_config(&config.attachments));
        Self::new(form, attachments, service)
            .with_remote_delete(config.attachments.confirm_remote_delete)
    }

    /// Adds `user_id`/`user_email` to the submission.
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn with_remote_delete(mut self, enabled: bool) -> Self {
        self.confirm_remote_delete = enabled;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn attachments(&self) -> &AttachmentCollector {
        &self.attachments
    }

    pub fn workflow(&self) -> &RevisionWorkflow {
        &self.workflow
    }

    pub fn state(&self) -> &DraftState {
        self.workflow.state()
    }

    pub fn add_attachments(&mut self, bucket: Bucket, candidates: Vec<Attachment>) -> AddOutcome {
        let outcome = self.attachments.add(bucket, candidates);
        for rejection in &outcome.rejected {
            warn!(session = %self.id, bucket = %bucket, reason = %rejection.message(), "attachment rejected");
        }
        outcome
    }

    /// Removes locally, or through the service when remote delete is enabled.
    pub async fn remove_attachment(&mut self, bucket: Bucket, name: &str) -> Result<bool> {
        if self.confirm_remote_delete {
            self.remove_attachment_confirmed(bucket, name).await
        } else {
            Ok(self.attachments.remove(bucket, name))
        }
    }

    /// Asks the service to drop `name` and removes it locally only when the
    /// reply carries a draft value.
    pub async fn remove_attachment_confirmed(&mut self, bucket: Bucket, name: &str) -> Result<bool> {
        if !self.attachments.contains(bucket, name) {
            return Ok(false);
        }

        let request = GenerationRequest::DeleteFile {
            name: name.to_string(),
        };
        self.workflow.begin_remove_file()?;
        let mut pending = Pending::new(&mut self.workflow);
        let outcome = self.service.generate(&request).await;
        pending.settle().complete_remove_file();

        match outcome {
            Ok(reply) if reply.draft.is_some() => {
                info!(session = %self.id, bucket = %bucket, file = name, "attachment removed remotely");
                Ok(self.attachments.remove(bucket, name))
            }
            Ok(_) => {
                warn!(session = %self.id, bucket = %bucket, file = name, "remote delete not confirmed");
                Ok(false)
            }
            Err(error) => {
                warn!(session = %self.id, bucket = %bucket, file = name, %error, "remote delete failed");
                Err(TransportError::Request {
                    message: REMOVE_FAILED_MESSAGE.into(),
                }
                .into())
            }
        }
    }

    /// Validate, then send every field and attachment in one request.
    ///
    /// Returns the proposed draft, or `None` when the service produced none.
    /// Validation failures never reach the network.
    pub async fn submit(&mut self) -> Result<Option<String>> {
        self.form.validate_for_submit().into_result()?;
        self.workflow.begin_submit()?;

        let request = GenerationRequest::Submission(self.build_submission());
        debug!(
            session = %self.id,
            fields = request.text_parts().len(),
            attachments = request.attachments().len(),
            "submitting form"
        );

        let mut pending = Pending::new(&mut self.workflow);
        let outcome = self.service.generate(&request).await;
        let workflow = pending.settle();
        match outcome {
            Ok(reply) => {
                workflow.complete_submit(reply.draft);
                Ok(workflow.state().draft().map(ToOwned::to_owned))
            }
            Err(error) => {
                workflow.fail();
                Err(error.into())
            }
        }
    }

    /// Send the acknowledgment. Transport failures are logged and swallowed.
    pub async fn accept(&mut self) -> Result<()> {
        self.workflow.begin_accept()?;
        let mut pending = Pending::new(&mut self.workflow);
        let outcome = self.service.generate(&GenerationRequest::Feedback).await;
        pending.settle().complete_accept();

        match outcome {
            Ok(_) => info!(session = %self.id, "draft accepted"),
            Err(error) => warn!(session = %self.id, %error, "acknowledgment failed; ignoring"),
        }
        Ok(())
    }

    pub fn reject(&mut self) -> Result<()> {
        self.workflow.reject()
    }

    pub fn set_revision_instructions(&mut self, text: impl Into<String>) {
        self.workflow.set_instructions(text);
    }

    /// Returns the final draft, or `None` when the service produced none and
    /// the session is still waiting for instructions.
    pub async fn submit_revision(&mut self) -> Result<Option<String>> {
        let instructions = self.workflow.begin_revision()?;
        let request = GenerationRequest::Revision { instructions };

        let mut pending = Pending::new(&mut self.workflow);
        let outcome = self.service.generate(&request).await;
        let workflow = pending.settle();
        match outcome {
            Ok(reply) => {
                let finalized = workflow.complete_revision(reply.draft);
                Ok(finalized
                    .then(|| workflow.state().draft().map(ToOwned::to_owned))
                    .flatten())
            }
            Err(error) => {
                workflow.fail();
                Err(error.into())
            }
        }
    }

    fn build_submission(&self) -> Submission {
        let mut fields = self.form.payload_fields();
        if let Some(user) = self.credential.as_ref().map(Credential::user) {
            if let Some(id) = &user.id {
                fields.push(("user_id".into(), id.clone()));
            }
            if let Some(email) = &user.email {
                fields.push(("user_email".into(), email.clone()));
            }
        }

        Submission {
            fields,
            style: self.form.style(),
            attachments: self.attachments.iter().cloned().collect(),
        }
    }
}

/// Claimed slot for the request being awaited. Fails the workflow if dropped
/// before [`Pending::settle`].
struct Pending<'a> {
    workflow: &'a mut RevisionWorkflow,
    settled: bool,
}

impl<'a> Pending<'a> {
    fn new(workflow: &'a mut RevisionWorkflow) -> Self {
        Self {
            workflow,
            settled: false,
        }
    }

    fn settle(&mut self) -> &mut RevisionWorkflow {
        self.settled = true;
        &mut *self.workflow
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("request dropped before it completed");
            self.workflow.fail();
        }
    }
}
