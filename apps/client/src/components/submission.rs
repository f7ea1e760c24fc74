//! Submission: sends the intake value to `/submit`, then pulls the parsed
//! record. Both requests share one busy window.

use std::fmt;

use tracing::{debug, info};

use crate::components::intake::IntakeValue;
use crate::components::lifecycle::{RequestSlot, Ticket};
use crate::errors::{failure_line, ActionError, ActionResult, ActionState};
use crate::models::ParsedResume;
use crate::service_client::{ResumeService, Submission};

#[derive(Debug, Default)]
pub struct SubmissionView {
    slot: RequestSlot,
    state: ActionState<ParsedResume>,
}

/// A file wins over text, matching the intake's mode exclusivity.
pub fn submission_for(value: &IntakeValue) -> ActionResult<Submission> {
    if let Some(file) = &value.file {
        return Ok(Submission::Pdf(file.clone()));
    }
    if value.text.trim().is_empty() {
        return Err(ActionError::validation("Please Enter your Resume"));
    }
    Ok(Submission::Text(value.text.clone()))
}

/// POST /submit followed by GET /get-parsed-resume.
pub async fn submit_and_fetch(
    service: &dyn ResumeService,
    submission: &Submission,
) -> ActionResult<ParsedResume> {
    let ack = service.submit(submission).await?;
    debug!(
        "submit acknowledged: {} ({} chars echoed)",
        ack.message.as_deref().unwrap_or("no message"),
        ack.text().map(|t| t.len()).unwrap_or(0)
    );
    service.parsed_resume().await
}

impl SubmissionView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ActionState<ParsedResume> {
        &self.state
    }

    pub fn record(&self) -> Option<&ParsedResume> {
        self.state.done()
    }

    /// The submit action is disabled while there is nothing to send or a
    /// round trip is already running.
    pub fn can_submit(&self, value: &IntakeValue) -> bool {
        value.has_content() && !self.slot.is_busy()
    }

    /// Called whenever the parent adopts a new intake value. Emptied input
    /// clears the record and orphans any in-flight round trip.
    pub fn input_changed(&mut self, value: &IntakeValue) {
        if !value.has_content() {
            self.slot.invalidate();
            self.state = ActionState::Idle;
        }
    }

    pub fn begin(&mut self, value: &IntakeValue) -> ActionResult<(Ticket, Submission)> {
        let submission = submission_for(value)?;
        let ticket = self.slot.begin()?;
        self.state = ActionState::Busy;
        Ok((ticket, submission))
    }

    /// Applies the outcome unless the ticket went stale. Returns whether it was applied.
    pub fn complete(&mut self, ticket: Ticket, result: ActionResult<ParsedResume>) -> bool {
        if !self.slot.finish(ticket) {
            return false;
        }
        if let Err(e) = &result {
            info!("resume submission failed: {e}");
        }
        self.state = ActionState::from_result(result);
        true
    }

    pub async fn submit(
        &mut self,
        service: &dyn ResumeService,
        value: &IntakeValue,
    ) -> &ActionState<ParsedResume> {
        match self.begin(value) {
            Ok((ticket, submission)) => {
                let result = submit_and_fetch(service, &submission).await;
                self.complete(ticket, result);
            }
            // A busy slot keeps the current round trip's state.
            Err(ActionError::Busy) => {}
            Err(e) => self.state = ActionState::Failed(e),
        }
        &self.state
    }
}

impl fmt::Display for SubmissionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            ActionState::Idle => writeln!(f, "[Submit]"),
            ActionState::Busy => writeln!(f, "Submitting..."),
            ActionState::Done(_) => writeln!(f, "Submitted."),
            ActionState::Failed(e) => writeln!(f, "{}", failure_line(e)),
        }
    }
}
