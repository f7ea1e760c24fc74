//! Similarity: scores the last submitted resume against a job description.

use std::fmt;

use tracing::info;

use crate::components::lifecycle::{RequestSlot, Ticket};
use crate::errors::{ActionError, ActionResult, ActionState};
use crate::models::{ScoreCategory, SimilarityResult};
use crate::service_client::ResumeService;

pub const EMPTY_JD_MESSAGE: &str = "Please enter a job description.";
const GENERIC_FAILURE: &str = "Failed to fetch data. Please try again.";

#[derive(Debug, Default)]
pub struct SimilarityView {
    job_description: String,
    slot: RequestSlot,
    state: ActionState<SimilarityResult>,
    modal_open: bool,
}

impl SimilarityView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    pub fn state(&self) -> &ActionState<SimilarityResult> {
        &self.state
    }

    pub fn category(&self) -> Option<ScoreCategory> {
        self.state.done().map(SimilarityResult::category)
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// Dismisses the score dialog; the result stays on screen.
    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }

    pub fn begin(&mut self) -> ActionResult<Ticket> {
        if self.job_description.trim().is_empty() {
            info!("similarity check rejected: empty job description");
            return Err(ActionError::validation(EMPTY_JD_MESSAGE));
        }
        let ticket = self.slot.begin()?;
        self.state = ActionState::Busy;
        self.modal_open = false;
        Ok(ticket)
    }

    pub fn complete(&mut self, ticket: Ticket, result: ActionResult<SimilarityResult>) -> bool {
        if !self.slot.finish(ticket) {
            return false;
        }
        self.modal_open = result.is_ok();
        self.state = ActionState::from_result(result);
        true
    }

    pub async fn calculate(&mut self, service: &dyn ResumeService) -> &ActionState<SimilarityResult> {
        match self.begin() {
            Ok(ticket) => {
                let result = service.compare_resume(&self.job_description).await;
                self.complete(ticket, result);
            }
            Err(ActionError::Busy) => {}
            Err(e) => self.state = ActionState::Failed(e),
        }
        &self.state
    }

    /// Unmount: drop whatever is in flight.
    pub fn close(&mut self) {
        self.slot.invalidate();
        self.modal_open = false;
        if self.state.is_busy() {
            self.state = ActionState::Idle;
        }
    }
}

/// The inline message for a failed check.
pub fn similarity_error_message(err: &ActionError) -> String {
    match err {
        ActionError::Validation(msg) => msg.clone(),
        ActionError::Server { body, .. } if !body.trim().is_empty() => body.clone(),
        ActionError::Server { .. } => "An error occurred.".to_string(),
        ActionError::Network(e) => format!("{GENERIC_FAILURE} ({e})"),
        _ => GENERIC_FAILURE.to_string(),
    }
}

/// `82.0` renders as `82`, `66.67` as `66.67`.
pub fn format_score(score: f64) -> String {
    format!("{score}")
}

impl fmt::Display for SimilarityView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Calculate Similarity Score")?;
        match &self.state {
            ActionState::Idle => {}
            ActionState::Busy => writeln!(f, "Calculating...")?,
            ActionState::Failed(e) => writeln!(f, "{}", similarity_error_message(e))?,
            ActionState::Done(result) => {
                writeln!(f)?;
                writeln!(f, "Analysis Result")?;
                writeln!(f, "Matched Skills:")?;
                if result.matched_skills.is_empty() {
                    writeln!(f, "  None")?;
                }
                for matched in &result.matched_skills {
                    writeln!(f, "  - {}", matched.skill)?;
                }
                writeln!(f, "Unmatched Skills:")?;
                if result.unmatched_skills.is_empty() {
                    writeln!(f, "  All skills matched!")?;
                }
                for skill in &result.unmatched_skills {
                    writeln!(f, "  - {skill}")?;
                }
                writeln!(f, "Similarity Score:")?;
                writeln!(f, "  {}%", format_score(result.similarity_score))?;

                if self.modal_open {
                    let category = result.category();
                    writeln!(f)?;
                    writeln!(f, "+ Similarity Score")?;
                    writeln!(f, "| {} - {}%", category, format_score(result.similarity_score))?;
                    writeln!(f, "| {}", category.marker())?;
                    writeln!(f, "+ [Close]")?;
                }
            }
        }
        Ok(())
    }
}
