//! Multi-resume analysis: a two-phase flow.
//!
//! Collecting -> (upload succeeds) -> Uploaded -> (go back) -> Collecting
//!
//! Comparisons only run in Uploaded. A failed comparison stays in Uploaded,
//! so it can be retried without re-uploading.

use std::fmt;

use tracing::info;

use crate::components::lifecycle::{RequestSlot, Ticket};
use crate::components::similarity::{format_score, EMPTY_JD_MESSAGE};
use crate::errors::{failure_line, ActionError, ActionResult, ActionState};
use crate::models::{MultiResumeResult, ResumeFile};
use crate::service_client::ResumeService;

pub const MAX_RESUMES: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MultiResumePhase {
    #[default]
    Collecting,
    Uploaded,
}

#[derive(Debug)]
pub struct MultiResumeView {
    phase: MultiResumePhase,
    slots: Vec<Option<ResumeFile>>,
    upload_slot: RequestSlot,
    upload: ActionState<()>,
    job_description: String,
    compare_slot: RequestSlot,
    comparison: ActionState<Vec<MultiResumeResult>>,
    selected: Option<usize>,
}

impl Default for MultiResumeView {
    fn default() -> Self {
        Self {
            phase: MultiResumePhase::Collecting,
            slots: vec![None],
            upload_slot: RequestSlot::default(),
            upload: ActionState::Idle,
            job_description: String::new(),
            compare_slot: RequestSlot::default(),
            comparison: ActionState::Idle,
            selected: None,
        }
    }
}

/// Resizes to `count`, keeping the leading selections and padding with empty slots.
pub fn resize_slots(slots: &mut Vec<Option<ResumeFile>>, count: usize) {
    slots.resize(count, None);
}

impl MultiResumeView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> MultiResumePhase {
        self.phase
    }

    pub fn slots(&self) -> &[Option<ResumeFile>] {
        &self.slots
    }

    pub fn results(&self) -> &[MultiResumeResult] {
        self.comparison.done().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn comparison(&self) -> &ActionState<Vec<MultiResumeResult>> {
        &self.comparison
    }

    pub fn upload_state(&self) -> &ActionState<()> {
        &self.upload
    }

    pub fn selected(&self) -> Option<&MultiResumeResult> {
        self.selected.and_then(|i| self.results().get(i))
    }

    fn require_phase(&self, phase: MultiResumePhase) -> ActionResult<()> {
        if self.phase != phase {
            let msg = match phase {
                MultiResumePhase::Collecting => "Resumes are already uploaded; go back to change them.",
                MultiResumePhase::Uploaded => "Upload the resumes before comparing.",
            };
            return Err(ActionError::validation(msg));
        }
        Ok(())
    }

    pub fn set_count(&mut self, count: usize) -> ActionResult<()> {
        self.require_phase(MultiResumePhase::Collecting)?;
        if !(1..=MAX_RESUMES).contains(&count) {
            return Err(ActionError::validation(format!(
                "Select between 1 and {MAX_RESUMES} resumes."
            )));
        }
        resize_slots(&mut self.slots, count);
        Ok(())
    }

    pub fn set_file(&mut self, index: usize, file: ResumeFile) -> ActionResult<()> {
        self.require_phase(MultiResumePhase::Collecting)?;
        let slot = self
            .slots
            .get_mut(index)
            .ok_or_else(|| ActionError::validation(format!("There is no resume slot {}.", index + 1)))?;
        *slot = Some(file);
        Ok(())
    }

    pub fn can_upload(&self) -> bool {
        self.phase == MultiResumePhase::Collecting
            && !self.upload_slot.is_busy()
            && self.slots.iter().all(Option::is_some)
    }

    pub fn begin_upload(&mut self) -> ActionResult<(Ticket, Vec<ResumeFile>)> {
        self.require_phase(MultiResumePhase::Collecting)?;
        let files: Vec<ResumeFile> = self.slots.iter().flatten().cloned().collect();
        if files.len() != self.slots.len() {
            return Err(ActionError::validation("Select a file for every resume slot."));
        }
        let ticket = self.upload_slot.begin()?;
        self.upload = ActionState::Busy;
        Ok((ticket, files))
    }

    pub fn complete_upload(&mut self, ticket: Ticket, result: ActionResult<()>) -> bool {
        if !self.upload_slot.finish(ticket) {
            return false;
        }
        if result.is_ok() {
            self.phase = MultiResumePhase::Uploaded;
        } else if let Err(e) = &result {
            info!("resume upload failed: {e}");
        }
        self.upload = ActionState::from_result(result);
        true
    }

    pub async fn upload(&mut self, service: &dyn ResumeService) -> &ActionState<()> {
        match self.begin_upload() {
            Ok((ticket, files)) => {
                let result = service.upload_resumes(&files).await;
                self.complete_upload(ticket, result);
            }
            Err(ActionError::Busy) => {}
            Err(e) => self.upload = ActionState::Failed(e),
        }
        &self.upload
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    pub fn can_compare(&self) -> bool {
        self.phase == MultiResumePhase::Uploaded && !self.compare_slot.is_busy()
    }

    pub fn begin_compare(&mut self) -> ActionResult<Ticket> {
        self.require_phase(MultiResumePhase::Uploaded)?;
        if self.job_description.trim().is_empty() {
            info!("comparison rejected: empty job description");
            return Err(ActionError::validation(EMPTY_JD_MESSAGE));
        }
        let ticket = self.compare_slot.begin()?;
        self.comparison = ActionState::Busy;
        self.selected = None;
        Ok(ticket)
    }

    /// Results replace the previous list wholesale, in the order received.
    pub fn complete_compare(
        &mut self,
        ticket: Ticket,
        result: ActionResult<Vec<MultiResumeResult>>,
    ) -> bool {
        if !self.compare_slot.finish(ticket) {
            return false;
        }
        self.comparison = ActionState::from_result(result);
        true
    }

    pub async fn compare(
        &mut self,
        service: &dyn ResumeService,
    ) -> &ActionState<Vec<MultiResumeResult>> {
        match self.begin_compare() {
            Ok(ticket) => {
                let result = service.compare_multiple_resumes(&self.job_description).await;
                self.complete_compare(ticket, result);
            }
            Err(ActionError::Busy) => {}
            Err(e) => self.comparison = ActionState::Failed(e),
        }
        &self.comparison
    }

    /// Back to Collecting. Results are cleared and a running comparison is
    /// orphaned; selected files stay so they can be re-uploaded as-is.
    pub fn go_back(&mut self) {
        self.phase = MultiResumePhase::Collecting;
        self.compare_slot.invalidate();
        self.comparison = ActionState::Idle;
        self.upload = ActionState::Idle;
        self.selected = None;
    }

    pub fn select_detail(&mut self, index: usize) -> ActionResult<&MultiResumeResult> {
        if index >= self.results().len() {
            return Err(ActionError::validation(format!("There is no result {}.", index + 1)));
        }
        self.selected = Some(index);
        Ok(&self.results()[index])
    }

    /// Closes the drill-down only; the result list is untouched.
    pub fn close_detail(&mut self) {
        self.selected = None;
    }
}

/// The drill-down dialog for one file.
pub struct ResultDetail<'a>(pub &'a MultiResumeResult);

impl fmt::Display for ResultDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        writeln!(f, "{} Details", result.filename)?;
        writeln!(f, "Similarity Score: {:.2}%", result.similarity.similarity_score)?;
        writeln!(f, "Matched Skills:")?;
        if result.similarity.matched_skills.is_empty() {
            writeln!(f, "  No matched skills found.")?;
        }
        for matched in &result.similarity.matched_skills {
            writeln!(f, "  - {}", matched.skill)?;
        }
        writeln!(f, "Unmatched Skills:")?;
        if result.similarity.unmatched_skills.is_empty() {
            writeln!(f, "  No Unmatched skills found.")?;
        }
        for skill in &result.similarity.unmatched_skills {
            writeln!(f, "  - {skill}")?;
        }
        Ok(())
    }
}

impl fmt::Display for MultiResumeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Multiple Resume Analysis")?;
        writeln!(f, "Number of resumes (max {MAX_RESUMES}): {}", self.slots.len())?;

        match self.phase {
            MultiResumePhase::Collecting => {
                for (i, slot) in self.slots.iter().enumerate() {
                    match slot {
                        Some(file) => writeln!(f, "Resume {}: Selected: {}", i + 1, file.name)?,
                        None => writeln!(f, "Resume {}: (no file)", i + 1)?,
                    }
                }
                match &self.upload {
                    ActionState::Busy => writeln!(f, "Uploading...")?,
                    ActionState::Failed(e) => writeln!(f, "{}", failure_line(e))?,
                    _ => {}
                }
            }
            MultiResumePhase::Uploaded => {
                writeln!(f, "Resumes uploaded.")?;
                match &self.comparison {
                    ActionState::Idle => {}
                    ActionState::Busy => writeln!(f, "Analyzing...")?,
                    ActionState::Failed(e) => writeln!(f, "{}", failure_line(e))?,
                    ActionState::Done(results) if results.is_empty() => {
                        writeln!(f, "No results returned.")?
                    }
                    ActionState::Done(results) => {
                        writeln!(f)?;
                        writeln!(f, "Results")?;
                        for (i, result) in results.iter().enumerate() {
                            writeln!(
                                f,
                                "{}. {} - Similarity: {}%",
                                i + 1,
                                result.filename,
                                format_score(result.similarity.similarity_score)
                            )?;
                        }
                    }
                }
            }
        }

        if let Some(result) = self.selected() {
            writeln!(f)?;
            write!(f, "{}", ResultDetail(result))?;
        }
        Ok(())
    }
}
