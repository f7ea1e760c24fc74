//! Tokenized view: the service's plain-text rendition of the last submitted
//! resume, shown verbatim, plus a direct download link.

use std::fmt;
use std::path::Path;

use tracing::info;

use crate::components::lifecycle::{RequestSlot, Ticket};
use crate::errors::{failure_line, ActionError, ActionResult, ActionState};
use crate::service_client::ResumeService;

#[derive(Debug)]
pub struct TokenizedView {
    download_url: String,
    slot: RequestSlot,
    text: ActionState<String>,
}

impl TokenizedView {
    pub fn new(service: &dyn ResumeService) -> Self {
        Self {
            download_url: service.tokenized_download_url(),
            slot: RequestSlot::default(),
            text: ActionState::Idle,
        }
    }

    pub fn download_url(&self) -> &str {
        &self.download_url
    }

    pub fn text(&self) -> &ActionState<String> {
        &self.text
    }

    pub fn begin(&mut self) -> ActionResult<Ticket> {
        let ticket = self.slot.begin()?;
        self.text = ActionState::Busy;
        Ok(ticket)
    }

    pub fn complete(&mut self, ticket: Ticket, result: ActionResult<String>) -> bool {
        if !self.slot.finish(ticket) {
            return false;
        }
        self.text = ActionState::from_result(result);
        true
    }

    /// Fetches once on open. There is no refresh.
    pub async fn load(&mut self, service: &dyn ResumeService) -> &ActionState<String> {
        if let Ok(ticket) = self.begin() {
            let result = service.tokenized_resume().await;
            self.complete(ticket, result);
        }
        &self.text
    }

    pub fn close(&mut self) {
        self.slot.invalidate();
        if self.text.is_busy() {
            self.text = ActionState::Idle;
        }
    }

    /// Writes the loaded text to `path`.
    pub async fn save_to(&self, path: &Path) -> ActionResult<()> {
        let text = self
            .text
            .done()
            .ok_or_else(|| ActionError::validation("The tokenized resume has not been loaded."))?;
        tokio::fs::write(path, text).await?;
        info!("saved tokenized resume to {}", path.display());
        Ok(())
    }
}

impl fmt::Display for TokenizedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tokenized Resume")?;
        match &self.text {
            ActionState::Idle => {}
            ActionState::Busy => writeln!(f, "Loading...")?,
            ActionState::Done(text) => {
                write!(f, "{text}")?;
                if !text.ends_with('\n') {
                    writeln!(f)?;
                }
            }
            ActionState::Failed(e) => writeln!(f, "{}", failure_line(e))?,
        }
        writeln!(f, "Download: {}", self.download_url)
    }
}
