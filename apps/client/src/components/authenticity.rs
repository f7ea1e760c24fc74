//! Authenticity check: uploads one PDF and shows the service's signals.

use std::fmt;

use tracing::info;

use crate::components::lifecycle::{RequestSlot, Ticket};
use crate::errors::{failure_line, ActionError, ActionResult, ActionState};
use crate::models::{AuthenticityResult, ResumeFile};
use crate::service_client::ResumeService;

#[derive(Debug, Default)]
pub struct AuthenticityView {
    file: Option<ResumeFile>,
    slot: RequestSlot,
    status: ActionState<()>,
    /// Last successful result. A failed check leaves it in place.
    result: Option<AuthenticityResult>,
}

impl AuthenticityView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self) -> Option<&ResumeFile> {
        self.file.as_ref()
    }

    pub fn result(&self) -> Option<&AuthenticityResult> {
        self.result.as_ref()
    }

    pub fn status(&self) -> &ActionState<()> {
        &self.status
    }

    /// Non-PDF files are refused and the current selection is kept.
    pub fn select_file(&mut self, file: ResumeFile) -> ActionResult<()> {
        if !file.is_pdf() {
            info!("rejected {} ({})", file.name, file.mime);
            return Err(ActionError::validation("Please upload a PDF file."));
        }
        self.file = Some(file);
        Ok(())
    }

    pub fn begin(&mut self) -> ActionResult<(Ticket, ResumeFile)> {
        let file = self
            .file
            .clone()
            .ok_or_else(|| ActionError::validation("Please select a PDF file first."))?;
        let ticket = self.slot.begin()?;
        self.status = ActionState::Busy;
        Ok((ticket, file))
    }

    pub fn complete(&mut self, ticket: Ticket, result: ActionResult<AuthenticityResult>) -> bool {
        if !self.slot.finish(ticket) {
            return false;
        }
        self.status = match result {
            Ok(result) => {
                self.result = Some(result);
                ActionState::Done(())
            }
            Err(e) => ActionState::Failed(e),
        };
        true
    }

    pub async fn check(&mut self, service: &dyn ResumeService) -> &ActionState<()> {
        match self.begin() {
            Ok((ticket, file)) => {
                let result = service.check_authenticity(&file).await;
                self.complete(ticket, result);
            }
            Err(ActionError::Busy) => {}
            Err(e) => self.status = ActionState::Failed(e),
        }
        &self.status
    }
}

fn list_block(f: &mut fmt::Formatter<'_>, title: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f, "{title}:")?;
    for item in items {
        writeln!(f, "  - {item}")?;
    }
    Ok(())
}

fn score(value: Option<f64>) -> String {
    value.map(|v| format!("{v}")).unwrap_or_default()
}

impl fmt::Display for AuthenticityView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Resume Authenticity Checker")?;
        if let Some(file) = &self.file {
            writeln!(f, "Selected: {}", file.name)?;
        }
        match &self.status {
            ActionState::Busy => return writeln!(f, "Checking..."),
            ActionState::Failed(e) => writeln!(f, "Error uploading file: {}", failure_line(e))?,
            _ => {}
        }

        let Some(result) = &self.result else {
            return Ok(());
        };
        writeln!(f)?;
        writeln!(f, "Authenticity Result")?;
        writeln!(f, "AI Score: {}", score(result.ai_score))?;
        writeln!(f, "Authenticity Score: {}", score(result.authenticity_score))?;
        writeln!(
            f,
            "Suspected AI: {}",
            if result.is_suspected_ai { "Yes" } else { "No" }
        )?;
        list_block(f, "Authenticity Flags", &result.authenticity_flags)?;
        list_block(f, "Unsupported Skills", &result.unsupported_skills)?;
        list_block(f, "Invalid Companies", &result.invalid_companies)?;
        list_block(f, "Triggered Buzzwords", &result.triggered_buzzwords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service_client::fake::FakeService;

    fn pdf(name: &str) -> ResumeFile {
        ResumeFile::new(name, b"%PDF".to_vec())
    }

    #[test]
    fn test_non_pdf_is_refused_and_selection_kept() {
        let mut view = AuthenticityView::new();
        view.select_file(pdf("cv.pdf")).unwrap();

        let err = view.select_file(ResumeFile::new("cv.png", b"x".to_vec())).unwrap_err();
        assert_eq!(err.to_string(), "Please upload a PDF file.");
        assert_eq!(view.file().map(|f| f.name.as_str()), Some("cv.pdf"));
    }

    #[tokio::test]
    async fn test_check_without_file_never_hits_network() {
        let service = FakeService::new();
        let mut view = AuthenticityView::new();
        view.check(&service).await;

        assert!(service.calls().is_empty());
        assert!(view.to_string().contains("Please select a PDF file first."));
    }

    #[tokio::test]
    async fn test_only_populated_blocks_render() {
        let service = FakeService::new();
        FakeService::push(
            &service.authenticity,
            Ok(serde_json::from_str(
                r#"{"ai_score": 0.3, "authenticity_score": 85, "is_suspected_ai": false,
                    "authenticity_flags": [], "unsupported_skills": ["Kubernetes"]}"#,
            )
            .unwrap()),
        );
        let mut view = AuthenticityView::new();
        view.select_file(pdf("cv.pdf")).unwrap();
        view.check(&service).await;

        let out = view.to_string();
        assert!(!out.contains("Authenticity Flags"));
        assert!(out.contains("Unsupported Skills:\n  - Kubernetes\n"));
        assert!(!out.contains("Invalid Companies"));
        assert!(out.contains("Suspected AI: No"));
        assert!(out.contains("Authenticity Score: 85"));
        assert_eq!(service.calls(), vec!["/check-authenticity cv.pdf"]);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_result() {
        let service = FakeService::new();
        FakeService::push(
            &service.authenticity,
            Ok(AuthenticityResult {
                is_suspected_ai: true,
                triggered_buzzwords: vec!["synergy".to_string()],
                ..Default::default()
            }),
        );
        FakeService::push(
            &service.authenticity,
            Err(ActionError::from_response(500, String::new())),
        );
        let mut view = AuthenticityView::new();
        view.select_file(pdf("cv.pdf")).unwrap();

        view.check(&service).await;
        view.check(&service).await;

        assert!(view.status().error().is_some());
        let previous = view.result().unwrap();
        assert!(previous.is_suspected_ai);
        let out = view.to_string();
        assert!(out.contains("Error uploading file: Service failure: Server error: 500"));
        assert!(out.contains("  - synergy"));
    }

    #[test]
    fn test_busy_check_is_guarded() {
        let mut view = AuthenticityView::new();
        view.select_file(pdf("cv.pdf")).unwrap();
        let (ticket, _) = view.begin().unwrap();
        assert!(matches!(view.begin(), Err(ActionError::Busy)));
        assert!(view.to_string().contains("Checking..."));
        assert!(view.complete(ticket, Ok(AuthenticityResult::default())));
    }
}
