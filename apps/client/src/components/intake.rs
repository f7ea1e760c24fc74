//! Intake: collects resume content as pasted text or a single PDF.
//!
//! Every mutation returns an `IntakeChange`, the value the parent must adopt.
//! The parent owns the current value; the intake only proposes it.

use std::fmt;

use tracing::{debug, info, warn};

use crate::models::ResumeFile;

const PREVIEW_LINES: usize = 12;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IntakeMode {
    #[default]
    Text,
    Pdf,
}

impl std::str::FromStr for IntakeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(IntakeMode::Text),
            "pdf" => Ok(IntakeMode::Pdf),
            other => Err(format!("unknown resume type '{other}' (expected text or pdf)")),
        }
    }
}

/// The `(text, file)` pair handed to the parent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntakeValue {
    pub text: String,
    pub file: Option<ResumeFile>,
}

impl IntakeValue {
    pub fn has_content(&self) -> bool {
        self.file.is_some() || !self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntakeChange {
    pub value: IntakeValue,
    /// Blocking message for the user, set when the input was rejected.
    pub alert: Option<String>,
}

impl IntakeChange {
    fn accepted(value: IntakeValue) -> Self {
        Self { value, alert: None }
    }
}

#[derive(Debug, Default)]
pub struct Intake {
    mode: IntakeMode,
    text: String,
    file: Option<ResumeFile>,
}

impl Intake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> IntakeMode {
        self.mode
    }

    pub fn file(&self) -> Option<&ResumeFile> {
        self.file.as_ref()
    }

    pub fn value(&self) -> IntakeValue {
        IntakeValue {
            text: self.text.clone(),
            file: self.file.clone(),
        }
    }

    /// Switching mode always drops held content, even when the mode is unchanged.
    pub fn set_mode(&mut self, mode: IntakeMode) -> IntakeChange {
        debug!("intake mode -> {:?}", mode);
        self.mode = mode;
        self.text.clear();
        self.file = None;
        IntakeChange::accepted(IntakeValue::default())
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> IntakeChange {
        if self.mode != IntakeMode::Text {
            return IntakeChange {
                value: self.value(),
                alert: Some("Switch the resume type to Text to paste a resume.".to_string()),
            };
        }
        self.text = text.into();
        IntakeChange::accepted(IntakeValue {
            text: self.text.clone(),
            file: None,
        })
    }

    /// Accepts only `application/pdf`. A rejected file leaves any previously
    /// accepted one in place.
    pub fn select_file(&mut self, file: ResumeFile) -> IntakeChange {
        if self.mode != IntakeMode::Pdf {
            return IntakeChange {
                value: self.value(),
                alert: Some("Switch the resume type to PDF to upload a file.".to_string()),
            };
        }
        if !file.is_pdf() {
            info!("rejected {} ({})", file.name, file.mime);
            return IntakeChange {
                value: self.value(),
                alert: Some("Please upload a valid PDF file.".to_string()),
            };
        }
        self.file = Some(file);
        IntakeChange::accepted(self.value())
    }

    /// A short text rendition of the selected PDF, or its metadata when the
    /// text layer can't be read.
    pub fn preview(&self) -> Option<String> {
        let file = self.file.as_ref()?;
        let fallback = format!("{} ({} bytes)", file.name, file.size());
        let text = match pdf_extract::extract_text_from_mem(&file.bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!("could not extract text from {}: {e}. showing metadata only", file.name);
                return Some(fallback);
            }
        };
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .take(PREVIEW_LINES)
            .collect();
        if lines.is_empty() {
            Some(fallback)
        } else {
            Some(lines.join("\n"))
        }
    }
}

impl fmt::Display for Intake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.mode {
            IntakeMode::Text => "Text",
            IntakeMode::Pdf => "PDF",
        };
        writeln!(f, "Resume type: {mode}")?;
        match (self.mode, &self.file) {
            (IntakeMode::Text, _) if self.text.trim().is_empty() => {
                writeln!(f, "Please Enter your Resume")
            }
            (IntakeMode::Text, _) => writeln!(f, "{} characters entered", self.text.chars().count()),
            (IntakeMode::Pdf, Some(file)) => writeln!(f, "Selected: {}", file.name),
            (IntakeMode::Pdf, None) => writeln!(f, "Please Enter your Resume"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str) -> ResumeFile {
        ResumeFile::new(name, b"%PDF-1.4".to_vec())
    }

    #[test]
    fn test_text_mode_notifies_on_every_change() {
        let mut intake = Intake::new();
        let change = intake.set_text("Experienced");
        assert_eq!(change.value.text, "Experienced");
        assert!(change.value.file.is_none());
        assert!(change.alert.is_none());

        let change = intake.set_text("Experienced software engineer");
        assert_eq!(change.value.text, "Experienced software engineer");
    }

    #[test]
    fn test_valid_pdf_is_accepted() {
        let mut intake = Intake::new();
        intake.set_mode(IntakeMode::Pdf);
        let change = intake.select_file(pdf("cv.pdf"));
        assert!(change.alert.is_none());
        assert_eq!(change.value.file.as_ref().map(|f| f.name.as_str()), Some("cv.pdf"));
        assert!(change.value.has_content());
    }

    #[test]
    fn test_non_pdf_is_rejected_with_alert() {
        let mut intake = Intake::new();
        intake.set_mode(IntakeMode::Pdf);
        let change = intake.select_file(ResumeFile::new("cv.docx", b"PK".to_vec()));
        assert_eq!(change.alert.as_deref(), Some("Please upload a valid PDF file."));
        assert!(change.value.file.is_none());
        assert!(intake.file().is_none());
    }

    #[test]
    fn test_rejection_keeps_previously_accepted_pdf() {
        let mut intake = Intake::new();
        intake.set_mode(IntakeMode::Pdf);
        intake.select_file(pdf("good.pdf"));

        let change = intake.select_file(ResumeFile::new("notes.txt", b"hi".to_vec()));
        assert!(change.alert.is_some());
        assert_eq!(change.value.file.map(|f| f.name), Some("good.pdf".to_string()));
        assert_eq!(intake.file().map(|f| f.name.as_str()), Some("good.pdf"));
    }

    #[test]
    fn test_mode_switch_clears_content() {
        let mut intake = Intake::new();
        intake.set_text("some resume");
        let change = intake.set_mode(IntakeMode::Pdf);
        assert_eq!(change.value, IntakeValue::default());
        assert!(!intake.value().has_content());

        intake.select_file(pdf("cv.pdf"));
        let change = intake.set_mode(IntakeMode::Text);
        assert_eq!(change.value, IntakeValue::default());
    }

    #[test]
    fn test_switching_to_same_mode_twice_is_idempotent() {
        let mut intake = Intake::new();
        intake.set_text("draft");
        let first = intake.set_mode(IntakeMode::Text);
        let second = intake.set_mode(IntakeMode::Text);
        assert_eq!(first, second);
        assert_eq!(intake.value(), IntakeValue::default());
    }

    #[test]
    fn test_file_in_text_mode_is_refused() {
        let mut intake = Intake::new();
        let change = intake.select_file(pdf("cv.pdf"));
        assert!(change.alert.is_some());
        assert!(intake.file().is_none());
    }

    #[test]
    fn test_whitespace_only_text_has_no_content() {
        let value = IntakeValue {
            text: "   \n".to_string(),
            file: None,
        };
        assert!(!value.has_content());
    }

    #[test]
    fn test_unreadable_pdf_previews_as_metadata() {
        let mut intake = Intake::new();
        assert!(intake.preview().is_none());

        intake.set_mode(IntakeMode::Pdf);
        intake.select_file(ResumeFile::new("cv.pdf", b"not a pdf".to_vec()));
        assert_eq!(intake.preview().as_deref(), Some("cv.pdf (9 bytes)"));
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("PDF".parse::<IntakeMode>().unwrap(), IntakeMode::Pdf);
        assert_eq!("text".parse::<IntakeMode>().unwrap(), IntakeMode::Text);
        assert!("docx".parse::<IntakeMode>().is_err());
    }

    #[test]
    fn test_display_prompts_when_empty() {
        let intake = Intake::new();
        assert!(intake.to_string().contains("Please Enter your Resume"));
    }
}
