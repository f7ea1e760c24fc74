// Paths and field names are fixed by the backend; keep them byte-identical.

pub const SUBMIT: &str = "/submit";
pub const PARSED_RESUME: &str = "/get-parsed-resume";
pub const COMPARE_RESUME: &str = "/compare-resume";
pub const UPLOAD_RESUMES: &str = "/upload-resumes";
pub const COMPARE_MULTIPLE_RESUMES: &str = "/compare-multiple-resumes";
pub const CHECK_AUTHENTICITY: &str = "/check-authenticity";
pub const DOWNLOAD_TOKENIZED_RESUME: &str = "/download-tokenized-resume";

pub const SUBMIT_PDF_FIELD: &str = "pdfFile";
pub const AUTHENTICITY_FIELD: &str = "resume";

pub const SESSION_HEADER: &str = "x-session-id";

/// Multipart field for the n-th (zero-based) slot: `resume1`, `resume2`, ...
pub fn upload_field(index: usize) -> String {
    format!("resume{}", index + 1)
}
