use std::path::Path;

use bytes::Bytes;

use crate::errors::{ActionError, ActionResult};

pub const PDF_MIME: &str = "application/pdf";

/// A local file picked by the user, held in memory until it is uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeFile {
    pub name: String,
    /// Derived from the file extension, the same way a browser file picker does.
    pub mime: String,
    pub bytes: Bytes,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let name = name.into();
        let mime = mime_guess::from_path(&name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            name,
            mime,
            bytes: bytes.into(),
        }
    }

    pub async fn from_path(path: &Path) -> ActionResult<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ActionError::validation(format!("'{}' is not a file", path.display())))?;
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(name, bytes))
    }

    pub fn is_pdf(&self) -> bool {
        self.mime == PDF_MIME
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}
