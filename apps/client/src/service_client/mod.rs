//! Service client: the single point of entry for every call to the resume
//! analysis backend. Components never build requests themselves; they go
//! through `ResumeService` so they can be driven by a scripted fake in tests.
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::{ActionError, ActionResult};
use crate::models::{
    AuthenticityResult, MultiResumeResult, ParsedResume, ResumeFile, SimilarityResult, SubmitAck,
};

pub mod endpoints;

/// What the intake hands to `/submit`: pasted text or a single PDF.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Text(String),
    Pdf(ResumeFile),
}

#[async_trait]
pub trait ResumeService: Send + Sync {
    /// POST /submit, as JSON `{resumeText}` or multipart `pdfFile`.
    async fn submit(&self, submission: &Submission) -> ActionResult<SubmitAck>;

    /// GET /get-parsed-resume
    async fn parsed_resume(&self) -> ActionResult<ParsedResume>;

    /// POST /compare-resume
    async fn compare_resume(&self, job_description: &str) -> ActionResult<SimilarityResult>;

    /// POST /upload-resumes, one multipart field per slot.
    async fn upload_resumes(&self, files: &[ResumeFile]) -> ActionResult<()>;

    /// POST /compare-multiple-resumes
    async fn compare_multiple_resumes(
        &self,
        job_description: &str,
    ) -> ActionResult<Vec<MultiResumeResult>>;

    /// POST /check-authenticity
    async fn check_authenticity(&self, file: &ResumeFile) -> ActionResult<AuthenticityResult>;

    /// GET /download-tokenized-resume, returned verbatim.
    async fn tokenized_resume(&self) -> ActionResult<String>;

    /// Direct link to the tokenized resume, for downloading outside the client.
    fn tokenized_download_url(&self) -> String;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResumeTextBody<'a> {
    resume_text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JobDescriptionBody<'a> {
    job_description: &'a str,
}

/// `ResumeService` over HTTP.
#[derive(Clone)]
pub struct HttpResumeService {
    client: Client,
    origin: String,
    session_id: String,
}

impl HttpResumeService {
    pub fn new(config: &Config) -> ActionResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            origin: config.service_url.as_str().trim_end_matches('/').to_string(),
            session_id: config.session_id.clone(),
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.origin, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        debug!("GET {} (session {})", path, self.session_id);
        self.client
            .get(self.url(path))
            .header(endpoints::SESSION_HEADER, &self.session_id)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        debug!("POST {} (session {})", path, self.session_id);
        self.client
            .post(self.url(path))
            .header(endpoints::SESSION_HEADER, &self.session_id)
    }

    /// Sends the request and returns the status and body of a 2xx response.
    async fn send(&self, request: RequestBuilder) -> ActionResult<(StatusCode, String)> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("{} returned {}: {}", url, status, body);
            return Err(ActionError::from_response(status.as_u16(), body));
        }
        Ok((status, body))
    }

    /// Like `send`, but a 2xx `{"error": ...}` body is still a service failure.
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ActionResult<T> {
        let (status, body) = self.send(request).await?;
        if carries_error(&body) {
            warn!("service reported an error with status {}: {}", status, body);
            return Err(ActionError::from_response(status.as_u16(), body));
        }
        serde_json::from_str(&body).map_err(ActionError::Decode)
    }
}

fn carries_error(body: &str) -> bool {
    matches!(
        serde_json::from_str::<Value>(body),
        Ok(Value::Object(map)) if map.contains_key("error")
    )
}

fn file_part(file: &ResumeFile) -> ActionResult<Part> {
    Ok(Part::bytes(file.bytes.to_vec())
        .file_name(file.name.clone())
        .mime_str(&file.mime)?)
}

#[async_trait]
impl ResumeService for HttpResumeService {
    async fn submit(&self, submission: &Submission) -> ActionResult<SubmitAck> {
        let request = match submission {
            Submission::Pdf(file) => {
                let form = Form::new().part(endpoints::SUBMIT_PDF_FIELD, file_part(file)?);
                self.post(endpoints::SUBMIT).multipart(form)
            }
            Submission::Text(text) => self
                .post(endpoints::SUBMIT)
                .json(&ResumeTextBody { resume_text: text }),
        };
        self.send_json(request).await
    }

    async fn parsed_resume(&self) -> ActionResult<ParsedResume> {
        self.send_json(self.get(endpoints::PARSED_RESUME)).await
    }

    async fn compare_resume(&self, job_description: &str) -> ActionResult<SimilarityResult> {
        let request = self
            .post(endpoints::COMPARE_RESUME)
            .json(&JobDescriptionBody { job_description });
        self.send_json(request).await
    }

    async fn upload_resumes(&self, files: &[ResumeFile]) -> ActionResult<()> {
        let mut form = Form::new();
        for (index, file) in files.iter().enumerate() {
            form = form.part(endpoints::upload_field(index), file_part(file)?);
        }
        self.send(self.post(endpoints::UPLOAD_RESUMES).multipart(form))
            .await
            .map(|_| ())
    }

    async fn compare_multiple_resumes(
        &self,
        job_description: &str,
    ) -> ActionResult<Vec<MultiResumeResult>> {
        let request = self
            .post(endpoints::COMPARE_MULTIPLE_RESUMES)
            .json(&JobDescriptionBody { job_description });
        self.send_json(request).await
    }

    async fn check_authenticity(&self, file: &ResumeFile) -> ActionResult<AuthenticityResult> {
        let form = Form::new().part(endpoints::AUTHENTICITY_FIELD, file_part(file)?);
        self.send_json(self.post(endpoints::CHECK_AUTHENTICITY).multipart(form))
            .await
    }

    async fn tokenized_resume(&self) -> ActionResult<String> {
        self.send(self.get(endpoints::DOWNLOAD_TOKENIZED_RESUME))
            .await
            .map(|(_, body)| body)
    }

    fn tokenized_download_url(&self) -> String {
        self.url(endpoints::DOWNLOAD_TOKENIZED_RESUME)
    }
}

#[cfg(test)]
pub(crate) mod fake;
#[cfg(test)]
mod stub_backend;
