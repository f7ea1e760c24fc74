//! Scripted `ResumeService` for component tests. Each endpoint pops the next
//! queued outcome; an unscripted call fails with a 500.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ResumeService, Submission};
use crate::errors::{ActionError, ActionResult};
use crate::models::{
    AuthenticityResult, MultiResumeResult, ParsedResume, ResumeFile, SimilarityResult, SubmitAck,
};

type Queue<T> = Mutex<VecDeque<ActionResult<T>>>;

#[derive(Default)]
pub struct FakeService {
    pub submits: Queue<SubmitAck>,
    pub parsed: Queue<ParsedResume>,
    pub similarity: Queue<SimilarityResult>,
    pub uploads: Queue<()>,
    pub multi: Queue<Vec<MultiResumeResult>>,
    pub authenticity: Queue<AuthenticityResult>,
    pub tokenized: Queue<String>,
    calls: Mutex<Vec<String>>,
}

fn pop<T>(queue: &Queue<T>) -> ActionResult<T> {
    queue.lock().unwrap().pop_front().unwrap_or_else(|| {
        Err(ActionError::Server {
            status: 500,
            body: "unscripted call".to_string(),
        })
    })
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<T>(queue: &Queue<T>, outcome: ActionResult<T>) {
        queue.lock().unwrap().push_back(outcome);
    }

    /// Endpoint paths in call order, with the submission kind for `/submit`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl ResumeService for FakeService {
    async fn submit(&self, submission: &Submission) -> ActionResult<SubmitAck> {
        match submission {
            Submission::Text(_) => self.record("/submit json"),
            Submission::Pdf(_) => self.record("/submit multipart"),
        }
        pop(&self.submits)
    }

    async fn parsed_resume(&self) -> ActionResult<ParsedResume> {
        self.record("/get-parsed-resume");
        pop(&self.parsed)
    }

    async fn compare_resume(&self, job_description: &str) -> ActionResult<SimilarityResult> {
        self.record(format!("/compare-resume {job_description}"));
        pop(&self.similarity)
    }

    async fn upload_resumes(&self, files: &[ResumeFile]) -> ActionResult<()> {
        self.record(format!("/upload-resumes x{}", files.len()));
        pop(&self.uploads)
    }

    async fn compare_multiple_resumes(
        &self,
        job_description: &str,
    ) -> ActionResult<Vec<MultiResumeResult>> {
        self.record(format!("/compare-multiple-resumes {job_description}"));
        pop(&self.multi)
    }

    async fn check_authenticity(&self, file: &ResumeFile) -> ActionResult<AuthenticityResult> {
        self.record(format!("/check-authenticity {}", file.name));
        pop(&self.authenticity)
    }

    async fn tokenized_resume(&self) -> ActionResult<String> {
        self.record("/download-tokenized-resume");
        pop(&self.tokenized)
    }

    fn tokenized_download_url(&self) -> String {
        "http://stub/download-tokenized-resume".to_string()
    }
}
