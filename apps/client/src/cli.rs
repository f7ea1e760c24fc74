use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use crate::components::display::ResultView;
use crate::components::intake::{Intake, IntakeMode};
use crate::components::authenticity::AuthenticityView;
use crate::components::multi_resume::MultiResumeView;
use crate::components::similarity::SimilarityView;
use crate::components::submission::SubmissionView;
use crate::components::tokenized::TokenizedView;
use crate::errors::{failure_line, ActionError, ActionState};
use crate::models::ResumeFile;
use crate::routes::Route;
use crate::service_client::ResumeService;

#[derive(Parser)]
#[command(about = "parse, score and check resumes against the resume analysis service")]
pub struct Cmd {
    /// Service origin, overrides RESUME_SERVICE_URL
    #[arg(long, global = true)]
    pub service_url: Option<String>,

    /// Session id sent with every request, overrides RESUME_SESSION_ID
    #[arg(long, global = true)]
    pub session: Option<String>,

    #[command(subcommand)]
    pub command: Option<SubCommandType>,
}

#[derive(Subcommand)]
pub enum SubCommandType {
    /// Submit a resume and show the parsed record
    Parse(ResumeSource),
    /// Score the last submitted resume against a job description
    Similarity(JobDescription),
    /// Upload up to four resumes and rank them against a job description
    Multiple {
        /// Resume file; repeat for each slot
        #[arg(long = "resume", required = true)]
        resumes: Vec<PathBuf>,
        #[command(flatten)]
        jd: JobDescription,
        /// Show the full breakdown for result N (1-based)
        #[arg(long)]
        detail: Option<usize>,
        /// If the comparison fails, go back, upload the same files again and retry once
        #[arg(long)]
        reupload_on_failure: bool,
    },
    /// Check a PDF resume for authenticity signals
    Authenticity {
        #[arg(long)]
        pdf: PathBuf,
    },
    /// Show the tokenized form of the last submitted resume
    Tokenized {
        /// Also write it to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// List pages, or resolve one page path to its command
    Routes { path: Option<String> },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct ResumeSource {
    /// Resume pasted as text
    #[arg(long)]
    text: Option<String>,
    /// Read resume text from a file
    #[arg(long)]
    text_file: Option<PathBuf>,
    /// Upload a PDF resume
    #[arg(long)]
    pdf: Option<PathBuf>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct JobDescription {
    /// Job description text
    #[arg(long)]
    jd: Option<String>,
    /// Read the job description from a file
    #[arg(long)]
    jd_file: Option<PathBuf>,
}

impl JobDescription {
    async fn resolve(&self) -> Result<String> {
        match (&self.jd, &self.jd_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => read_text(path).await,
            (None, None) => Ok(String::new()),
        }
    }
}

async fn read_text(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Runs one command. Returns `false` when the command's action ended failed.
pub async fn run(command: Option<SubCommandType>, service: &dyn ResumeService) -> Result<bool> {
    match command {
        Some(SubCommandType::Parse(source)) => parse(source, service).await,
        Some(SubCommandType::Similarity(jd)) => similarity(jd, service).await,
        Some(SubCommandType::Multiple {
            resumes,
            jd,
            detail,
            reupload_on_failure,
        }) => {
            let options = MultipleOptions {
                detail,
                reupload_on_failure,
            };
            multiple(&resumes, jd, options, service).await
        }
        Some(SubCommandType::Authenticity { pdf }) => authenticity(&pdf, service).await,
        Some(SubCommandType::Tokenized { save }) => tokenized(save.as_deref(), service).await,
        Some(SubCommandType::Routes { path }) => Ok(routes(path.as_deref())),
        None => {
            tracing::error!("no subcommand passed");
            Ok(false)
        }
    }
}

async fn parse(source: ResumeSource, service: &dyn ResumeService) -> Result<bool> {
    let mut intake = Intake::new();
    let change = if let Some(path) = &source.pdf {
        intake.set_mode(IntakeMode::Pdf);
        intake.select_file(ResumeFile::from_path(path).await?)
    } else {
        let text = match (source.text, &source.text_file) {
            (Some(text), _) => text,
            (None, Some(path)) => read_text(path).await?,
            (None, None) => String::new(),
        };
        intake.set_mode(IntakeMode::Text);
        intake.set_text(text)
    };

    if let Some(alert) = change.alert {
        println!("{alert}");
        return Ok(false);
    }
    print!("{intake}");
    if let Some(preview) = intake.preview() {
        println!("Preview:\n{preview}\n");
    }

    let mut submission = SubmissionView::new();
    submission.input_changed(&change.value);
    if !submission.can_submit(&change.value) {
        return Ok(false);
    }
    submission.submit(service, &change.value).await;
    print!("{submission}");
    if submission.state().error().is_some() {
        return Ok(false);
    }
    print!("{}", ResultView::new(submission.record()));
    Ok(true)
}

async fn similarity(jd: JobDescription, service: &dyn ResumeService) -> Result<bool> {
    let mut view = SimilarityView::new();
    view.set_job_description(jd.resolve().await?);
    view.calculate(service).await;
    print!("{view}");
    Ok(view.state().done().is_some())
}

#[derive(Debug, Default, Clone, Copy)]
struct MultipleOptions {
    detail: Option<usize>,
    reupload_on_failure: bool,
}

async fn multiple(
    paths: &[PathBuf],
    jd: JobDescription,
    options: MultipleOptions,
    service: &dyn ResumeService,
) -> Result<bool> {
    let mut view = MultiResumeView::new();
    if let Err(e) = view.set_count(paths.len()) {
        println!("{}", failure_line(&e));
        return Ok(false);
    }
    for (index, path) in paths.iter().enumerate() {
        let file = ResumeFile::from_path(path).await?;
        debug!("slot {} <- {} ({})", index + 1, file.name, file.mime);
        view.set_file(index, file)?;
    }

    if view.can_upload() {
        view.upload(service).await;
    }
    if view.upload_state().error().is_some() {
        print!("{view}");
        return Ok(false);
    }

    view.set_job_description(jd.resolve().await?);
    if view.can_compare() {
        view.compare(service).await;
    }
    if options.reupload_on_failure && is_service_failure(view.comparison()) {
        print!("{view}");
        info!("comparison failed, uploading again");
        view.go_back();
        view.upload(service).await;
        if view.can_compare() {
            view.compare(service).await;
        }
    }
    if let Some(n) = options.detail {
        if let Err(e) = view.select_detail(n.saturating_sub(1)) {
            println!("{}", failure_line(&e));
        }
    }
    print!("{view}");
    Ok(view.comparison().done().is_some())
}

/// Failures that another round trip might fix. Local validation never is.
fn is_service_failure<T>(state: &ActionState<T>) -> bool {
    matches!(
        state.error(),
        Some(ActionError::Network(_) | ActionError::Server { .. } | ActionError::Decode(_))
    )
}

async fn authenticity(path: &Path, service: &dyn ResumeService) -> Result<bool> {
    let mut view = AuthenticityView::new();
    if let Err(e) = view.select_file(ResumeFile::from_path(path).await?) {
        println!("{}", failure_line(&e));
        return Ok(false);
    }
    view.check(service).await;
    print!("{view}");
    Ok(view.status().error().is_none())
}

async fn tokenized(save: Option<&Path>, service: &dyn ResumeService) -> Result<bool> {
    let mut view = TokenizedView::new(service);
    view.load(service).await;
    print!("{view}");
    if view.text().error().is_some() {
        return Ok(false);
    }
    if let Some(path) = save {
        view.save_to(path).await?;
        println!("Saved to {}", path.display());
    }
    Ok(true)
}

fn routes(path: Option<&str>) -> bool {
    match path {
        Some(path) => match Route::from_path(path) {
            Some(route) => {
                println!("{} -> resume-client {}", route.title(), route.command());
                true
            }
            None => {
                println!("No page at {path}");
                false
            }
        },
        None => {
            for route in Route::nav() {
                println!("{:<28} {:<18} resume-client {}", route.title(), route.path(), route.command());
            }
            for route in Route::ALL.into_iter().filter(|r| !Route::nav().contains(r)) {
                println!("{:<28} {:<18} resume-client {}", route.title(), route.path(), route.command());
            }
            true
        }
    }
}
