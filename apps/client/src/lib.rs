pub mod cli;
pub mod components;
pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod service_client;

pub use config::Config;
pub use errors::{ActionError, ActionResult, ActionState};
pub use service_client::{HttpResumeService, ResumeService, Submission};
