use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_client::cli::{self, Cmd};
use resume_client::{Config, HttpResumeService};

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Cmd::parse();

    // Command-line flags win over the environment
    let config = Config::from_env()?
        .with_overrides(cmd.service_url.as_deref(), cmd.session.as_deref())?;

    // Logs go to stderr so stdout only carries rendered views
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_client={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting resume-client v{}", env!("CARGO_PKG_VERSION"));

    let service = HttpResumeService::new(&config)?;
    info!(
        "Service client initialized ({}, session {})",
        config.service_url,
        service.session_id()
    );

    if !cli::run(cmd.command, &service).await? {
        std::process::exit(1);
    }

    Ok(())
}
