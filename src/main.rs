use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nutri_quiz::{AppConfig, Capabilities, Landing, DEFAULT_API_BASE};

#[derive(Parser, Debug)]
#[command(version, about = "NutriGuide quiz and admin dashboard", long_about = None)]
struct Args {
    /// Base URL of the NutriGuide backend
    #[arg(long, env = "NUTRIGUIDE_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Customer screen to open on
    #[arg(long, value_enum, default_value_t = Landing::Home)]
    landing: Landing,

    /// Show churn-risk labels on the admin dashboard
    #[arg(long)]
    risk_label: bool,

    /// Enable the admin CSV export
    #[arg(long)]
    export: bool,

    /// Enable welcome-email generation on the result screen
    #[arg(long)]
    email_assistant: bool,

    /// File to write logs to (the terminal is owned by the UI)
    #[arg(long, default_value = "nutri-quiz.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(&args.log_file);

    let config = AppConfig::new(
        args.api_base,
        args.landing,
        Capabilities {
            risk_label: args.risk_label,
            export: args.export,
            email_assistant: args.email_assistant,
        },
    );

    if let Err(err) = nutri_quiz::run(config).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

/// Best-effort file logging; the session still runs if the file cannot be
/// opened.
fn init_logging(path: &PathBuf) {
    let Ok(file) = File::create(path) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
}
