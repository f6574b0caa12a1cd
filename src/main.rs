use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use intake::api::{FormsBackend, HttpFormsClient};
use intake::app::App;
use intake::config::Config;
use intake::form::QuestionId;
use intake::logging;

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Terminal client for a sequential intake form")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Override the backend base URL
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the saved answers for a session
    Show {
        /// Session identifier returned by the backend
        session_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    // Determine if we're running in TUI mode (no subcommand)
    let is_tui_mode = cli.command.is_none();

    // Initialize logging (file-based for TUI, stderr for CLI)
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    let backend: Arc<dyn FormsBackend> = Arc::new(HttpFormsClient::new(&config.api.base_url)?);

    match cli.command {
        Some(Commands::Show { session_id }) => {
            cmd_show(backend.as_ref(), &session_id).await?;
        }
        None => {
            run_tui(config, backend, logging_handle.log_file_path).await?;
        }
    }

    Ok(())
}

async fn run_tui(
    config: Config,
    backend: Arc<dyn FormsBackend>,
    log_file_path: Option<PathBuf>,
) -> Result<()> {
    let mut app = App::new(config, backend);
    let result = app.run().await;

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if log_path.exists() {
            if let Ok(metadata) = log_path.metadata() {
                if metadata.len() > 0 {
                    eprintln!("Session log: {}", log_path.display());
                }
            }
        }
    }

    result
}

async fn cmd_show(backend: &dyn FormsBackend, session_id: &str) -> Result<()> {
    let data = backend.form_data(session_id).await?;

    println!("Session {}", data.session_id);
    if let Some(created) = &data.created_at {
        println!("  Created:   {}", created);
    }
    if data.submitted() {
        println!(
            "  Submitted: {}",
            data.submitted_at.as_deref().unwrap_or("yes")
        );
    } else {
        println!("  Submitted: no");
    }
    println!("{}", "─".repeat(60));

    if data.answers.is_empty() {
        println!("No answers saved yet");
        return Ok(());
    }

    let mut answers = data.answers;
    answers.sort_by_key(|a| a.question_number);

    for answer in &answers {
        match QuestionId::from_number(answer.question_number) {
            Some(question) => println!("{}. {}", answer.question_number, question.prompt()),
            None => println!("{}.", answer.question_number),
        }
        println!("   {}", answer.answer);
    }

    Ok(())
}
