//! Command-line entry point for printing task receipts.
//!
//! Loads `.env`, initializes tracing, resolves the printer address from
//! the flag or `PRINTER_ADDR`, and runs exactly one job.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use print_job::{Composer, PrinterConfig, TaskTicket};

#[derive(Debug, Parser)]
#[command(name = "taskprint")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Print task receipts to an ESC/POS network printer")]
struct Cli {
    /// Printer address (host or host:port); defaults to $PRINTER_ADDR.
    #[arg(long, global = true)]
    printer: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a task receipt.
    Task {
        /// Task name.
        #[arg(long)]
        name: String,
        /// Person the task is assigned to.
        #[arg(long)]
        assignee: Option<String>,
        /// Free-form details, word-wrapped to the printer width.
        #[arg(long)]
        details: Option<String>,
        /// Due date, YYYY-MM-DD.
        #[arg(long)]
        due: String,
        /// Image printed below the text.
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Print a single image.
    Image {
        /// Path to the image file.
        path: PathBuf,
    },
    /// Print the contents of a UTF-8 text file.
    Text {
        /// Path to the text file.
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let address = cli
        .printer
        .or_else(|| std::env::var("PRINTER_ADDR").ok())
        .context("no printer address: pass --printer or set PRINTER_ADDR")?;
    let composer = Composer::new(PrinterConfig::from_env(address));

    match cli.command {
        Command::Task {
            name,
            assignee,
            details,
            due,
            image,
        } => {
            let payload = image
                .as_ref()
                .map(std::fs::read)
                .transpose()
                .context("failed to read image file")?;
            let task = TaskTicket {
                name,
                assignee,
                details,
                due_date: due,
            };
            composer.print_task(&task, payload.as_deref()).await?;
        }
        Command::Image { path } => {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            composer.print_image(&bytes).await?;
        }
        Command::Text { path } => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            composer.print_text(&content).await?;
        }
    }

    tracing::info!("Job sent to printer");
    Ok(())
}
