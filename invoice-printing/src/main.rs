//! print-invoice: command line front end for the receipt printer
//!
//! ```sh
//! # Print a paid invoice
//! print-invoice --settings printer.json print --invoice inv.json --company company.json
//!
//! # Self-test ticket
//! print-invoice test
//!
//! # Printer status as JSON
//! print-invoice status
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use shared::models::{CompanyProfile, InvoiceSnapshot};
use tracing::{error, info};

use invoice_printing::{InvoicePrinter, PrintJobError, config, logger};

#[derive(Parser, Debug)]
#[command(name = "print-invoice", version, about = "Print invoice receipts on a thermal printer")]
struct Cli {
    /// Persisted printer settings (JSON), overriding PRINTER_* variables
    #[arg(short, long, env = "PRINTER_SETTINGS")]
    settings: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Emit JSON logs
    #[arg(long)]
    json_logs: bool,

    /// Directory for rotating log files
    #[arg(long, env = "LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the receipt of a paid invoice
    Print {
        /// Invoice snapshot (JSON)
        #[arg(short, long)]
        invoice: PathBuf,

        /// Company profile (JSON)
        #[arg(short, long)]
        company: Option<PathBuf>,
    },
    /// Print a self-test ticket
    Test,
    /// Show printer status as JSON
    Status,
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    match cli.log_dir.as_deref() {
        Some(dir) => logger::init_logger_with_file(&cli.log_level, cli.json_logs, Some(dir))?,
        None => logger::init_logger(&cli.log_level, cli.json_logs)?,
    }

    let persisted = cli
        .settings
        .as_deref()
        .map(config::load_settings)
        .transpose()?;
    let printer = InvoicePrinter::new(config::resolve(&config::from_env(), persisted.as_ref()));
    let resolved = printer.config();
    info!(
        enabled = resolved.enabled,
        transport = %resolved.transport,
        width = resolved.paper_width,
        "Printer configuration resolved"
    );

    match cli.command {
        Command::Print { invoice, company } => {
            let invoice: InvoiceSnapshot = read_json(&invoice)?;
            let company: Option<CompanyProfile> =
                company.as_deref().map(read_json).transpose()?;
            printer
                .print_invoice(&invoice, company.as_ref())
                .map_err(report)
                .with_context(|| format!("Failed to print invoice {}", invoice.code))?;
        }
        Command::Test => {
            printer
                .print_test_page()
                .map_err(report)
                .context("Failed to print test page")?;
        }
        Command::Status => {
            let status = printer.status();
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn report(e: PrintJobError) -> PrintJobError {
    error!(code = e.code(), "{}", e);
    e
}
