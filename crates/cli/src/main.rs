//! Portfolio dashboard CLI - one subcommand per dashboard page.
//!
//! # Usage
//!
//! ```bash
//! # Headline metrics and recent trades
//! portfolio-dashboard --data-dir ./data overview
//!
//! # XIRR table, highlighting one holding
//! portfolio-dashboard xirr --symbol AAPL
//!
//! # Monthly activity with empty months shown as zero
//! portfolio-dashboard stock --symbol MSFT --zero-fill
//!
//! # Preview uploaded CSV files
//! portfolio-dashboard upload new_trades.csv dividends.csv
//!
//! # Headlines (reads NEWSAPI_KEY from the environment or .env)
//! portfolio-dashboard news
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

mod cli;
mod output;

use cli::{Cli, Commands};
use portfolio_dashboard_core::models::upload::UploadedFile;
use portfolio_dashboard_core::models::view::{ViewId, ViewRequest};
use portfolio_dashboard_core::PortfolioDashboard;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let settings = cli.settings();
    debug!("starting with {settings:?}");

    let dashboard = PortfolioDashboard::load(settings)
        .with_context(|| format!("failed to load datasets from {}", cli.data_dir.display()))?;

    let (view, request) = match cli.command {
        Commands::Overview => (ViewId::PortfolioOverview, ViewRequest::default()),
        Commands::Xirr { symbol } => (ViewId::XirrAnalysis, selection(symbol)),
        Commands::DailyValue => (ViewId::DailyPortfolioValue, ViewRequest::default()),
        Commands::Stock { symbol } => (ViewId::IndividualStockCharts, selection(symbol)),
        Commands::Upload { files } => (
            ViewId::UploadNewData,
            ViewRequest::with_uploads(read_uploads(&files)),
        ),
        Commands::News(_) => (ViewId::LatestNews, ViewRequest::default()),
        Commands::Bundle { output: path } => {
            dashboard
                .save_bundle(&path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            output::print_success(&format!("Wrote bundle to {}", path.display()));
            return Ok(());
        }
    };

    let page = dashboard.render(view, &request).await?;
    output::print_view(&page, cli.format)
}

fn selection(symbol: Option<String>) -> ViewRequest {
    ViewRequest {
        symbol,
        ..ViewRequest::default()
    }
}

/// Read every file that can be read; unreadable ones are reported and skipped.
fn read_uploads(paths: &[PathBuf]) -> Vec<UploadedFile> {
    paths
        .iter()
        .filter_map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            match std::fs::read(path) {
                Ok(bytes) => Some(UploadedFile::new(name, bytes)),
                Err(e) => {
                    output::print_warning(&format!("Could not read {}: {e}", path.display()));
                    None
                }
            }
        })
        .collect()
}
