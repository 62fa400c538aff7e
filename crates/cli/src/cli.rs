//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use portfolio_dashboard_core::models::analytics::GapPolicy;
use portfolio_dashboard_core::models::settings::{DashboardSettings, NewsSettings};
use portfolio_dashboard_core::models::xirr::XirrDisplayMode;

/// Portfolio dashboard - trades, XIRR, daily value and market news in the terminal
#[derive(Parser)]
#[command(name = "portfolio-dashboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Dataset directory, or a `.pfdb` bundle file
    #[arg(short, long, env = "DASHBOARD_DATA_DIR", default_value = "data", global = true)]
    pub data_dir: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// How XIRR values are shown
    #[arg(long, value_enum, default_value = "percent", global = true)]
    pub xirr_mode: XirrMode,

    /// Include months without trades (as zero) in the monthly charts
    #[arg(long, global = true)]
    pub zero_fill: bool,

    /// Rows shown in preview tables
    #[arg(long, default_value_t = 5, global = true)]
    pub preview_rows: usize,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands, one per dashboard page
#[derive(Subcommand)]
pub enum Commands {
    /// Headline metrics, recent trades and traded volume
    Overview,

    /// Annualized return per holding
    Xirr {
        /// Holding to highlight (defaults to the best performer)
        #[arg(short, long)]
        symbol: Option<String>,
    },

    /// Daily total portfolio value
    DailyValue,

    /// Monthly quantity, proceeds and price history of one stock
    Stock {
        /// Stock to chart (defaults to the first symbol)
        #[arg(short, long)]
        symbol: Option<String>,
    },

    /// Preview one or more CSV files
    Upload {
        /// CSV files to parse
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Latest stock market headlines from NewsAPI
    News(NewsArgs),

    /// Pack the loaded datasets into a single .pfdb file
    Bundle {
        /// Destination file
        output: PathBuf,
    },
}

#[derive(Args)]
pub struct NewsArgs {
    /// NewsAPI key
    #[arg(long, env = "NEWSAPI_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Maximum number of articles
    #[arg(long, default_value_t = 5)]
    pub limit: usize,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Table,
    /// The rendered page as JSON
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum XirrMode {
    /// Percent values rounded to two decimals
    Percent,
    /// Raw fractional rates
    Fraction,
}

impl From<XirrMode> for XirrDisplayMode {
    fn from(mode: XirrMode) -> Self {
        match mode {
            XirrMode::Percent => XirrDisplayMode::Percent,
            XirrMode::Fraction => XirrDisplayMode::Fraction,
        }
    }
}

impl Cli {
    /// Dashboard settings from the parsed arguments.
    pub fn settings(&self) -> DashboardSettings {
        let mut news = NewsSettings::default();
        if let Commands::News(args) = &self.command {
            news.api_key = args.api_key.clone();
            news.timeout_secs = args.timeout_secs;
            news.limit = args.limit;
        }

        DashboardSettings {
            data_dir: self.data_dir.clone(),
            xirr_display: self.xirr_mode.into(),
            gap_policy: if self.zero_fill {
                GapPolicy::ZeroFill
            } else {
                GapPolicy::Skip
            },
            preview_rows: self.preview_rows,
            news,
        }
    }
}
