mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commcal_core::config::SiteConfig;
use commcal_core::feed::{FeedSource, load_feed_or_empty};
use commcal_core::ics::ExportScope;
use commcal_core::session::{Session, parse_date, parse_month};
use tracing_subscriber::EnvFilter;

use crate::utils::tui::create_spinner;

#[derive(Parser)]
#[command(name = "commcal")]
#[command(about = "Browse, export and count down to community calendar events")]
struct Cli {
    /// Events feed to read (path or http(s) URL), overriding the configured one
    #[arg(long, global = true)]
    feed: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the events of a month
    Agenda {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Write an .ics calendar file for a month or a single day
    Export {
        /// Month to export (YYYY-MM)
        #[arg(long, conflicts_with = "date", required_unless_present = "date")]
        month: Option<String>,

        /// Day to export (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Write UTC times instead of TZID-qualified local times
        #[arg(long)]
        outlook: bool,

        /// Directory to write the file to
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Show the next event starting within a week
    Countdown {
        /// Keep running and refresh every minute
        #[arg(short, long)]
        watch: bool,
    },
    /// Print "add to calendar" links for the events of a day
    Links {
        /// Day (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = SiteConfig::load()?;

    let source = cli
        .feed
        .as_deref()
        .map(FeedSource::parse)
        .unwrap_or_else(|| config.feed_source());

    let mut session = load_session(&source).await;

    match cli.command {
        Commands::Agenda { month } => {
            let month = month.as_deref().map(parse_month).transpose()?;
            commands::agenda::run(&mut session, month)
        }
        Commands::Export {
            month,
            date,
            outlook,
            out,
        } => {
            let scope = match (date, month) {
                (Some(date), _) => ExportScope::Day(parse_date(&date)?),
                (None, Some(month)) => {
                    let (year, month) = parse_month(&month)?;
                    ExportScope::Month { year, month }
                }
                (None, None) => anyhow::bail!("Pass --month YYYY-MM or --date YYYY-MM-DD"),
            };
            commands::export::run(&mut session, &config, scope, outlook, &out)
        }
        Commands::Countdown { watch } => commands::countdown::run(&session, watch).await,
        Commands::Links { date } => commands::links::run(&session, parse_date(&date)?),
    }
}

/// Initialize logging from RUST_LOG, warnings only by default
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Load the feed once and expand it. A feed that cannot be loaded gives an
/// empty session, shown as "no events".
async fn load_session(source: &FeedSource) -> Session {
    let spinner = create_spinner("Loading events".to_string());
    let feed = load_feed_or_empty(source).await;
    spinner.finish_and_clear();

    Session::new(&feed, chrono::Local::now().date_naive())
}
