use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use commcal_core::config::SiteConfig;
use commcal_core::ics::{ExportFile, ExportScope, IcsStyle};
use commcal_core::session::Session;
use owo_colors::OwoColorize;
use tracing::info;

pub fn run(
    session: &mut Session,
    config: &SiteConfig,
    scope: ExportScope,
    outlook: bool,
    out_dir: &Path,
) -> Result<()> {
    let style = if outlook { IcsStyle::Utc } else { IcsStyle::Zoned };
    let options = config.ics_options(Utc::now());
    let resolver = config.fixed_offset()?;

    let file = match scope {
        ExportScope::Day(date) => session.export_day(date, style, &options, &resolver),
        ExportScope::Month { year, month } => {
            session.go_to(year, month)?;
            session.export_month(style, &options, &resolver)
        }
    };

    let Some(file) = file else {
        println!("{}", format!("No events to export for {scope}").dimmed());
        return Ok(());
    };

    let path = write_export(&file, out_dir)?;
    println!("{} {}", "Wrote".green(), path.display());

    Ok(())
}

/// Write the calendar file into `out_dir`, creating the directory if needed.
fn write_export(file: &ExportFile, out_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create directory {}", out_dir.display()))?;

    let path = out_dir.join(&file.filename);
    std::fs::write(&path, &file.body)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), content_type = file.content_type, "Exported calendar");

    Ok(path)
}
