//! Downloadable calendar files.

use std::fmt;

use chrono::NaiveDate;
use tracing::debug;

use crate::event::Event;
use crate::ics::generate::{IcsOptions, IcsStyle, generate_utc_ics, generate_zoned_ics};
use crate::timezone::FixedOffsetResolver;

pub const ICS_MIME_TYPE: &str = "text/calendar";

/// What an export covers; part of the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    Day(NaiveDate),
    Month { year: i32, month: u32 },
}

impl fmt::Display for ExportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportScope::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            ExportScope::Month { year, month } => write!(f, "{year:04}-{month:02}"),
        }
    }
}

/// A generated calendar file ready to be written or served
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub body: String,
}

/// `<site>-<scope>.ics`, or `<site>-<scope>-outlook.ics` for the UTC form
pub fn export_filename(site_name: &str, scope: ExportScope, style: IcsStyle) -> String {
    match style {
        IcsStyle::Zoned => format!("{site_name}-{scope}.ics"),
        IcsStyle::Utc => format!("{site_name}-{scope}-outlook.ics"),
    }
}

/// Build the calendar file for `events`.
///
/// Returns None when `events` is empty so callers never offer an empty file.
pub fn export(
    events: &[Event],
    scope: ExportScope,
    style: IcsStyle,
    options: &IcsOptions,
    resolver: &FixedOffsetResolver,
) -> Option<ExportFile> {
    let body = match style {
        IcsStyle::Zoned => generate_zoned_ics(events, options),
        IcsStyle::Utc => generate_utc_ics(events, options, resolver),
    };

    let Some(body) = body else {
        debug!(%scope, "Nothing to export");
        return None;
    };

    Some(ExportFile {
        filename: export_filename(&options.site_name, scope, style),
        content_type: ICS_MIME_TYPE,
        body,
    })
}
