//! ICS calendar file generation and parsing.
//!
//! This module handles writing .ics files according to RFC 5545, in a
//! TZID-qualified form and a UTC form, and reading them back.

mod export;
mod generate;
mod parse;

pub use export::{ExportFile, ExportScope, ICS_MIME_TYPE, export, export_filename};
pub use generate::{IcsOptions, IcsStyle, generate_utc_ics, generate_zoned_ics};
pub use parse::{IcsDateTime, ParsedEvent, parse_ics, unescape_text};
