//! Core engine for the community calendar.
//!
//! This crate turns a flat feed of events into something a page (or the
//! `commcal` CLI) can show and export:
//! - `recurrence` expands recurring events into concrete occurrences
//! - `agenda` groups occurrences by month and day
//! - `ics` serializes occurrences to calendar files
//! - `links` builds "add to calendar" URLs for web calendars
//! - `countdown` finds the next event within a week

pub mod agenda;
pub mod config;
pub mod countdown;
pub mod error;
pub mod event;
pub mod feed;
pub mod format;
pub mod ics;
pub mod links;
pub mod recurrence;
pub mod session;
pub mod timezone;

// Re-export event types at crate root for convenience
pub use event::*;
