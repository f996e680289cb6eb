//! TUI rendering traits for commcal types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to commcal-core types using owo_colors.

use commcal_core::agenda::{AgendaDay, MonthAgenda};
use commcal_core::countdown::{self, Countdown};
use commcal_core::event::Event;
use commcal_core::format::{long_date, month_label, time_range};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let mut lines = vec![format!(
            "  {} {}",
            time_range(self).dimmed(),
            self.title.bold()
        )];

        let mut tags = Vec::new();
        if let Some(ref event_type) = self.event_type {
            tags.push(event_type.clone());
        }
        if let Some(location_type) = self.location_type {
            tags.push(location_type.label().to_string());
        }
        if !tags.is_empty() {
            lines.push(format!("    {}", format!("[{}]", tags.join(", ")).cyan()));
        }

        if let Some(ref location) = self.location {
            lines.push(format!("    {}", location));
        }
        if let Some(ref url) = self.url {
            lines.push(format!("    {}", url.underline()));
        }
        if !self.description.is_empty() {
            lines.push(format!("    {}", self.description.dimmed()));
        }

        lines.join("\n")
    }
}

impl Render for AgendaDay {
    fn render(&self) -> String {
        let mut lines = vec![long_date(self.date).bold().to_string()];
        lines.extend(self.events.iter().map(Render::render));
        lines.join("\n")
    }
}

impl Render for MonthAgenda {
    fn render(&self) -> String {
        let title = format!("📅 {}", month_label(self.year, self.month));

        if self.is_empty() {
            return format!("{}\n   {}", title.bold(), "No events this month".dimmed());
        }

        let days: Vec<String> = self.days.iter().map(Render::render).collect();
        format!("{}\n\n{}", title.bold(), days.join("\n\n"))
    }
}

impl Render for Countdown {
    /// Same wording as the plain core text, colored by state
    fn render(&self) -> String {
        let text = countdown::render(self);
        match self {
            Countdown::Upcoming { .. } => text.green().to_string(),
            Countdown::None => text.dimmed().to_string(),
        }
    }
}
