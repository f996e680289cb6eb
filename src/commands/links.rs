use anyhow::Result;
use chrono::NaiveDate;
use commcal_core::agenda::day_events;
use commcal_core::format::long_date;
use commcal_core::links::{google_calendar_url, outlook_calendar_url};
use commcal_core::session::Session;
use owo_colors::OwoColorize;

pub fn run(session: &Session, date: NaiveDate) -> Result<()> {
    let events = day_events(session.events(), date);

    if events.is_empty() {
        println!("{}", format!("No events on {}", long_date(date)).dimmed());
        return Ok(());
    }

    for (i, event) in events.iter().enumerate() {
        println!("{}", event.title.bold());
        println!("  {} {}", "Google: ".dimmed(), google_calendar_url(event));
        println!("  {} {}", "Outlook:".dimmed(), outlook_calendar_url(event));

        if i < events.len() - 1 {
            println!();
        }
    }

    Ok(())
}
