//! Session context: the expanded occurrence set and the displayed month.
//!
//! Everything that renders or exports takes a `Session` explicitly; the
//! feed is expanded once when the session is created and month navigation
//! only re-filters it.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::agenda::{MonthAgenda, day_events, month_agenda};
use crate::countdown::{Countdown, next_event};
use crate::error::{CommCalError, CommCalResult};
use crate::event::Event;
use crate::ics::{ExportFile, ExportScope, IcsOptions, IcsStyle, export};
use crate::recurrence::expand_all;
use crate::timezone::{FixedOffsetResolver, ZoneAwareResolver};

#[derive(Debug, Clone)]
pub struct Session {
    /// Expanded occurrences of every feed event
    events: Vec<Event>,
    current_year: i32,
    current_month: u32,
}

impl Session {
    /// Expand `feed` and start on the month containing `today`.
    pub fn new(feed: &[Event], today: NaiveDate) -> Self {
        Session {
            events: expand_all(feed),
            current_year: today.year(),
            current_month: today.month(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn current_month(&self) -> (i32, u32) {
        (self.current_year, self.current_month)
    }

    pub fn next_month(&mut self) {
        if self.current_month == 12 {
            self.current_year += 1;
            self.current_month = 1;
        } else {
            self.current_month += 1;
        }
    }

    pub fn prev_month(&mut self) {
        if self.current_month == 1 {
            self.current_year -= 1;
            self.current_month = 12;
        } else {
            self.current_month -= 1;
        }
    }

    pub fn go_to(&mut self, year: i32, month: u32) -> CommCalResult<()> {
        if !(1..=12).contains(&month) {
            return Err(CommCalError::InvalidMonth(format!("{year}-{month:02}")));
        }
        self.current_year = year;
        self.current_month = month;
        Ok(())
    }

    /// Agenda of the displayed month
    pub fn agenda(&self) -> MonthAgenda {
        month_agenda(&self.events, self.current_year, self.current_month)
    }

    /// Calendar file for the displayed month, None if the month is empty.
    pub fn export_month(
        &self,
        style: IcsStyle,
        options: &IcsOptions,
        resolver: &FixedOffsetResolver,
    ) -> Option<ExportFile> {
        let agenda = self.agenda();
        let events: Vec<Event> = agenda.events().cloned().collect();
        let scope = ExportScope::Month {
            year: self.current_year,
            month: self.current_month,
        };
        export(&events, scope, style, options, resolver)
    }

    /// Calendar file for one day, None if the day has no events.
    pub fn export_day(
        &self,
        date: NaiveDate,
        style: IcsStyle,
        options: &IcsOptions,
        resolver: &FixedOffsetResolver,
    ) -> Option<ExportFile> {
        let events = day_events(&self.events, date);
        export(&events, ExportScope::Day(date), style, options, resolver)
    }

    /// Next event within a week of `now`, resolved with each event's timezone
    pub fn countdown(&self, now: DateTime<Utc>) -> Countdown {
        next_event(now, &self.events, &ZoneAwareResolver)
    }
}

/// Parse a `YYYY-MM` month argument (four-digit year, two-digit month)
pub fn parse_month(value: &str) -> CommCalResult<(i32, u32)> {
    let invalid = || CommCalError::InvalidMonth(value.to_string());

    if value.len() != 7 || value.as_bytes().get(4) != Some(&b'-') {
        return Err(invalid());
    }

    let first = NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
        .map_err(|_| invalid())?;

    Ok((first.year(), first.month()))
}

/// Parse a `YYYY-MM-DD` date argument
pub fn parse_date(value: &str) -> CommCalResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CommCalError::InvalidDate(value.to_string()))
}
