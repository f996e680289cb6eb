//! "Next event" countdown.
//!
//! Start times are resolved with the event's real timezone (see
//! [`ZoneAwareResolver`](crate::timezone::ZoneAwareResolver)), unlike the UTC
//! calendar export.

use chrono::{DateTime, Duration, Utc};

use crate::event::Event;
use crate::timezone::UtcResolver;

/// How far ahead the countdown looks
pub const COUNTDOWN_WINDOW_DAYS: i64 = 7;

/// Result of a countdown computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Countdown {
    Upcoming {
        event: Event,
        starts_at: DateTime<Utc>,
        remaining: Duration,
    },
    /// No event starts within the window
    None,
}

/// Find the occurrence starting soonest after `now`, at most seven days out.
///
/// Events starting exactly at `now` have already begun and are skipped.
/// When several events share the earliest start, the first in input order wins.
pub fn next_event(now: DateTime<Utc>, occurrences: &[Event], resolver: &impl UtcResolver) -> Countdown {
    let window = Duration::days(COUNTDOWN_WINDOW_DAYS);

    let nearest = occurrences
        .iter()
        .map(|event| (event, resolver.start_utc(event)))
        .filter(|(_, starts_at)| *starts_at > now && *starts_at - now <= window)
        .fold(None, |best: Option<(&Event, DateTime<Utc>)>, candidate| match best {
            Some(best) if best.1 <= candidate.1 => Some(best),
            _ => Some(candidate),
        });

    match nearest {
        Some((event, starts_at)) => Countdown::Upcoming {
            event: event.clone(),
            starts_at,
            remaining: starts_at - now,
        },
        None => Countdown::None,
    }
}

/// Format a remaining duration as days, hours and minutes.
///
/// Zero components are left out; anything under a minute is
/// "less than a minute".
pub fn format_remaining(remaining: Duration) -> String {
    let total_minutes = remaining.num_minutes();
    if total_minutes < 1 {
        return "less than a minute".to_string();
    }

    let days = total_minutes / (24 * 60);
    let hours = (total_minutes / 60) % 24;
    let minutes = total_minutes % 60;

    let parts: Vec<String> = [(days, "day"), (hours, "hour"), (minutes, "minute")]
        .into_iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, unit)| format!("{} {}", count, pluralize(unit, count)))
        .collect();

    parts.join(", ")
}

fn pluralize(unit: &str, count: i64) -> String {
    if count == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}

/// Keeps the last displayed countdown so that a periodic refresh only
/// reports a change when the text actually differs.
#[derive(Debug, Default)]
pub struct CountdownTicker {
    last: Option<String>,
}

impl CountdownTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the countdown. Returns it only when its [`render`] text
    /// differs from what was last shown; callers display it however they
    /// like.
    pub fn update(
        &mut self,
        now: DateTime<Utc>,
        occurrences: &[Event],
        resolver: &impl UtcResolver,
    ) -> Option<Countdown> {
        let countdown = next_event(now, occurrences, resolver);
        let text = render(&countdown);

        if self.last.as_ref() == Some(&text) {
            return None;
        }

        self.last = Some(text);
        Some(countdown)
    }
}

/// One-line countdown text, e.g. "Office Hours starts in 2 hours".
pub fn render(countdown: &Countdown) -> String {
    match countdown {
        Countdown::Upcoming {
            event, remaining, ..
        } => format!("{} starts in {}", event.title, format_remaining(*remaining)),
        Countdown::None => "No upcoming events this week".to_string(),
    }
}
