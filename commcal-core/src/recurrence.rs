//! Recurrence expansion for feed events.
//!
//! Expands a recurring event into its concrete occurrences. The source event
//! is always occurrence zero; each following step is derived from the
//! source date, so monthly steps keep the original day-of-month where the
//! target month has it.

use chrono::{Duration, Months, NaiveDate};
use tracing::{debug, warn};

use crate::event::{Event, Frequency, Recurrence};

/// Most occurrences generated per recurring event, on top of the source event.
pub const MAX_RECURRENCE_STEPS: u32 = 52;

/// Horizon used when a recurrence has no `until`.
const DEFAULT_HORIZON_MONTHS: u32 = 12;

/// Expand one event into its ordered occurrences.
///
/// - Non-recurring events yield themselves, unchanged.
/// - Recurring events yield the source event followed by at most
///   [`MAX_RECURRENCE_STEPS`] occurrences, none later than `until`
///   (inclusive, default one year after the first date).
/// - A malformed rule (unknown frequency, interval below 1) yields only the
///   source event.
pub fn expand_event(event: &Event) -> Vec<Event> {
    let mut occurrences = vec![event.clone()];

    let Some(recurrence) = &event.recurrence else {
        return occurrences;
    };

    if recurrence.interval < 1 {
        warn!(
            uid = %event.uid,
            interval = recurrence.interval,
            "Ignoring recurrence with non-positive interval"
        );
        return occurrences;
    }

    if let Frequency::Unknown(frequency) = &recurrence.frequency {
        warn!(uid = %event.uid, %frequency, "Ignoring recurrence with unknown frequency");
        return occurrences;
    }

    let until = recurrence.until.unwrap_or_else(|| default_until(event.date));

    for step in 1..=MAX_RECURRENCE_STEPS {
        let Some(date) = step_date(event.date, recurrence, step) else {
            break;
        };
        if date > until {
            break;
        }
        occurrences.push(event.occurrence_on(date));
    }

    debug!(uid = %event.uid, count = occurrences.len(), "Expanded recurring event");

    occurrences
}

/// Expand every event of a feed, keeping feed order.
pub fn expand_all(events: &[Event]) -> Vec<Event> {
    events.iter().flat_map(expand_event).collect()
}

/// Date of the `step`-th repeat of a rule anchored at `start`.
/// None when the date is not representable.
fn step_date(start: NaiveDate, recurrence: &Recurrence, step: u32) -> Option<NaiveDate> {
    let n = recurrence.interval.checked_mul(i64::from(step))?;

    match recurrence.frequency {
        Frequency::Daily => start.checked_add_signed(Duration::try_days(n)?),
        Frequency::Weekly => start.checked_add_signed(Duration::try_weeks(n)?),
        // chrono clamps to the last day of shorter months (Jan 31 -> Feb 28)
        Frequency::Monthly => start.checked_add_months(Months::new(u32::try_from(n).ok()?)),
        Frequency::Unknown(_) => None,
    }
}

fn default_until(start: NaiveDate) -> NaiveDate {
    start
        .checked_add_months(Months::new(DEFAULT_HORIZON_MONTHS))
        .unwrap_or(NaiveDate::MAX)
}
