//! Month agenda built from expanded occurrences.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::event::Event;

/// Occurrences of one month, grouped by day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthAgenda {
    pub year: i32,
    pub month: u32,
    /// Days in ascending order, each with at least one event
    pub days: Vec<AgendaDay>,
}

/// The occurrences of a single day, sorted by start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub events: Vec<Event>,
}

impl MonthAgenda {
    /// True when the month has no events; callers show a "no events" state.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn event_count(&self) -> usize {
        self.days.iter().map(|d| d.events.len()).sum()
    }

    /// All occurrences of the month in agenda order.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.days.iter().flat_map(|d| d.events.iter())
    }
}

/// Group the occurrences falling in `year`/`month` by day.
///
/// Within a day, occurrences are ordered by start time; ties keep their
/// input order.
pub fn month_agenda(occurrences: &[Event], year: i32, month: u32) -> MonthAgenda {
    let mut by_date: BTreeMap<NaiveDate, Vec<Event>> = BTreeMap::new();

    for event in occurrences
        .iter()
        .filter(|e| e.date.year() == year && e.date.month() == month)
    {
        by_date.entry(event.date).or_default().push(event.clone());
    }

    let days = by_date
        .into_iter()
        .map(|(date, mut events)| {
            events.sort_by_key(|e| e.start_time);
            AgendaDay { date, events }
        })
        .collect();

    MonthAgenda { year, month, days }
}

/// Occurrences on a single day, ordered by start time.
pub fn day_events(occurrences: &[Event], date: NaiveDate) -> Vec<Event> {
    let mut events: Vec<Event> = occurrences
        .iter()
        .filter(|e| e.date == date)
        .cloned()
        .collect();
    events.sort_by_key(|e| e.start_time);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Frequency, Recurrence};
    use crate::recurrence::expand_all;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_event(uid: &str, day: NaiveDate, hour: u32) -> Event {
        Event {
            uid: uid.to_string(),
            date: day,
            start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(hour + 1, 0, 0).unwrap(),
            timezone: "America/Chicago".to_string(),
            title: uid.to_string(),
            description: String::new(),
            event_type: None,
            location_type: None,
            location: None,
            url: None,
            recurrence: None,
        }
    }

    #[test]
    fn test_groups_by_day_and_sorts() {
        let occurrences = vec![
            make_event("late", date(2025, 3, 10), 15),
            make_event("april", date(2025, 4, 1), 9),
            make_event("early", date(2025, 3, 10), 8),
            make_event("first-day", date(2025, 3, 1), 12),
            make_event("february", date(2025, 2, 28), 9),
        ];

        let agenda = month_agenda(&occurrences, 2025, 3);

        let days: Vec<NaiveDate> = agenda.days.iter().map(|d| d.date).collect();
        assert_eq!(days, vec![date(2025, 3, 1), date(2025, 3, 10)]);

        let uids: Vec<&str> = agenda.events().map(|e| e.uid.as_str()).collect();
        assert_eq!(uids, vec!["first-day", "early", "late"]);
        assert_eq!(agenda.event_count(), 3);
    }

    #[test]
    fn test_same_start_time_keeps_input_order() {
        let occurrences = vec![
            make_event("b", date(2025, 3, 10), 9),
            make_event("a", date(2025, 3, 10), 9),
        ];

        let agenda = month_agenda(&occurrences, 2025, 3);
        let uids: Vec<&str> = agenda.events().map(|e| e.uid.as_str()).collect();

        assert_eq!(uids, vec!["b", "a"]);
    }

    #[test]
    fn test_empty_month_is_valid() {
        let occurrences = vec![make_event("march", date(2025, 3, 10), 9)];
        let agenda = month_agenda(&occurrences, 2025, 5);

        assert!(agenda.is_empty());
        assert_eq!(agenda.event_count(), 0);
        assert_eq!((agenda.year, agenda.month), (2025, 5));
    }

    #[test]
    fn test_same_month_of_other_year_is_excluded() {
        let occurrences = vec![make_event("next-year", date(2026, 3, 10), 9)];
        assert!(month_agenda(&occurrences, 2025, 3).is_empty());
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let occurrences = vec![
            make_event("b", date(2025, 3, 10), 15),
            make_event("a", date(2025, 3, 10), 9),
            make_event("c", date(2025, 3, 2), 9),
        ];

        let first = month_agenda(&occurrences, 2025, 3);
        let second = month_agenda(&occurrences, 2025, 3);

        assert_eq!(first, second);
    }

    #[test]
    fn test_weekly_scenario_groups_under_march() {
        let mut event = make_event("office-hours", date(2025, 3, 3), 9);
        event.recurrence = Some(Recurrence {
            frequency: Frequency::Weekly,
            interval: 1,
            until: Some(date(2025, 3, 24)),
        });

        let agenda = month_agenda(&expand_all(&[event]), 2025, 3);
        let days: Vec<NaiveDate> = agenda.days.iter().map(|d| d.date).collect();

        assert_eq!(
            days,
            vec![
                date(2025, 3, 3),
                date(2025, 3, 10),
                date(2025, 3, 17),
                date(2025, 3, 24)
            ]
        );
        assert!(agenda.days.iter().all(|d| d.events.len() == 1));
    }

    #[test]
    fn test_day_events() {
        let occurrences = vec![
            make_event("late", date(2025, 3, 10), 15),
            make_event("other-day", date(2025, 3, 11), 9),
            make_event("early", date(2025, 3, 10), 8),
        ];

        let events = day_events(&occurrences, date(2025, 3, 10));
        let uids: Vec<&str> = events.iter().map(|e| e.uid.as_str()).collect();

        assert_eq!(uids, vec!["early", "late"]);
    }
}
