//! Local-time to UTC resolution.
//!
//! Two strategies live side by side and are used by different call sites:
//! - [`FixedOffsetResolver`] applies one configured offset to every event.
//!   The UTC calendar export uses it.
//! - [`ZoneAwareResolver`] resolves each event's IANA zone, including DST.
//!   The countdown uses it.
//!
//! Their results differ for any event outside the fixed offset's zone, or
//! inside it during daylight saving time.

use chrono::{
    DateTime, Duration, FixedOffset, LocalResult, NaiveDate, NaiveTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;
use tracing::warn;

use crate::error::{CommCalError, CommCalResult};
use crate::event::Event;

/// Converts an event-local wall clock time into an absolute instant.
pub trait UtcResolver {
    fn to_utc(&self, date: NaiveDate, time: NaiveTime, tzid: &str) -> DateTime<Utc>;

    fn start_utc(&self, event: &Event) -> DateTime<Utc> {
        self.to_utc(event.date, event.start_time, &event.timezone)
    }

    fn end_utc(&self, event: &Event) -> DateTime<Utc> {
        self.to_utc(event.date, event.end_time, &event.timezone)
    }
}

/// Treats every local time as being at one fixed UTC offset.
///
/// The event's own timezone is ignored, and so is daylight saving time.
/// Calendar clients that reject TZID-qualified times get these values.
// TODO: confirm with the site maintainers whether the UTC export should
// switch to per-event zones; until then the fixed offset is kept as published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedOffsetResolver {
    offset: FixedOffset,
}

/// UTC-05:00
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = -300;

impl FixedOffsetResolver {
    pub fn new(offset: FixedOffset) -> Self {
        FixedOffsetResolver { offset }
    }

    pub fn from_minutes(minutes: i32) -> CommCalResult<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::new)
            .ok_or_else(|| CommCalError::Config(format!("UTC offset out of range: {minutes} minutes")))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Default for FixedOffsetResolver {
    fn default() -> Self {
        let offset = FixedOffset::east_opt(DEFAULT_UTC_OFFSET_MINUTES * 60)
            .unwrap_or_else(|| Utc.fix());
        FixedOffsetResolver { offset }
    }
}

impl UtcResolver for FixedOffsetResolver {
    fn to_utc(&self, date: NaiveDate, time: NaiveTime, _tzid: &str) -> DateTime<Utc> {
        let local = date.and_time(time);
        (local - Duration::seconds(i64::from(self.offset.local_minus_utc()))).and_utc()
    }
}

/// Resolves each event's IANA timezone with chrono-tz.
///
/// - Ambiguous times (DST fall-back) resolve to the earlier instant.
/// - Non-existent times (DST spring-forward gap) are moved one hour later.
/// - Unknown zones fall back to reading the wall clock time as UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneAwareResolver;

impl UtcResolver for ZoneAwareResolver {
    fn to_utc(&self, date: NaiveDate, time: NaiveTime, tzid: &str) -> DateTime<Utc> {
        let local = date.and_time(time);

        let Ok(tz) = tzid.parse::<Tz>() else {
            warn!(%tzid, "Unknown timezone, using naive local time");
            return local.and_utc();
        };

        match tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
            LocalResult::None => tz
                .from_local_datetime(&(local + Duration::hours(1)))
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|| {
                    warn!(%tzid, %local, "Could not resolve local time, using naive local time");
                    local.and_utc()
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_fixed_offset_ignores_event_timezone() {
        let resolver = FixedOffsetResolver::default();

        let chicago = resolver.to_utc(date(2025, 3, 3), time(9, 0), "America/Chicago");
        let tokyo = resolver.to_utc(date(2025, 3, 3), time(9, 0), "Asia/Tokyo");

        assert_eq!(chicago, Utc.with_ymd_and_hms(2025, 3, 3, 14, 0, 0).unwrap());
        assert_eq!(chicago, tokyo);
    }

    #[test]
    fn test_fixed_offset_ignores_daylight_saving() {
        let resolver = FixedOffsetResolver::default();
        let summer = resolver.to_utc(date(2025, 7, 1), time(9, 0), "America/New_York");

        assert_eq!(summer, Utc.with_ymd_and_hms(2025, 7, 1, 14, 0, 0).unwrap());
    }

    #[test]
    fn test_fixed_offset_from_minutes() {
        let resolver = FixedOffsetResolver::from_minutes(60).unwrap();
        let utc = resolver.to_utc(date(2025, 3, 3), time(0, 30), "Europe/Berlin");

        assert_eq!(utc, Utc.with_ymd_and_hms(2025, 3, 2, 23, 30, 0).unwrap());
        assert!(FixedOffsetResolver::from_minutes(24 * 60).is_err());
    }

    #[test]
    fn test_zone_aware_follows_daylight_saving() {
        let resolver = ZoneAwareResolver;

        // CST (UTC-6) before the 2025-03-09 switch, CDT (UTC-5) after
        let winter = resolver.to_utc(date(2025, 3, 3), time(9, 0), "America/Chicago");
        let spring = resolver.to_utc(date(2025, 3, 10), time(9, 0), "America/Chicago");

        assert_eq!(winter, Utc.with_ymd_and_hms(2025, 3, 3, 15, 0, 0).unwrap());
        assert_eq!(spring, Utc.with_ymd_and_hms(2025, 3, 10, 14, 0, 0).unwrap());
    }

    #[test]
    fn test_zone_aware_ambiguous_time_uses_earliest() {
        // 01:30 happens twice on 2025-11-02 in Chicago
        let utc = ZoneAwareResolver.to_utc(date(2025, 11, 2), time(1, 30), "America/Chicago");
        assert_eq!(utc, Utc.with_ymd_and_hms(2025, 11, 2, 6, 30, 0).unwrap());
    }

    #[test]
    fn test_zone_aware_gap_moves_forward() {
        // 02:30 does not exist on 2025-03-09 in Chicago
        let utc = ZoneAwareResolver.to_utc(date(2025, 3, 9), time(2, 30), "America/Chicago");
        assert_eq!(utc, Utc.with_ymd_and_hms(2025, 3, 9, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_zone_aware_unknown_zone_falls_back_to_naive() {
        let utc = ZoneAwareResolver.to_utc(date(2025, 3, 3), time(9, 0), "Mars/Olympus_Mons");
        assert_eq!(utc, Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap());
    }
}
