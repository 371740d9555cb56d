//! Day windows and interval primitives.
//!
//! Every comparison the analyzer makes goes through these helpers. Instants are
//! stored in UTC; "local" always means the configured `FixedOffset`.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Longest block a single candidate may occupy: one leap year.
pub const MAX_SPAN_HOURS: f64 = 24.0 * 366.0;

/// One local calendar day: `[midnight, 23:59:59.999]`, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// The local day containing `instant`.
    pub fn containing(instant: DateTime<Utc>, offset: &FixedOffset) -> Self {
        let date = instant.with_timezone(offset).date_naive();
        Self::for_date(date, offset)
    }

    /// The window for a local calendar date.
    pub fn for_date(date: NaiveDate, offset: &FixedOffset) -> Self {
        let start = local_to_utc(date.and_time(NaiveTime::MIN), offset);
        Self {
            start,
            end: start + Duration::days(1) - Duration::milliseconds(1),
        }
    }

    /// Whether `instant` falls inside the window (inclusive on both ends).
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// The instant at `hour:minute` local time on this day.
    pub fn at(&self, hour: u32, minute: u32) -> DateTime<Utc> {
        self.start + Duration::hours(hour as i64) + Duration::minutes(minute as i64)
    }

    /// Human-readable label, e.g. `Fri Jan 10 2025`.
    pub fn label(&self, offset: &FixedOffset) -> String {
        day_label(self.start, offset)
    }
}

/// Label for the local day of `instant`, e.g. `Fri Jan 10 2025`.
pub fn day_label(instant: DateTime<Utc>, offset: &FixedOffset) -> String {
    instant.with_timezone(offset).format("%a %b %d %Y").to_string()
}

/// Local wall-clock time of `instant`, e.g. `14:30`.
pub fn clock_label(instant: DateTime<Utc>, offset: &FixedOffset) -> String {
    instant.with_timezone(offset).format("%H:%M").to_string()
}

/// Length of `[start, end)` in fractional hours.
pub fn duration_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Turn fractional hours into a duration, clamped to `[0, MAX_SPAN_HOURS]`.
///
/// NaN and negative input give zero; infinite input gives the cap.
pub fn hours_span(hours: f64) -> Duration {
    let hours = if hours.is_nan() { 0.0 } else { hours.clamp(0.0, MAX_SPAN_HOURS) };
    Duration::try_milliseconds((hours * MILLIS_PER_HOUR).round() as i64).unwrap_or_else(Duration::zero)
}

/// `instant + span`, saturating at the latest representable instant.
pub fn saturating_add(instant: DateTime<Utc>, span: Duration) -> DateTime<Utc> {
    instant.checked_add_signed(span).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Three-way overlap test between a candidate slot and a busy interval.
///
/// True when the slot starts inside `[busy_start, busy_end)`, ends inside
/// `(busy_start, busy_end]`, or fully contains the busy interval.
pub fn slot_overlaps(
    slot_start: DateTime<Utc>,
    slot_end: DateTime<Utc>,
    busy_start: DateTime<Utc>,
    busy_end: DateTime<Utc>,
) -> bool {
    (slot_start >= busy_start && slot_start < busy_end)
        || (slot_end > busy_start && slot_end <= busy_end)
        || (slot_start <= busy_start && slot_end >= busy_end)
}

/// Offset of the machine's local time zone right now.
pub fn local_offset() -> FixedOffset {
    *Local::now().offset()
}

/// Parse an instant given on the command line or in JSON input.
///
/// Accepts RFC 3339 (`2025-01-10T09:00:00+07:00`), a naive local date-time
/// (`2025-01-10T09:00` or `2025-01-10 09:00:00`) or a bare date (local
/// midnight).
pub fn parse_instant(input: &str, offset: &FixedOffset) -> Result<DateTime<Utc>, ValidationError> {
    let trimmed = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(local_to_utc(naive, offset));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(local_to_utc(date.and_time(NaiveTime::MIN), offset));
    }

    Err(ValidationError::InvalidInstant {
        input: input.to_string(),
    })
}

fn local_to_utc(naive: NaiveDateTime, offset: &FixedOffset) -> DateTime<Utc> {
    (naive - Duration::seconds(offset.local_minus_utc() as i64)).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn day_window_spans_local_midnight_to_last_millisecond() {
        let noon = Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap();
        let window = DayWindow::containing(noon, &utc());

        assert_eq!(window.start, Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap());
        assert_eq!(
            window.end,
            Utc.with_ymd_and_hms(2025, 1, 10, 23, 59, 59).unwrap() + Duration::milliseconds(999)
        );
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        assert!(!window.contains(window.end + Duration::milliseconds(1)));
    }

    #[test]
    fn day_window_respects_offset() {
        // 2025-01-10 20:00 UTC is already Jan 11 in UTC+7
        let instant = Utc.with_ymd_and_hms(2025, 1, 10, 20, 0, 0).unwrap();
        let jakarta = FixedOffset::east_opt(7 * 3600).unwrap();
        let window = DayWindow::containing(instant, &jakarta);

        assert_eq!(window.start, Utc.with_ymd_and_hms(2025, 1, 10, 17, 0, 0).unwrap());
        assert_eq!(window.label(&jakarta), "Sat Jan 11 2025");
    }

    #[test]
    fn duration_hours_is_fractional() {
        let start = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();
        assert_eq!(duration_hours(start, start + Duration::minutes(90)), 1.5);
        assert_eq!(duration_hours(start, start), 0.0);
    }

    #[test]
    fn hours_span_clamps_out_of_range_input() {
        assert_eq!(hours_span(1.5), Duration::minutes(90));
        assert_eq!(hours_span(-3.0), Duration::zero());
        assert_eq!(hours_span(f64::NAN), Duration::zero());
        assert_eq!(hours_span(1e13), Duration::hours(24 * 366));
        assert_eq!(hours_span(f64::INFINITY), Duration::hours(24 * 366));
    }

    #[test]
    fn saturating_add_stops_at_max() {
        let start = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();
        assert_eq!(saturating_add(start, Duration::hours(1)), start + Duration::hours(1));
        assert_eq!(saturating_add(DateTime::<Utc>::MAX_UTC, Duration::hours(1)), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn three_way_overlap() {
        let at = |h: u32, m: u32| Utc.with_ymd_and_hms(2025, 1, 10, h, m, 0).unwrap();

        // starts inside
        assert!(slot_overlaps(at(9, 30), at(10, 30), at(9, 0), at(10, 0)));
        // ends inside
        assert!(slot_overlaps(at(8, 30), at(9, 30), at(9, 0), at(10, 0)));
        // contains
        assert!(slot_overlaps(at(8, 0), at(11, 0), at(9, 0), at(10, 0)));
        // touching edges are free
        assert!(!slot_overlaps(at(8, 0), at(9, 0), at(9, 0), at(10, 0)));
        assert!(!slot_overlaps(at(10, 0), at(11, 0), at(9, 0), at(10, 0)));
    }

    #[test]
    fn parse_instant_accepts_supported_forms() {
        let offset = FixedOffset::east_opt(7 * 3600).unwrap();
        let expected = Utc.with_ymd_and_hms(2025, 1, 10, 2, 0, 0).unwrap();

        assert_eq!(parse_instant("2025-01-10T09:00", &offset).unwrap(), expected);
        assert_eq!(parse_instant("2025-01-10 09:00:00", &offset).unwrap(), expected);
        assert_eq!(parse_instant("2025-01-10T09:00:00+07:00", &offset).unwrap(), expected);
        assert_eq!(
            parse_instant("2025-01-10", &offset).unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 9, 17, 0, 0).unwrap()
        );
        assert!(parse_instant("next tuesday", &offset).is_err());
    }
}
