//! Slicing the hourly series into the 24 hours around "now".

use crate::model::{HourRecord, TimelinePayload};

/// Seconds in one 24-hour window.
pub const WINDOW_SECONDS: i64 = 24 * 3600;

/// The hourly series partitioned around the current-conditions timestamp.
#[derive(Debug, Clone, Default)]
pub struct HourlyWindows {
    /// Records in `[now - 24h, now)`, ascending.
    pub previous: Vec<HourRecord>,
    /// Records in `[now, now + 24h)`, ascending. A record exactly at `now`
    /// lands here, never in `previous`.
    pub next: Vec<HourRecord>,
}

/// Partition the payload's hourly records around the current-conditions
/// timestamp.
///
/// Hours may span several days with arbitrary gaps; they are flattened into
/// one series and sorted before slicing. Records without a timestamp are
/// dropped. Duplicate timestamps are not deduplicated. A payload without a
/// current-conditions timestamp yields two empty windows rather than an
/// error.
pub fn select_windows(payload: &TimelinePayload) -> HourlyWindows {
    let Some(now) = payload.current_conditions.as_ref().and_then(|cc| cc.datetime_epoch) else {
        return HourlyWindows::default();
    };

    let mut hours: Vec<HourRecord> = payload
        .days
        .iter()
        .flat_map(|day| day.hours.iter())
        .filter(|hour| hour.datetime_epoch.is_some())
        .cloned()
        .collect();

    hours.sort_by_key(|hour| hour.datetime_epoch);

    let start_prev = now - WINDOW_SECONDS;
    let end_next = now + WINDOW_SECONDS;

    let mut windows = HourlyWindows::default();
    for hour in hours {
        // Filter above guarantees the timestamp is present.
        let Some(ts) = hour.datetime_epoch else { continue };

        if ts >= start_prev && ts < now {
            windows.previous.push(hour);
        } else if ts >= now && ts < end_next {
            windows.next.push(hour);
        }
    }

    windows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DayRecord;

    fn hour(epoch: i64) -> HourRecord {
        HourRecord { datetime_epoch: Some(epoch), ..HourRecord::default() }
    }

    fn payload_with(now: Option<i64>, hours: Vec<HourRecord>) -> TimelinePayload {
        TimelinePayload {
            current_conditions: now.map(hour),
            days: vec![DayRecord { hours }],
            ..TimelinePayload::default()
        }
    }

    fn epochs(records: &[HourRecord]) -> Vec<i64> {
        records.iter().filter_map(|h| h.datetime_epoch).collect()
    }

    #[test]
    fn boundary_record_lands_in_next_window() {
        let now = 1_000_000;
        let payload = payload_with(
            Some(now),
            vec![hour(999_000), hour(1_000_000), hour(1_086_000), hour(1_086_500)],
        );

        let windows = select_windows(&payload);

        assert_eq!(epochs(&windows.previous), vec![999_000]);
        assert_eq!(epochs(&windows.next), vec![1_000_000, 1_086_000]);
    }

    #[test]
    fn lower_bound_of_previous_window_is_inclusive() {
        let now = 1_000_000;
        let payload =
            payload_with(Some(now), vec![hour(now - WINDOW_SECONDS - 1), hour(now - WINDOW_SECONDS)]);

        let windows = select_windows(&payload);

        assert_eq!(epochs(&windows.previous), vec![now - WINDOW_SECONDS]);
        assert!(windows.next.is_empty());
    }

    #[test]
    fn missing_current_timestamp_yields_empty_windows() {
        let payload = payload_with(None, vec![hour(100), hour(200)]);

        let windows = select_windows(&payload);

        assert!(windows.previous.is_empty());
        assert!(windows.next.is_empty());
    }

    #[test]
    fn absent_current_conditions_yields_empty_windows() {
        let payload = TimelinePayload {
            days: vec![DayRecord { hours: vec![hour(100)] }],
            ..TimelinePayload::default()
        };

        let windows = select_windows(&payload);

        assert!(windows.previous.is_empty());
        assert!(windows.next.is_empty());
    }

    #[test]
    fn hours_without_timestamps_are_dropped() {
        let now = 1_000_000;
        let payload = payload_with(
            Some(now),
            vec![HourRecord::default(), hour(now - 3600), HourRecord::default()],
        );

        let windows = select_windows(&payload);

        assert_eq!(epochs(&windows.previous), vec![now - 3600]);
        assert!(windows.next.is_empty());
    }

    #[test]
    fn hours_are_merged_across_days_and_sorted() {
        let now = 1_000_000;
        let payload = TimelinePayload {
            current_conditions: Some(hour(now)),
            days: vec![
                DayRecord { hours: vec![hour(now + 7200), hour(now - 3600)] },
                DayRecord { hours: vec![hour(now + 3600), hour(now - 7200)] },
            ],
            ..TimelinePayload::default()
        };

        let windows = select_windows(&payload);

        assert_eq!(epochs(&windows.previous), vec![now - 7200, now - 3600]);
        assert_eq!(epochs(&windows.next), vec![now + 3600, now + 7200]);
    }

    #[test]
    fn duplicate_timestamps_propagate() {
        let now = 1_000_000;
        let payload = TimelinePayload {
            current_conditions: Some(hour(now)),
            days: vec![
                DayRecord { hours: vec![hour(now - 3600)] },
                DayRecord { hours: vec![hour(now - 3600)] },
            ],
            ..TimelinePayload::default()
        };

        let windows = select_windows(&payload);

        assert_eq!(epochs(&windows.previous), vec![now - 3600, now - 3600]);
    }
}
