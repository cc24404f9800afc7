//! Terminal rendering of the current-conditions panel and the two
//! 24-hour tables.

use chrono::Utc;
use chrono_tz::Tz;
use skywatch_core::format::{
    PLACEHOLDER, format_full_timestamp, format_hour_label, format_rain_chance, format_temp,
    format_wind, icon_glyph, resolve_timezone,
};
use skywatch_core::{HourRecord, TimelinePayload, UnitGroup, select_windows};

pub const EMPTY_WINDOW_MESSAGE: &str = "No data available for this period.";

/// Render the full report: current conditions plus the previous/next
/// 24-hour tables. `query` is the fallback place name when the provider
/// echoed nothing back.
pub fn render_report(payload: &TimelinePayload, units: UnitGroup, query: &str) -> String {
    let tz = resolve_timezone(payload.timezone.as_deref());
    let windows = select_windows(payload);

    let mut out = current_panel(payload, units, query);
    out.push('\n');
    out.push_str(&window_table("Previous 24 hours", &windows.previous, tz, units));
    out.push('\n');
    out.push_str(&window_table("Next 24 hours", &windows.next, tz, units));
    out
}

fn current_panel(payload: &TimelinePayload, units: UnitGroup, query: &str) -> String {
    let cc = payload.current_conditions.clone().unwrap_or_default();
    let tz = resolve_timezone(payload.timezone.as_deref());

    let place = match payload.place_name() {
        Some(name) if !name.trim().is_empty() => name,
        _ if !query.trim().is_empty() => query,
        _ => PLACEHOLDER,
    };

    // Without a current-conditions timestamp the report is stamped with
    // the moment it was fetched.
    let as_of_epoch = cc.datetime_epoch.unwrap_or_else(|| Utc::now().timestamp());
    let as_of = format_full_timestamp(as_of_epoch, tz);

    let mut out = String::new();
    out.push_str(&format!("{place}\n"));
    out.push_str(&format!("As of {as_of} ({tz})\n\n"));
    out.push_str(&format!(
        "  {}  {}\n",
        icon_glyph(cc.icon.as_deref()),
        format_temp(cc.temp, units)
    ));
    out.push_str(&format!(
        "  Wind {}  ·  Rain chance {}  ·  {}\n",
        format_wind(cc.windspeed, units),
        format_rain_chance(cc.precipprob),
        cc.conditions.as_deref().unwrap_or(PLACEHOLDER)
    ));
    out
}

fn window_table(title: &str, rows: &[HourRecord], tz: Tz, units: UnitGroup) -> String {
    let mut out = String::new();
    out.push_str(&format!("{title}\n"));
    out.push_str(&format!(
        "{:<12} {:>7} {:>8} {:>6}  {}\n",
        "Time", "Temp", "Wind", "Rain", "Conditions"
    ));

    if rows.is_empty() {
        out.push_str(&format!("  {EMPTY_WINDOW_MESSAGE}\n"));
        return out;
    }

    for row in rows {
        let time = match row.datetime_epoch {
            Some(epoch) => format_hour_label(epoch, tz),
            None => PLACEHOLDER.to_string(),
        };

        out.push_str(&format!(
            "{time:<12} {:>7} {:>8} {:>6}  {} {}\n",
            format_temp(row.temp, units),
            format_wind(row.windspeed, units),
            format_rain_chance(row.precipprob),
            icon_glyph(row.icon.as_deref()),
            row.conditions.as_deref().unwrap_or(PLACEHOLDER),
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use skywatch_core::DayRecord;

    fn hour(epoch: i64, temp: f64) -> HourRecord {
        HourRecord {
            datetime_epoch: Some(epoch),
            temp: Some(temp),
            windspeed: Some(13.0),
            precipprob: Some(20.0),
            conditions: Some("Partially cloudy".to_string()),
            icon: Some("partly-cloudy-day".to_string()),
        }
    }

    #[test]
    fn empty_window_renders_single_placeholder_row() {
        let table = window_table("Previous 24 hours", &[], Tz::UTC, UnitGroup::Metric);

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3, "title, header, placeholder row:\n{table}");
        assert!(lines[2].contains(EMPTY_WINDOW_MESSAGE));
    }

    #[test]
    fn table_rows_carry_formatted_values() {
        // 2023-11-14 12:00:00 UTC.
        let rows = vec![hour(1_699_963_200, 4.6)];
        let table = window_table("Next 24 hours", &rows, Tz::UTC, UnitGroup::Metric);

        assert!(table.contains("Tue 12:00"));
        assert!(table.contains("5°C"));
        assert!(table.contains("13 kph"));
        assert!(table.contains("20%"));
        assert!(table.contains("Partially cloudy"));
    }

    #[test]
    fn report_falls_back_to_query_for_place_name() {
        let payload = TimelinePayload {
            current_conditions: Some(hour(1_699_963_200, 4.6)),
            ..TimelinePayload::default()
        };

        let report = render_report(&payload, UnitGroup::Metric, "kyiv");

        assert!(report.starts_with("kyiv\n"));
        assert!(report.contains("As of "));
        assert!(report.contains("(UTC)"));
    }

    #[test]
    fn report_renders_both_windows() {
        let now = 1_699_963_200;
        let payload = TimelinePayload {
            resolved_address: Some("Kyiv, Ukraine".to_string()),
            address: None,
            timezone: Some("Europe/Kyiv".to_string()),
            current_conditions: Some(hour(now, 4.6)),
            days: vec![DayRecord { hours: vec![hour(now - 3600, 4.1), hour(now + 3600, 5.0)] }],
        };

        let report = render_report(&payload, UnitGroup::Metric, "kyiv");

        assert!(report.starts_with("Kyiv, Ukraine\n"));
        assert!(report.contains("Previous 24 hours"));
        assert!(report.contains("Next 24 hours"));
        // 12:00 UTC is 14:00 in Kyiv; the previous row is an hour earlier.
        assert!(report.contains("Tue 13:00"));
        assert!(report.contains("Tue 15:00"));
        assert!(!report.contains(EMPTY_WINDOW_MESSAGE));
    }

    #[test]
    fn missing_current_fields_render_placeholders() {
        let payload = TimelinePayload::default();

        let report = render_report(&payload, UnitGroup::Metric, "");

        assert!(report.starts_with(&format!("{PLACEHOLDER}\n")));
        // No current timestamp: both windows are empty by policy.
        assert_eq!(report.matches(EMPTY_WINDOW_MESSAGE).count(), 2);
    }
}
