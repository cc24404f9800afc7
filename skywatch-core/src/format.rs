//! Value formatting: unit-aware numbers, icon glyphs, and timezone-local
//! timestamps. Formatters never fail; missing data becomes a placeholder.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::model::UnitGroup;

/// Shown wherever a value is missing or unusable.
pub const PLACEHOLDER: &str = "—";

/// Temperature, rounded, with the unit symbol of the active unit system.
/// Visual Crossing reports Fahrenheit only for the `us` unit group.
pub fn format_temp(value: Option<f64>, units: UnitGroup) -> String {
    let unit = match units {
        UnitGroup::Us => "°F",
        UnitGroup::Metric | UnitGroup::Uk => "°C",
    };
    round_with_unit(value, unit, "")
}

/// Wind speed, rounded, with the unit label of the active unit system.
/// Metric and UK groups both report wind in kph.
pub fn format_wind(value: Option<f64>, units: UnitGroup) -> String {
    let unit = match units {
        UnitGroup::Us => "mph",
        UnitGroup::Metric | UnitGroup::Uk => "kph",
    };
    round_with_unit(value, unit, " ")
}

/// Precipitation chance as a rounded percentage.
pub fn format_rain_chance(value: Option<f64>) -> String {
    round_with_unit(value, "%", "")
}

fn round_with_unit(value: Option<f64>, unit: &str, sep: &str) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}{sep}{unit}", round_half_up(v)),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Halves round toward positive infinity: 2.5 becomes 3, -2.5 becomes -2.
fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

/// Glyph for a provider icon code. The code set is closed; anything outside
/// it (including a missing code) maps to the partly-cloudy default.
pub fn icon_glyph(icon: Option<&str>) -> &'static str {
    match icon {
        Some("clear-day") => "☀️",
        Some("clear-night") => "🌙",
        Some("partly-cloudy-day") => "⛅",
        Some("partly-cloudy-night") => "☁️🌙",
        Some("cloudy") => "☁️",
        Some("rain") => "🌧️",
        Some("snow") => "❄️",
        Some("wind") => "💨",
        Some("fog") => "🌫️",
        Some("thunder-rain") => "⛈️",
        Some("thunder-showers-day") => "⛈️",
        Some("thunder-showers-night") => "⛈️",
        Some("showers-day") => "🌦️",
        Some("showers-night") => "🌧️",
        _ => "⛅",
    }
}

/// Resolve the payload's IANA timezone identifier, falling back to UTC when
/// it is absent or unrecognized.
pub fn resolve_timezone(timezone: Option<&str>) -> Tz {
    timezone.and_then(|tz| Tz::from_str(tz).ok()).unwrap_or(Tz::UTC)
}

/// Full date and time for the "as of" header, local to `tz`.
pub fn format_full_timestamp(epoch: i64, tz: Tz) -> String {
    match DateTime::<Utc>::from_timestamp(epoch, 0) {
        Some(dt) => dt.with_timezone(&tz).format("%a, %d %b %Y, %H:%M").to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Compact weekday and time for table rows, local to `tz`.
pub fn format_hour_label(epoch: i64, tz: Tz) -> String {
    match DateTime::<Utc>::from_timestamp(epoch, 0) {
        Some(dt) => dt.with_timezone(&tz).format("%a %H:%M").to_string(),
        None => PLACEHOLDER.to_string(),
    }
}
