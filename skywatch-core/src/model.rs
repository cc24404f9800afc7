use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Measurement-unit system applied to every displayed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitGroup {
    #[default]
    Metric,
    Us,
    Uk,
}

impl UnitGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitGroup::Metric => "metric",
            UnitGroup::Us => "us",
            UnitGroup::Uk => "uk",
        }
    }

    pub const fn all() -> &'static [UnitGroup] {
        &[UnitGroup::Metric, UnitGroup::Us, UnitGroup::Uk]
    }
}

impl std::fmt::Display for UnitGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitGroup {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "metric" => Ok(UnitGroup::Metric),
            "us" => Ok(UnitGroup::Us),
            "uk" => Ok(UnitGroup::Uk),
            _ => Err(anyhow::anyhow!(
                "Unknown unit group '{value}'. Supported unit groups: metric, us, uk."
            )),
        }
    }
}

/// One time-stamped observation. The provider uses the same field shape for
/// `currentConditions` and for every entry of a day's `hours` array, so a
/// single struct covers both. Every field is optional: the request asks for
/// `options=nonulls`, which drops fields instead of sending null.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourRecord {
    pub datetime_epoch: Option<i64>,
    pub temp: Option<f64>,
    pub windspeed: Option<f64>,
    pub precipprob: Option<f64>,
    pub conditions: Option<String>,
    pub icon: Option<String>,
}

/// One day of the timeline response, carrying its hourly records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DayRecord {
    #[serde(default)]
    pub hours: Vec<HourRecord>,
}

/// Decoded Timeline API response. No schema validation happens on the way
/// in; consumers must treat every field as possibly absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePayload {
    pub resolved_address: Option<String>,
    pub address: Option<String>,
    pub timezone: Option<String>,
    pub current_conditions: Option<HourRecord>,
    #[serde(default)]
    pub days: Vec<DayRecord>,
}

impl TimelinePayload {
    /// Display name for the queried location, preferring the provider's
    /// resolved form over the raw address it echoed back.
    pub fn place_name(&self) -> Option<&str> {
        self.resolved_address.as_deref().or(self.address.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_group_as_str_roundtrip() {
        for ug in UnitGroup::all() {
            let parsed = UnitGroup::try_from(ug.as_str()).expect("roundtrip should succeed");
            assert_eq!(*ug, parsed);
        }
    }

    #[test]
    fn unknown_unit_group_error() {
        let err = UnitGroup::try_from("imperial").unwrap_err();
        assert!(err.to_string().contains("Unknown unit group"));
    }

    #[test]
    fn payload_tolerates_sparse_fields() {
        // options=nonulls means absent keys, not nulls.
        let json = r#"{
            "timezone": "Europe/Kyiv",
            "currentConditions": { "datetimeEpoch": 1700000000, "temp": 4.6 },
            "days": [
                { "hours": [ { "datetimeEpoch": 1699996400 }, { "temp": 3.1 } ] },
                {}
            ]
        }"#;

        let payload: TimelinePayload = serde_json::from_str(json).expect("sparse payload parses");

        assert_eq!(payload.place_name(), None);
        assert_eq!(payload.timezone.as_deref(), Some("Europe/Kyiv"));

        let cc = payload.current_conditions.expect("current conditions present");
        assert_eq!(cc.datetime_epoch, Some(1700000000));
        assert_eq!(cc.windspeed, None);

        assert_eq!(payload.days.len(), 2);
        assert_eq!(payload.days[0].hours.len(), 2);
        assert_eq!(payload.days[0].hours[1].datetime_epoch, None);
        assert!(payload.days[1].hours.is_empty());
    }

    #[test]
    fn place_name_prefers_resolved_address() {
        let payload = TimelinePayload {
            resolved_address: Some("Kyiv, Ukraine".to_string()),
            address: Some("kyiv".to_string()),
            ..TimelinePayload::default()
        };
        assert_eq!(payload.place_name(), Some("Kyiv, Ukraine"));

        let payload = TimelinePayload {
            address: Some("kyiv".to_string()),
            ..TimelinePayload::default()
        };
        assert_eq!(payload.place_name(), Some("kyiv"));
    }
}
