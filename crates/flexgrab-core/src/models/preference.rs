//! Block matching preferences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Matching criteria for the server-side grabbing agent.
///
/// A block matches a preference when its duration and hourly rate fall
/// inside the configured bounds and its date and location satisfy the
/// preferred sets. The matching itself runs server-side; this client
/// only creates and edits the criteria.
///
/// Wire format: `_id` for the id, camelCase elsewhere. On creation the
/// client sends a freshly generated id which the server replaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockPreference {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_dates: Option<Vec<DateTime<Utc>>>,
    /// Days of the week, 0 = Sunday through 6 = Saturday.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_days_of_week: Option<Vec<u8>>,
    pub min_duration: f64,
    pub max_duration: f64,
    pub min_hourly_rate: f64,
    pub preferred_locations: Vec<String>,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_format_uses_underscore_id() {
        let pref = BlockPreference {
            id: "p1".to_string(),
            name: "Weekends".to_string(),
            preferred_dates: None,
            preferred_days_of_week: Some(vec![0, 6]),
            min_duration: 2.0,
            max_duration: 4.5,
            min_hourly_rate: 25.0,
            preferred_locations: vec!["DSE4".to_string()],
            active: true,
        };

        let value = serde_json::to_value(&pref).unwrap();
        assert_eq!(value["_id"], "p1");
        assert_eq!(value["preferredDaysOfWeek"], json!([0, 6]));
        assert_eq!(value["minHourlyRate"], 25.0);
        assert!(value.get("preferredDates").is_none());
    }

    #[test]
    fn deserializes_server_payload() {
        let pref: BlockPreference = serde_json::from_value(json!({
            "_id": "p2",
            "name": "Mornings",
            "minDuration": 1.0,
            "maxDuration": 3.0,
            "minHourlyRate": 20.0,
            "preferredLocations": [],
            "active": false
        }))
        .unwrap();
        assert_eq!(pref.id, "p2");
        assert!(pref.preferred_days_of_week.is_none());
        assert!(!pref.active);
    }
}
