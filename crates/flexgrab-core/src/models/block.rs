//! Scheduled work blocks offered by the service.

use serde::{Deserialize, Serialize};

/// A scheduled work block offered for grabbing.
///
/// The server reports rate and duration as display strings ("$72",
/// "4h"); the helper methods parse them into numbers for sorting and
/// filtering, yielding `0.0` when the format is unexpected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    pub date: String,
    pub time_range: String,
    pub rate: String,
    pub duration: String,
    pub location: String,
}

impl Block {
    /// Duration in hours parsed from the "4h" display form.
    pub fn duration_hours(&self) -> f64 {
        self.duration
            .trim_end_matches('h')
            .parse()
            .unwrap_or_default()
    }

    /// Pay amount parsed from the "$72" display form.
    pub fn pay_amount(&self) -> f64 {
        self.rate.trim_start_matches('$').parse().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_block() -> Block {
        Block {
            id: "b1".to_string(),
            date: "2025-03-15".to_string(),
            time_range: "10:00 - 14:00".to_string(),
            rate: "$72".to_string(),
            duration: "4h".to_string(),
            location: "DSE4".to_string(),
        }
    }

    #[test]
    fn parses_duration_and_rate() {
        let block = sample_block();
        assert_eq!(block.duration_hours(), 4.0);
        assert_eq!(block.pay_amount(), 72.0);
    }

    #[test]
    fn unparseable_values_default_to_zero() {
        let mut block = sample_block();
        block.duration = "unknown".to_string();
        block.rate = "n/a".to_string();
        assert_eq!(block.duration_hours(), 0.0);
        assert_eq!(block.pay_amount(), 0.0);
    }

    #[test]
    fn wire_format_uses_camel_case() {
        let value = serde_json::to_value(sample_block()).unwrap();
        assert_eq!(value["timeRange"], "10:00 - 14:00");
    }
}
