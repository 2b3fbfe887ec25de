use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Raw transport record as ingested and stored.
///
/// `timestamp` is set at write time (Unix seconds) and is the only key the
/// read path filters on; records older than the recency window are ignored,
/// never deleted. `last_updated` is the human-readable copy of the same
/// instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TransportRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub transport_type: String,
    pub route: String,
    pub destination: String,
    pub current_location: String,
    pub scheduled_arrival_mins: i64,
    pub timestamp: i64,
    pub last_updated: String,
}

/// Client-facing prediction derived from a [`TransportRecord`].
///
/// Built transiently per query response and never persisted. `timestamp` is
/// the prediction instant, not the stored record's ingestion time.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PredictedRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub transport_type: String,
    pub route: String,
    pub destination: String,
    pub current_location: String,
    pub predicted_arrival_mins: i64,
    pub predicted_arrival_text: String,
    pub confidence_score: i64,
    pub confidence_text: String,
    /// Positive = late, negative = early relative to the timetable.
    pub delay_mins: i64,
    pub timestamp: String,
}

/// Human-readable arrival time, singular only at exactly one minute.
pub fn arrival_text(mins: i64) -> String {
    if mins == 1 {
        "1 min".to_string()
    } else {
        format!("{} mins", mins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrival_text_singular_at_one() {
        assert_eq!(arrival_text(1), "1 min");
        assert_eq!(arrival_text(2), "2 mins");
        assert_eq!(arrival_text(15), "15 mins");
    }

    #[test]
    fn transport_record_serializes_type_field() {
        let record = TransportRecord {
            id: "B001".to_string(),
            transport_type: "bus".to_string(),
            route: "380".to_string(),
            destination: "Circular Quay".to_string(),
            current_location: "Town Hall".to_string(),
            scheduled_arrival_mins: 5,
            timestamp: 1_700_000_000,
            last_updated: "2026-08-30T10:00:00+00:00".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "bus");
        assert!(json.get("transport_type").is_none());
    }

    #[test]
    fn transport_record_deserializes_type_field() {
        let json = r#"{
            "id": "T003",
            "type": "train",
            "route": "T4 Eastern Suburbs",
            "destination": "Central",
            "current_location": "Martin Place",
            "scheduled_arrival_mins": 8,
            "timestamp": 1700000000,
            "last_updated": "2026-08-30T10:00:00+00:00"
        }"#;
        let record: TransportRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.transport_type, "train");
        assert_eq!(record.scheduled_arrival_mins, 8);
    }
}
