use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::location::Coordinate;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmergencyContact {
    pub call_status: bool,
    pub message_status: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElderlyInfo {
    pub name: String,
    pub emergency_contact: EmergencyContact,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationStatus {
    pub call: String,
    pub message: String,
}

// Firestore style timestamp
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerTimestamp {
    #[serde(rename = "_seconds")]
    pub seconds: i64,
    #[serde(rename = "_nanoseconds")]
    pub nanoseconds: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallDetectionStatus {
    pub status: bool,
    pub message: String,
    pub timestamp: ServerTimestamp,
}

/// Response of `GET /api/fall-notification`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FallNotification {
    pub latitude: f64,
    pub longitude: f64,
    pub elderly_info: ElderlyInfo,
    pub notification_status: NotificationStatus,
    pub fall_detection_status: FallDetectionStatus,
    pub timestamp: String,
}

impl FallNotification {
    pub fn is_active(&self) -> bool {
        self.fall_detection_status.status
    }

    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    pub fn detected_at(&self) -> Option<DateTime<Utc>> {
        if let Ok(t) = DateTime::parse_from_rfc3339(&self.timestamp) {
            return Some(t.with_timezone(&Utc));
        }

        let ts = &self.fall_detection_status.timestamp;
        if ts.seconds == 0 {
            return None;
        }
        DateTime::from_timestamp(ts.seconds, ts.nanoseconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_payload() {
        let json = r#"{
            "latitude": -5.3634,
            "longitude": 105.3068,
            "elderlyInfo": {"name": "Linda", "emergencyContact": {"callStatus": true, "messageStatus": false}},
            "notificationStatus": {"call": "Calling family", "message": ""},
            "fallDetectionStatus": {"status": true, "message": "Fall detected", "timestamp": {"_seconds": 1732091400, "_nanoseconds": 0}},
            "timestamp": "2024-11-20T08:30:00.000Z"
        }"#;
        let n: FallNotification = serde_json::from_str(json).unwrap();
        assert!(n.is_active());
        assert_eq!(n.elderly_info.name, "Linda");
        assert!(n.elderly_info.emergency_contact.call_status);
        assert_eq!(n.position(), Coordinate::new(-5.3634, 105.3068));
        assert_eq!(
            n.detected_at().map(|t| t.timestamp()),
            Some(1732091400)
        );
    }

    #[test]
    fn partial_payload_is_inactive() {
        let n: FallNotification =
            serde_json::from_str(r#"{"fallDetectionStatus":{"status":false}}"#).unwrap();
        assert!(!n.is_active());
        assert!(n.detected_at().is_none());
    }

    #[test]
    fn falls_back_to_status_timestamp() {
        let n: FallNotification = serde_json::from_str(
            r#"{"fallDetectionStatus":{"status":true,"timestamp":{"_seconds":60,"_nanoseconds":0}}}"#,
        )
        .unwrap();
        assert_eq!(n.detected_at().map(|t| t.timestamp()), Some(60));
    }
}
