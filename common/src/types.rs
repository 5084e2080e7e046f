use crate::device_type::DeviceType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A persisted smart home device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: i64,
    pub owned_by: String,
    pub device_type: DeviceType,
    pub name: String,
    pub description: String,
    pub is_online: bool,
    pub last_alarm_time: Option<DateTime<Utc>>,
    pub last_alarm_reason: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a device.
///
/// `device_type` stays a raw string here so that an unknown value is reported
/// through the validation error map rather than as a JSON parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub device_type: String,
    pub owned_by: String,
}

/// A `DeviceCreate` that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct NewDevice {
    pub name: String,
    pub description: String,
    pub device_type: DeviceType,
    pub owned_by: String,
}

/// Sparse update. Absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_online: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_alarm_reason: Option<String>,
}

/// A `DeviceUpdate` that passed validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DevicePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_online: Option<bool>,
    pub owned_by: Option<String>,
    pub device_type: Option<DeviceType>,
    pub last_alarm_reason: Option<String>,
}

impl DevicePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.is_online.is_none()
            && self.owned_by.is_none()
            && self.device_type.is_none()
            && self.last_alarm_reason.is_none()
    }
}

/// Request body for triggering an alarm on a device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmRequest {
    pub reason: String,
    pub level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlarmLevel {
    Info,
    Warning,
    Critical,
}

impl AlarmLevel {
    pub const ALL: [AlarmLevel; 3] = [AlarmLevel::Info, AlarmLevel::Warning, AlarmLevel::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlarmLevel::Info => "INFO",
            AlarmLevel::Warning => "WARNING",
            AlarmLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for AlarmLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlarmLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlarmLevel::ALL
            .iter()
            .copied()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| format!("unknown alarm level: {:?}", s))
    }
}

/// An `AlarmRequest` that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alarm {
    pub reason: String,
    pub level: AlarmLevel,
}

impl Alarm {
    /// Text stored as the device's last alarm reason, e.g. `[CRITICAL] Smoke detected`
    pub fn formatted_reason(&self) -> String {
        format!("[{}] {}", self.level, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_update_absent_fields() {
        let update: DeviceUpdate = serde_json::from_str(r#"{"is_online": true}"#).unwrap();
        assert_eq!(update.is_online, Some(true));
        assert!(update.name.is_none());
        assert!(update.description.is_none());
        assert!(update.owned_by.is_none());
        assert!(update.device_type.is_none());
        assert!(update.last_alarm_reason.is_none());
    }

    #[test]
    fn test_device_create_description_defaults_to_empty() {
        let create: DeviceCreate = serde_json::from_str(
            r#"{"name": "FrontDoor", "device_type": "LOCK", "owned_by": "alice"}"#,
        )
        .unwrap();
        assert_eq!(create.description, "");
    }

    #[test]
    fn test_device_create_requires_name() {
        let result = serde_json::from_str::<DeviceCreate>(
            r#"{"device_type": "LOCK", "owned_by": "alice"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_alarm_formatted_reason() {
        let alarm = Alarm {
            reason: "Smoke detected".to_string(),
            level: AlarmLevel::Critical,
        };
        assert_eq!(alarm.formatted_reason(), "[CRITICAL] Smoke detected");
    }

    #[test]
    fn test_alarm_level_parse_is_case_sensitive() {
        assert_eq!("WARNING".parse::<AlarmLevel>(), Ok(AlarmLevel::Warning));
        assert!("warning".parse::<AlarmLevel>().is_err());
        assert!("".parse::<AlarmLevel>().is_err());
    }

    #[test]
    fn test_device_serializes_wire_names() {
        let now = Utc::now();
        let device = Device {
            id: 7,
            owned_by: "alice".to_string(),
            device_type: DeviceType::SmokeDetector,
            name: "Hallway".to_string(),
            description: String::new(),
            is_online: true,
            last_alarm_time: None,
            last_alarm_reason: String::new(),
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&device).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["device_type"], "SMOKE_DETECTOR");
        assert_eq!(value["owned_by"], "alice");
        assert_eq!(value["is_online"], true);
        assert!(value["last_alarm_time"].is_null());
        for key in ["name", "description", "last_alarm_reason", "created_at", "updated_at"] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
    }
}
