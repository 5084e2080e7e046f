//! Registry of the device types a hub can manage.
//!
//! The set is closed. Every variant carries static metadata that is looked up
//! through [`DEVICE_TYPES`], indexed by the variant's discriminant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceType {
    Camera = 0,
    Thermostat = 1,
    SmokeDetector = 2,
    MotionSensor = 3,
    Lock = 4,
    Unknown = 5,
}

/// Human readable description of a device type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceTypeInfo {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
}

/// Metadata for every device type, in registry order.
pub const DEVICE_TYPES: [DeviceTypeInfo; 6] = [
    DeviceTypeInfo {
        id: "CAMERA",
        display_name: "Camera",
        description: "Smart security camera",
    },
    DeviceTypeInfo {
        id: "THERMOSTAT",
        display_name: "Thermostat",
        description: "Smart thermostat for controlling temperature",
    },
    DeviceTypeInfo {
        id: "SMOKE_DETECTOR",
        display_name: "Smoke Detector",
        description: "Detects smoke and fire hazards",
    },
    DeviceTypeInfo {
        id: "MOTION_SENSOR",
        display_name: "Motion Sensor",
        description: "Detects movement in monitored areas",
    },
    DeviceTypeInfo {
        id: "LOCK",
        display_name: "Lock",
        description: "Smart lock with remote access capabilities",
    },
    DeviceTypeInfo {
        id: "UNKNOWN",
        display_name: "Unknown",
        description: "Unknown device type",
    },
];

impl DeviceType {
    pub const ALL: [DeviceType; 6] = [
        DeviceType::Camera,
        DeviceType::Thermostat,
        DeviceType::SmokeDetector,
        DeviceType::MotionSensor,
        DeviceType::Lock,
        DeviceType::Unknown,
    ];

    pub fn info(&self) -> &'static DeviceTypeInfo {
        &DEVICE_TYPES[*self as usize]
    }

    pub fn as_str(&self) -> &'static str {
        self.info().id
    }

    pub fn display_name(&self) -> &'static str {
        self.info().display_name
    }

    pub fn description(&self) -> &'static str {
        self.info().description
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the registered device types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDeviceType(pub String);

impl fmt::Display for UnknownDeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown device type: {:?}", self.0)
    }
}

impl std::error::Error for UnknownDeviceType {}

impl FromStr for DeviceType {
    type Err = UnknownDeviceType;

    /// Exact, case-sensitive match against the registry ids.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeviceType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownDeviceType(s.to_string()))
    }
}

pub fn is_valid_device_type(device_type: &str) -> bool {
    device_type.parse::<DeviceType>().is_ok()
}

/// Returns every device type with its metadata, in registry order
pub fn all_device_types() -> Vec<DeviceTypeInfo> {
    DEVICE_TYPES.to_vec()
}

/// Comma separated list of valid ids, used in validation messages
pub fn device_type_ids() -> String {
    DEVICE_TYPES
        .iter()
        .map(|info| info.id)
        .collect::<Vec<_>>()
        .join(", ")
}
