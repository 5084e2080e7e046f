//! Field level validation for device requests.
//!
//! Validators never stop at the first failure: every failing field ends up in
//! the returned [`ValidationErrors`], keyed by its wire name, with one message
//! per field. Lengths are counted in characters, not bytes.

use crate::device_type::{device_type_ids, DeviceType};
use crate::types::{Alarm, AlarmLevel, AlarmRequest, DeviceCreate, DevicePatch, DeviceUpdate, NewDevice};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const MIN_DEVICE_NAME_LENGTH: usize = 1;
pub const MAX_DEVICE_NAME_LENGTH: usize = 100;
pub const MIN_OWNER_LENGTH: usize = 1;
pub const MAX_OWNER_LENGTH: usize = 50;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
pub const MAX_LAST_ALARM_REASON_LENGTH: usize = 200;
pub const MIN_ALARM_REASON_LENGTH: usize = 1;

/// Field name to message. At most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure for `field`. An earlier message for the same field is kept.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(value)` when no field failed
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(field, msg)| format!("{}: {}", field, msg)).collect();
        f.write_str(&parts.join("; "))
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// 1-100 characters, ASCII letters and digits only
pub fn is_valid_device_name(name: &str) -> bool {
    let len = char_len(name);
    (MIN_DEVICE_NAME_LENGTH..=MAX_DEVICE_NAME_LENGTH).contains(&len)
        && name.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn is_valid_owner(owner: &str) -> bool {
    (MIN_OWNER_LENGTH..=MAX_OWNER_LENGTH).contains(&char_len(owner))
}

pub fn is_valid_description(description: &str) -> bool {
    char_len(description) <= MAX_DESCRIPTION_LENGTH
}

pub fn is_valid_last_alarm_reason(reason: &str) -> bool {
    char_len(reason) <= MAX_LAST_ALARM_REASON_LENGTH
}

fn name_message() -> String {
    format!(
        "must be between {}-{} characters and contain only alphanumeric characters (A-Z, a-z, 0-9)",
        MIN_DEVICE_NAME_LENGTH, MAX_DEVICE_NAME_LENGTH
    )
}

fn owner_message() -> String {
    format!("must be between {}-{} characters", MIN_OWNER_LENGTH, MAX_OWNER_LENGTH)
}

fn description_message() -> String {
    format!("must not exceed {} characters", MAX_DESCRIPTION_LENGTH)
}

fn last_alarm_reason_message() -> String {
    format!("must not exceed {} characters", MAX_LAST_ALARM_REASON_LENGTH)
}

fn device_type_message() -> String {
    format!("must be one of: {}", device_type_ids())
}

fn check_name(errors: &mut ValidationErrors, name: &str) {
    if !is_valid_device_name(name) {
        errors.add("name", name_message());
    }
}

fn check_owner(errors: &mut ValidationErrors, owner: &str) {
    if !is_valid_owner(owner) {
        errors.add("owned_by", owner_message());
    }
}

fn check_description(errors: &mut ValidationErrors, description: &str) {
    if !is_valid_description(description) {
        errors.add("description", description_message());
    }
}

fn check_device_type(errors: &mut ValidationErrors, device_type: &str) -> Option<DeviceType> {
    match device_type.parse::<DeviceType>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.add("device_type", device_type_message());
            None
        }
    }
}

/// Validates every field of a create request.
pub fn validate_device_create(input: &DeviceCreate) -> Result<NewDevice, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    check_name(&mut errors, &input.name);
    let device_type = check_device_type(&mut errors, &input.device_type);
    check_owner(&mut errors, &input.owned_by);
    check_description(&mut errors, &input.description);

    match device_type {
        Some(device_type) if errors.is_empty() => Ok(NewDevice {
            name: input.name.clone(),
            description: input.description.clone(),
            device_type,
            owned_by: input.owned_by.clone(),
        }),
        _ => Err(errors),
    }
}

/// Validates only the fields present in the patch, with the create rules.
pub fn validate_device_update(patch: &DeviceUpdate) -> Result<DevicePatch, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Some(name) = &patch.name {
        check_name(&mut errors, name);
    }
    if let Some(owner) = &patch.owned_by {
        check_owner(&mut errors, owner);
    }
    if let Some(description) = &patch.description {
        check_description(&mut errors, description);
    }
    if let Some(reason) = &patch.last_alarm_reason {
        if !is_valid_last_alarm_reason(reason) {
            errors.add("last_alarm_reason", last_alarm_reason_message());
        }
    }
    let device_type = match &patch.device_type {
        Some(raw) => check_device_type(&mut errors, raw),
        None => None,
    };

    errors.into_result(DevicePatch {
        name: patch.name.clone(),
        description: patch.description.clone(),
        is_online: patch.is_online,
        owned_by: patch.owned_by.clone(),
        device_type,
        last_alarm_reason: patch.last_alarm_reason.clone(),
    })
}

/// Validates reason and level; both checks always run.
pub fn validate_alarm_request(request: &AlarmRequest) -> Result<Alarm, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let reason_len = char_len(&request.reason);
    if reason_len < MIN_ALARM_REASON_LENGTH {
        errors.add("reason", "reason cannot be empty");
    } else if reason_len > MAX_LAST_ALARM_REASON_LENGTH {
        errors.add(
            "reason",
            format!("reason must not exceed {} characters", MAX_LAST_ALARM_REASON_LENGTH),
        );
    }

    let level = request.level.parse::<AlarmLevel>().ok();
    if level.is_none() {
        let levels: Vec<&str> = AlarmLevel::ALL.iter().map(AlarmLevel::as_str).collect();
        errors.add("level", format!("level must be one of: {}", levels.join(", ")));
    }

    match level {
        Some(level) if errors.is_empty() => Ok(Alarm {
            reason: request.reason.clone(),
            level,
        }),
        _ => Err(errors),
    }
}
