use crate::types::{Device, DevicePatch};

/// Overlays `patch` on `baseline`, field by field.
///
/// Present patch values replace the baseline value wholesale; absent ones keep
/// it. The id and timestamps are never touched. No validation happens here,
/// the patch is expected to come out of `validate_device_update`.
pub fn apply_update(baseline: Device, patch: &DevicePatch) -> Device {
    let mut device = baseline;

    if let Some(name) = &patch.name {
        device.name = name.clone();
    }
    if let Some(description) = &patch.description {
        device.description = description.clone();
    }
    if let Some(is_online) = patch.is_online {
        device.is_online = is_online;
    }
    if let Some(owned_by) = &patch.owned_by {
        device.owned_by = owned_by.clone();
    }
    if let Some(device_type) = patch.device_type {
        device.device_type = device_type;
    }
    if let Some(reason) = &patch.last_alarm_reason {
        device.last_alarm_reason = reason.clone();
    }

    device
}
