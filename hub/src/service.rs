//! Device operations on top of a [`DeviceStore`].
//!
//! Inputs arrive already validated (`NewDevice`, `DevicePatch`, `Alarm`); this
//! layer owns existence checks, the update merge and alarm formatting.

use crate::store::DeviceStore;
use chrono::Utc;
use common::{apply_update, Alarm, Device, DevicePatch, HubError, NewDevice, Result};
use log::{info, warn};
use std::sync::Arc;

#[derive(Clone)]
pub struct DeviceService {
    store: Arc<dyn DeviceStore>,
}

impl DeviceService {
    pub fn new(store: Arc<dyn DeviceStore>) -> Self {
        Self { store }
    }

    pub async fn create_device(&self, device: &NewDevice) -> Result<i64> {
        let id = self.store.create(device).await?;
        info!("Created {} device {} for {}", device.device_type, id, device.owned_by);
        Ok(id)
    }

    pub async fn get_device(&self, id: i64) -> Result<Option<Device>> {
        self.store.get_by_id(id).await
    }

    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        self.store.get_all().await
    }

    /// Merges `patch` over the stored device and writes the result back.
    pub async fn update_device(&self, id: i64, patch: &DevicePatch) -> Result<Device> {
        let baseline = self.require_device(id).await?;
        let merged = apply_update(baseline, patch);

        self.store.update(id, &merged).await?;
        info!("Updated device {}", id);
        Ok(merged)
    }

    pub async fn delete_device(&self, id: i64) -> Result<()> {
        if !self.store.delete(id).await? {
            warn!("Delete requested for unknown device {}", id);
            return Err(HubError::DeviceNotFound(id));
        }
        info!("Deleted device {}", id);
        Ok(())
    }

    /// Records `[LEVEL] reason` as the device's last alarm and stamps the alarm time.
    pub async fn trigger_alarm(&self, id: i64, alarm: &Alarm) -> Result<()> {
        self.require_device(id).await?;

        let reason = alarm.formatted_reason();
        self.store.set_alarm(id, &reason, Utc::now()).await?;
        info!("Alarm triggered on device {}: {}", id, reason);
        Ok(())
    }

    pub async fn health(&self) -> Result<()> {
        self.store.ping().await
    }

    async fn require_device(&self, id: i64) -> Result<Device> {
        match self.store.get_by_id(id).await? {
            Some(device) => Ok(device),
            None => {
                warn!("Device {} not found", id);
                Err(HubError::DeviceNotFound(id))
            }
        }
    }
}
