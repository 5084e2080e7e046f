//! Persistence for device records.
//!
//! The service layer only talks to [`DeviceStore`]; [`SqliteDeviceStore`] is
//! the production implementation.

mod sqlite;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{Device, NewDevice, Result};

pub use sqlite::SqliteDeviceStore;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceStore: Send + Sync {
    /// Inserts a device and returns its id
    async fn create(&self, device: &NewDevice) -> Result<i64>;

    /// `None` when no device has this id
    async fn get_by_id(&self, id: i64) -> Result<Option<Device>>;

    /// All devices, newest first
    async fn get_all(&self) -> Result<Vec<Device>>;

    /// Writes the mutable fields of `device` and refreshes `updated_at`
    async fn update(&self, id: i64, device: &Device) -> Result<()>;

    /// Returns whether a row was removed
    async fn delete(&self, id: i64) -> Result<bool>;

    async fn set_alarm(&self, id: i64, reason: &str, at: DateTime<Utc>) -> Result<()>;

    async fn ping(&self) -> Result<()>;
}
