use super::DeviceStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{Device, DeviceType, HubError, NewDevice, Result};
use log::{debug, info};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const DEVICES_TABLE_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS devices (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    device_type TEXT NOT NULL,
    owned_by TEXT NOT NULL,
    is_online BOOLEAN NOT NULL DEFAULT FALSE,
    last_alarm_reason TEXT NOT NULL DEFAULT '',
    last_alarm_time TIMESTAMP,
    created_at TIMESTAMP NOT NULL,
    updated_at TIMESTAMP NOT NULL
)"#;

const SELECT_DEVICE: &str = "SELECT id, name, description, device_type, owned_by, is_online, \
    last_alarm_reason, last_alarm_time, created_at, updated_at FROM devices";

/// Row as stored; `device_type` is checked against the registry on the way out
#[derive(Debug, Clone, sqlx::FromRow)]
struct DeviceRow {
    id: i64,
    name: String,
    description: String,
    device_type: String,
    owned_by: String,
    is_online: bool,
    last_alarm_reason: String,
    last_alarm_time: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DeviceRow> for Device {
    type Error = HubError;

    fn try_from(row: DeviceRow) -> Result<Self> {
        let device_type = DeviceType::from_str(&row.device_type).map_err(|e| {
            HubError::StorageError(format!("device {} has {}", row.id, e))
        })?;

        Ok(Device {
            id: row.id,
            owned_by: row.owned_by,
            device_type,
            name: row.name,
            description: row.description,
            is_online: row.is_online,
            last_alarm_time: row.last_alarm_time,
            last_alarm_reason: row.last_alarm_reason,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// SQLite backed device store
#[derive(Clone)]
pub struct SqliteDeviceStore {
    pool: SqlitePool,
}

impl SqliteDeviceStore {
    /// Opens (creating if needed) the database at `db_path` and ensures the schema exists.
    ///
    /// `:memory:` gives a private in-memory database held by a single connection.
    pub async fn connect(db_path: &str, max_connections: u32) -> Result<Self> {
        let in_memory = db_path == ":memory:";

        let options = if in_memory {
            SqliteConnectOptions::from_str("sqlite::memory:")?
        } else {
            SqliteConnectOptions::new()
                .filename(db_path)
                .create_if_missing(true)
        };

        let pool_options = if in_memory {
            // every connection to :memory: sees its own database
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        info!("Opened SQLite database at {}", db_path);

        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(DEVICES_TABLE_DDL).execute(&self.pool).await?;
        debug!("devices table ready");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DeviceStore for SqliteDeviceStore {
    async fn create(&self, device: &NewDevice) -> Result<i64> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO devices (name, description, device_type, owned_by, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&device.name)
        .bind(&device.description)
        .bind(device.device_type.as_str())
        .bind(&device.owned_by)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Inserted device {} ({})", id, device.name);
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Device>> {
        let row: Option<DeviceRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_DEVICE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Device::try_from).transpose()
    }

    async fn get_all(&self) -> Result<Vec<Device>> {
        let rows: Vec<DeviceRow> =
            sqlx::query_as(&format!("{} ORDER BY created_at DESC, id DESC", SELECT_DEVICE))
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(Device::try_from).collect()
    }

    async fn update(&self, id: i64, device: &Device) -> Result<()> {
        sqlx::query(
            "UPDATE devices SET name = ?, description = ?, device_type = ?, is_online = ?, \
             owned_by = ?, last_alarm_reason = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&device.name)
        .bind(&device.description)
        .bind(device.device_type.as_str())
        .bind(device.is_online)
        .bind(&device.owned_by)
        .bind(&device.last_alarm_reason)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM devices WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_alarm(&self, id: i64, reason: &str, at: DateTime<Utc>) -> Result<()> {
        sqlx::query(
            "UPDATE devices SET last_alarm_reason = ?, last_alarm_time = ?, updated_at = ? WHERE id = ?",
        )
        .bind(reason)
        .bind(at)
        .bind(at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
