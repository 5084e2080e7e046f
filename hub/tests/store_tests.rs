use chrono::{Duration, Utc};
use common::{DeviceType, HubError, NewDevice, Result};
use hub_server::store::{DeviceStore, SqliteDeviceStore};

async fn create_test_store() -> Result<SqliteDeviceStore> {
    SqliteDeviceStore::connect(":memory:", 1).await
}

fn new_device(name: &str, device_type: DeviceType) -> NewDevice {
    NewDevice {
        name: name.to_string(),
        description: format!("{} description", name),
        device_type,
        owned_by: "owner1".to_string(),
    }
}

#[tokio::test]
async fn test_create_and_get_device() -> Result<()> {
    let store = create_test_store().await?;

    let id = store.create(&new_device("FrontDoor", DeviceType::Lock)).await?;
    let device = store.get_by_id(id).await?.expect("device should exist");

    assert_eq!(device.id, id);
    assert_eq!(device.name, "FrontDoor");
    assert_eq!(device.description, "FrontDoor description");
    assert_eq!(device.device_type, DeviceType::Lock);
    assert_eq!(device.owned_by, "owner1");
    assert!(!device.is_online);
    assert_eq!(device.last_alarm_reason, "");
    assert!(device.last_alarm_time.is_none());
    assert_eq!(device.created_at, device.updated_at);
    Ok(())
}

#[tokio::test]
async fn test_get_missing_device_is_none() -> Result<()> {
    let store = create_test_store().await?;
    assert!(store.get_by_id(12345).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_get_all_newest_first() -> Result<()> {
    let store = create_test_store().await?;

    let first = store.create(&new_device("Cam1", DeviceType::Camera)).await?;
    let second = store.create(&new_device("Cam2", DeviceType::Camera)).await?;
    let third = store.create(&new_device("Thermo", DeviceType::Thermostat)).await?;

    let ids: Vec<i64> = store.get_all().await?.into_iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![third, second, first]);
    Ok(())
}

#[tokio::test]
async fn test_update_writes_mutable_fields() -> Result<()> {
    let store = create_test_store().await?;
    let id = store.create(&new_device("Hall", DeviceType::MotionSensor)).await?;
    let original = store.get_by_id(id).await?.unwrap();

    let mut changed = original.clone();
    changed.name = "Landing".to_string();
    changed.is_online = true;
    changed.device_type = DeviceType::SmokeDetector;
    changed.owned_by = "owner2".to_string();
    changed.last_alarm_reason = "manual".to_string();

    store.update(id, &changed).await?;
    let stored = store.get_by_id(id).await?.unwrap();

    assert_eq!(stored.name, "Landing");
    assert!(stored.is_online);
    assert_eq!(stored.device_type, DeviceType::SmokeDetector);
    assert_eq!(stored.owned_by, "owner2");
    assert_eq!(stored.last_alarm_reason, "manual");
    assert_eq!(stored.description, original.description);
    assert_eq!(stored.created_at, original.created_at);
    assert!(stored.updated_at >= original.updated_at);
    Ok(())
}

#[tokio::test]
async fn test_delete_reports_whether_row_existed() -> Result<()> {
    let store = create_test_store().await?;
    let id = store.create(&new_device("Garage", DeviceType::Lock)).await?;

    assert!(store.delete(id).await?);
    assert!(store.get_by_id(id).await?.is_none());
    assert!(!store.delete(id).await?);
    Ok(())
}

#[tokio::test]
async fn test_set_alarm() -> Result<()> {
    let store = create_test_store().await?;
    let id = store.create(&new_device("Kitchen", DeviceType::SmokeDetector)).await?;

    let at = Utc::now() + Duration::seconds(5);
    store.set_alarm(id, "[CRITICAL] Smoke detected", at).await?;

    let device = store.get_by_id(id).await?.unwrap();
    assert_eq!(device.last_alarm_reason, "[CRITICAL] Smoke detected");
    let alarm_time = device.last_alarm_time.expect("alarm time should be set");
    assert_eq!(alarm_time.timestamp_millis(), at.timestamp_millis());
    assert_eq!(device.updated_at.timestamp_millis(), at.timestamp_millis());
    Ok(())
}

#[tokio::test]
async fn test_unknown_stored_device_type_is_storage_error() -> Result<()> {
    let store = create_test_store().await?;
    let now = Utc::now();

    let id = sqlx::query(
        "INSERT INTO devices (name, device_type, owned_by, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind("Bulb")
    .bind("LIGHT_BULB")
    .bind("owner1")
    .bind(now)
    .bind(now)
    .execute(store.pool())
    .await?
    .last_insert_rowid();

    let result = store.get_by_id(id).await;
    assert!(matches!(result, Err(HubError::StorageError(_))));
    Ok(())
}

#[tokio::test]
async fn test_ping() -> Result<()> {
    let store = create_test_store().await?;
    store.ping().await
}
