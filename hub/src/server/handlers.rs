//! HTTP request handlers for the device hub
//!
//! Request bodies are validated here, at the boundary, before anything reaches
//! the service layer.

use super::AppState;
use crate::models::{CreatedResponse, HealthStatus};
use actix_web::{web, HttpResponse, Responder};
use common::{
    all_device_types, validate_alarm_request, validate_device_create, validate_device_update,
    AlarmRequest, DeviceCreate, DeviceUpdate, HubError, Result,
};
use log::{error, warn};
use std::time::Duration;

/// GET /health
pub async fn health(state: web::Data<AppState>) -> impl Responder {
    match state.service.health().await {
        Ok(()) => HttpResponse::Ok().json(HealthStatus::healthy(format_uptime(state.uptime()))),
        Err(e) => {
            error!("Health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(HealthStatus::database_down(e.to_string()))
        }
    }
}

/// GET /api/device-types
pub async fn list_device_types() -> impl Responder {
    HttpResponse::Ok().json(all_device_types())
}

/// GET /api/devices
pub async fn list_devices(state: web::Data<AppState>) -> Result<HttpResponse> {
    let devices = state.service.list_devices().await?;
    Ok(HttpResponse::Ok().json(devices))
}

/// GET /api/devices/{id}
pub async fn get_device(state: web::Data<AppState>, id: web::Path<i64>) -> Result<HttpResponse> {
    let id = id.into_inner();
    match state.service.get_device(id).await? {
        Some(device) => Ok(HttpResponse::Ok().json(device)),
        None => Err(HubError::DeviceNotFound(id)),
    }
}

/// POST /api/devices
pub async fn create_device(
    state: web::Data<AppState>,
    body: web::Json<DeviceCreate>,
) -> Result<HttpResponse> {
    let device = validate_device_create(&body).map_err(|errors| {
        warn!("Rejected device create: {}", errors);
        errors
    })?;

    let id = state.service.create_device(&device).await?;
    Ok(HttpResponse::Created().json(CreatedResponse { id }))
}

/// PUT /api/devices/{id}
pub async fn update_device(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<DeviceUpdate>,
) -> Result<HttpResponse> {
    let id = id.into_inner();
    let patch = validate_device_update(&body).map_err(|errors| {
        warn!("Rejected update for device {}: {}", id, errors);
        errors
    })?;

    state.service.update_device(id, &patch).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/devices/{id}
pub async fn delete_device(state: web::Data<AppState>, id: web::Path<i64>) -> Result<HttpResponse> {
    state.service.delete_device(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/devices/{id}/alarm
pub async fn trigger_alarm(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<AlarmRequest>,
) -> Result<HttpResponse> {
    let id = id.into_inner();
    let alarm = validate_alarm_request(&body).map_err(|errors| {
        warn!("Rejected alarm for device {}: {}", id, errors);
        errors
    })?;

    state.service.trigger_alarm(id, &alarm).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Formats an uptime like `1h2m3s`
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(Duration::from_secs(0)), "0s");
        assert_eq!(format_uptime(Duration::from_secs(59)), "59s");
        assert_eq!(format_uptime(Duration::from_secs(61)), "1m1s");
        assert_eq!(format_uptime(Duration::from_secs(3723)), "1h2m3s");
    }
}
