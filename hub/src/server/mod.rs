//! HTTP server for the device hub
//!
//! Wires the request handlers to their routes and runs the actix-web server
//! on top of a shared [`DeviceService`].

use crate::service::DeviceService;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use common::{HubError, Result};
use log::info;
use std::time::{Duration, Instant};

pub mod handlers;

/// State shared by every worker
pub struct AppState {
    pub service: DeviceService,
    started_at: Instant,
}

impl AppState {
    pub fn new(service: DeviceService) -> Self {
        Self {
            service,
            started_at: Instant::now(),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Registers the hub's routes plus JSON/path error handling.
///
/// Expects a `web::Data<AppState>` to be registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| HubError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|_err, _req| HubError::BadRequest("invalid device ID".to_string()).into()),
    )
    .service(web::resource("/health").route(web::get().to(handlers::health)))
    .service(
        web::scope("/api")
            .service(
                web::resource("/device-types").route(web::get().to(handlers::list_device_types)),
            )
            .service(
                web::resource("/devices")
                    .route(web::get().to(handlers::list_devices))
                    .route(web::post().to(handlers::create_device)),
            )
            .service(
                web::resource("/devices/{id}")
                    .route(web::get().to(handlers::get_device))
                    .route(web::put().to(handlers::update_device))
                    .route(web::delete().to(handlers::delete_device)),
            )
            .service(
                web::resource("/devices/{id}/alarm").route(web::post().to(handlers::trigger_alarm)),
            ),
    );
}

pub struct HubServer {
    bind_address: String,
    service: DeviceService,
}

impl HubServer {
    pub fn new(bind_address: impl Into<String>, service: DeviceService) -> Self {
        Self {
            bind_address: bind_address.into(),
            service,
        }
    }

    pub async fn start(self) -> Result<()> {
        let state = web::Data::new(AppState::new(self.service));

        info!("Starting HTTP server on {}", self.bind_address);
        let http_server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .configure(configure)
                .wrap(Logger::default())
                .wrap(
                    actix_cors::Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header()
                )
        })
        .bind(self.bind_address.as_str())?;

        http_server.run().await?;
        info!("HTTP server stopped");
        Ok(())
    }
}
