//! Main entry point for the smart home device hub

use actix_web::main as actix_main;
use chrono::Local;
use common::{Config, Result};
use env_logger::fmt::Color;
use env_logger::Builder;
use hub_server::{DeviceService, HubServer, SqliteDeviceStore};
use log::{error, info, LevelFilter};
use std::io::Write;
use std::sync::Arc;

const BANNER: &str = r#"
╔═══════════════════════════════════════════════════════════════════╗
║                                                                   ║
║   ██╗  ██╗██╗   ██╗██████╗                                        ║
║   ██║  ██║██║   ██║██╔══██╗                                       ║
║   ███████║██║   ██║██████╔╝                                       ║
║   ██╔══██║██║   ██║██╔══██╗                                       ║
║   ██║  ██║╚██████╔╝██████╔╝                                       ║
║   ╚═╝  ╚═╝ ╚═════╝ ╚═════╝                                        ║
║                                                                   ║
║   Smart Home Device Hub v0.1.0                                    ║
║                                                                   ║
╚═══════════════════════════════════════════════════════════════════╝
"#;

fn setup_logger() {
    let mut builder = Builder::from_default_env();

    builder
        .format(|buf, record| {
            let mut timestamp_style = buf.style();
            let mut level_style = buf.style();
            let mut target_style = buf.style();
            let mut message_style = buf.style();

            let level_color = match record.level() {
                log::Level::Error => Color::Red,
                log::Level::Warn => Color::Yellow,
                log::Level::Info => Color::Green,
                log::Level::Debug => Color::Cyan,
                log::Level::Trace => Color::White,
            };

            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            writeln!(
                buf,
                "{} {} [{}] {}",
                timestamp_style.set_color(Color::Rgb(100, 100, 100)).value(timestamp),
                level_style.set_color(level_color).value(record.level()),
                target_style.set_color(Color::Blue).value(record.target()),
                message_style.set_color(Color::White).value(record.args())
            )
        })
        .filter(None, LevelFilter::Info);

    // RUST_LOG still wins over the default level
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    builder.init();
}

#[actix_main]
async fn main() -> Result<()> {
    setup_logger();

    println!("{}", BANNER);

    info!("Starting device hub...");

    let config = Config::load().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;
    info!("Configuration loaded (address: {}, database: {})", config.server_address, config.db_path);

    info!("Opening device database...");
    let store = SqliteDeviceStore::connect(&config.db_path, config.db_max_connections)
        .await
        .map_err(|e| {
            error!("Failed to open database {}: {}", config.db_path, e);
            e
        })?;
    info!("✓ Device database ready");

    let service = DeviceService::new(Arc::new(store));
    let server = HubServer::new(config.server_address, service);

    if let Err(e) = server.start().await {
        error!("Server failed: {}", e);
        return Err(e);
    }

    info!("Device hub shut down");
    Ok(())
}
