pub mod models;
pub mod server;
pub mod service;
pub mod store;

pub use server::{configure, AppState, HubServer};
pub use service::DeviceService;
pub use store::{DeviceStore, SqliteDeviceStore};
