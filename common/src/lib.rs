pub mod error;
pub mod types;
pub mod config;
pub mod device_type;
pub mod validation;
pub mod update;

pub use error::{HubError, Result};
pub use types::*;
pub use config::*;
pub use device_type::{all_device_types, is_valid_device_type, DeviceType, DeviceTypeInfo};
pub use validation::{validate_alarm_request, validate_device_create, validate_device_update, ValidationErrors};
pub use update::apply_update;
