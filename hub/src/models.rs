use serde::{Deserialize, Serialize};

/// Body returned after a device is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthStatus {
    pub fn healthy(uptime: String) -> Self {
        Self {
            status: "ok".to_string(),
            message: "Service is healthy".to_string(),
            uptime: Some(uptime),
            database: Some("connected".to_string()),
            error: None,
        }
    }

    pub fn database_down(error: String) -> Self {
        Self {
            status: "error".to_string(),
            message: "Database connection failed".to_string(),
            uptime: None,
            database: None,
            error: Some(error),
        }
    }
}
