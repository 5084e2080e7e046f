use serde::{Deserialize, Serialize};
use crate::error::{HubError, Result};

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_DB_PATH: &str = "./data.db";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub server_address: String,
    pub db_path: String,
    pub db_max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            db_path: DEFAULT_DB_PATH.to_string(),
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
        }
    }
}

impl Config {
    /// Reads SERVER_ADDRESS, DB_PATH and DB_MAX_CONNECTIONS from the environment
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_address = lookup("SERVER_ADDRESS")
            .filter(|v| !v.is_empty())
            .map(|v| normalize_address(&v))
            .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string());

        let db_path = lookup("DB_PATH")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS").filter(|v| !v.is_empty()) {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(HubError::ConfigError(format!(
                        "DB_MAX_CONNECTIONS must be a positive integer, got {:?}",
                        raw
                    )))
                }
            },
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        Ok(Self {
            server_address,
            db_path,
            db_max_connections,
        })
    }
}

// ":8080" binds on every interface
fn normalize_address(addr: &str) -> String {
    if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("SERVER_ADDRESS", "127.0.0.1:9000"),
            ("DB_PATH", "/tmp/hub.db"),
            ("DB_MAX_CONNECTIONS", "2"),
        ]))
        .unwrap();
        assert_eq!(config.server_address, "127.0.0.1:9000");
        assert_eq!(config.db_path, "/tmp/hub.db");
        assert_eq!(config.db_max_connections, 2);
    }

    #[test]
    fn test_port_only_address() {
        let config = Config::from_lookup(lookup_from(&[("SERVER_ADDRESS", ":8081")])).unwrap();
        assert_eq!(config.server_address, "0.0.0.0:8081");
    }

    #[test]
    fn test_invalid_max_connections() {
        for raw in ["zero", "0", "-3"] {
            let result = Config::from_lookup(lookup_from(&[("DB_MAX_CONNECTIONS", raw)]));
            assert!(matches!(result, Err(HubError::ConfigError(_))), "{} accepted", raw);
        }
    }
}
