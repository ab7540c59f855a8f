//! Typed fleet configuration.
//!
//! These types match the fleet.json file operators keep next to their
//! snapshot exports. Everything is optional; a missing file is a valid
//! (default) configuration.

use fm_common::{OutputFormat, PlateNumber};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Complete fleet configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetConfig {
    pub schema_version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Default snapshot export to analyze when --snapshot is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,

    /// Default output format when --format is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_format: Option<OutputFormat>,

    /// Odometer at the last completed service, km, keyed by plate.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub last_service_km: HashMap<String, u32>,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            description: None,
            snapshot_path: None,
            default_format: None,
            last_service_km: HashMap::new(),
        }
    }
}

impl FleetConfig {
    /// Last-service odometer for a plate; 0 when the fleet has no record,
    /// meaning "count the interval from the odometer origin".
    pub fn last_service_for(&self, plate: &PlateNumber) -> u32 {
        self.last_service_km.get(plate.as_str()).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_parses() {
        let config: FleetConfig =
            serde_json::from_str(r#"{"schema_version": "1.0.0"}"#).unwrap();
        assert!(config.snapshot_path.is_none());
        assert!(config.last_service_km.is_empty());
    }

    #[test]
    fn test_last_service_lookup() {
        let config: FleetConfig = serde_json::from_str(
            r#"{"schema_version": "1.0.0", "last_service_km": {"ABC1D23": 40000}}"#,
        )
        .unwrap();
        let known = PlateNumber::parse("ABC1D23").unwrap();
        let unknown = PlateNumber::parse("XYZ9876").unwrap();
        assert_eq!(config.last_service_for(&known), 40_000);
        assert_eq!(config.last_service_for(&unknown), 0);
    }
}
