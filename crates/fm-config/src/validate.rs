//! Semantic validation of a parsed configuration.

use crate::fleet::FleetConfig;
use fm_common::{schema, PlateNumber};
use thiserror::Error;

/// A single semantic problem in a configuration file.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("schema version {found} is not compatible")]
    IncompatibleSchema { found: String },

    #[error("last_service_km key {plate:?} is not a valid plate")]
    InvalidPlate { plate: String },

    #[error("snapshot_path is empty")]
    EmptySnapshotPath,
}

/// Validate a configuration, collecting every problem rather than stopping
/// at the first.
pub fn validate(config: &FleetConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !schema::is_compatible(&config.schema_version) {
        errors.push(ValidationError::IncompatibleSchema {
            found: config.schema_version.clone(),
        });
    }

    if let Some(path) = &config.snapshot_path {
        if path.as_os_str().is_empty() {
            errors.push(ValidationError::EmptySnapshotPath);
        }
    }

    for plate in config.last_service_km.keys() {
        if PlateNumber::parse(plate).is_none() {
            errors.push(ValidationError::InvalidPlate {
                plate: plate.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_json(raw: &str) -> FleetConfig {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&FleetConfig::default()).is_ok());
    }

    #[test]
    fn test_bad_schema_version() {
        let config = config_json(r#"{"schema_version": "2.0.0"}"#);
        let errors = validate(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::IncompatibleSchema { .. }
        ));
    }

    #[test]
    fn test_bad_plate_key_collected() {
        let config = config_json(
            r#"{"schema_version": "1.0.0", "last_service_km": {"bogus": 5, "ABC1D23": 7}}"#,
        );
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::InvalidPlate { .. }));
    }
}
