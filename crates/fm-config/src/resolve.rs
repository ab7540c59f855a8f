//! Configuration resolution.
//!
//! Precedence: explicit CLI path → `FM_CONFIG` env var → XDG config dir →
//! built-in defaults. A path that is given but unreadable or invalid is an
//! error; only the XDG candidate is allowed to be silently absent.

use crate::fleet::FleetConfig;
use fm_common::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "FM_CONFIG";

/// File name looked up in the XDG config directory.
pub const CONFIG_FILE_NAME: &str = "fleet.json";

/// Subdirectory under the XDG config directory.
pub const CONFIG_DIR_NAME: &str = "fleet-metrics";

/// Where the effective configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    CliFlag,
    EnvVar,
    XdgDir,
    Defaults,
}

/// Effective configuration plus its provenance.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: FleetConfig,
    pub source: ConfigSource,
    /// File the config was loaded from, if any.
    pub path: Option<PathBuf>,
}

/// Resolve the effective configuration.
pub fn resolve_config(cli_path: Option<&Path>) -> Result<ResolvedConfig> {
    if let Some(path) = cli_path {
        return load(path, ConfigSource::CliFlag);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load(Path::new(&env_path), ConfigSource::EnvVar);
    }

    if let Some(base) = dirs::config_dir() {
        let candidate = base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
        if candidate.exists() {
            return load(&candidate, ConfigSource::XdgDir);
        }
    }

    Ok(ResolvedConfig {
        config: FleetConfig::default(),
        source: ConfigSource::Defaults,
        path: None,
    })
}

fn load(path: &Path, source: ConfigSource) -> Result<ResolvedConfig> {
    let raw = std::fs::read_to_string(path)?;
    let config: FleetConfig = serde_json::from_str(&raw)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

    if let Err(errors) = crate::validate::validate(&config) {
        let joined: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        return Err(Error::ConfigValidation(joined.join("; ")));
    }

    Ok(ResolvedConfig {
        config,
        source,
        path: Some(path.to_path_buf()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_cli_path_wins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"schema_version": "1.0.0", "last_service_km": {{"ABC1234": 12000}}}}"#
        )
        .unwrap();

        let resolved = resolve_config(Some(file.path())).unwrap();
        assert_eq!(resolved.source, ConfigSource::CliFlag);
        assert_eq!(resolved.config.last_service_km.get("ABC1234"), Some(&12_000));
    }

    #[test]
    fn test_missing_cli_path_is_error() {
        let err = resolve_config(Some(Path::new("/nonexistent/fleet.json"))).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = resolve_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validation_failure_surfaces() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"schema_version": "1.0.0", "last_service_km": {{"not a plate": 1}}}}"#
        )
        .unwrap();

        let err = resolve_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation(_)));
    }
}
