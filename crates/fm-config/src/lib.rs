//! Fleet Metrics configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for fleet.json
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation
//!
//! Analysis thresholds (jump threshold, service interval, rolling windows)
//! are deliberately NOT configuration; they are fixed constants owned by
//! fm-core.

pub mod fleet;
pub mod resolve;
pub mod validate;

pub use fleet::FleetConfig;
pub use resolve::{resolve_config, ConfigSource, ResolvedConfig, CONFIG_ENV_VAR};
pub use validate::{validate, ValidationError};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
