//! Fleet Metrics common types, IDs, and errors.
//!
//! This crate provides foundational types shared across fm-core modules:
//! - Vehicle and plate identity types with validation
//! - Report identifiers and schema versioning
//! - Common error types
//! - Output format specifications

pub mod error;
pub mod id;
pub mod output;
pub mod schema;

pub use error::{Error, Result};
pub use id::{PlateNumber, ReportId, VehicleId};
pub use output::OutputFormat;
pub use schema::SCHEMA_VERSION;
