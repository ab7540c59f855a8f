//! Vehicle and report identity types.
//!
//! A vehicle is addressed either by its database row id or by its license
//! plate; the plate is validated once here so downstream code never sees a
//! malformed one.

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vehicle row ID wrapper with display formatting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct VehicleId(pub i64);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for VehicleId {
    fn from(id: i64) -> Self {
        VehicleId(id)
    }
}

/// Validated Brazilian license plate.
///
/// Accepts the legacy format (`ABC1234`, hyphen optional) and the Mercosul
/// format (`ABC1D23`); stored normalized: uppercase, no hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct PlateNumber(String);

impl PlateNumber {
    /// Parse and validate a plate string.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();
        let pattern = Regex::new(r"^[A-Z]{3}([0-9]{4}|[0-9][A-Z][0-9]{2})$").ok()?;
        if pattern.is_match(&normalized) {
            Some(PlateNumber(normalized))
        } else {
            None
        }
    }

    /// Normalized plate text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlateNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Report ID for tracking generated analysis reports.
///
/// Format: `rep-<date>-<time>-<random>`
/// Example: `rep-20260115-143022-abc123`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ReportId(pub String);

impl ReportId {
    /// Generate a new report ID.
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        let random: String = uuid::Uuid::new_v4().to_string().chars().take(6).collect();
        ReportId(format!("rep-{}-{}", now.format("%Y%m%d-%H%M%S"), random))
    }

    /// Parse an existing report ID string.
    pub fn parse(s: &str) -> Option<Self> {
        if s.starts_with("rep-") && s.len() > 19 {
            Some(ReportId(s.to_string()))
        } else {
            None
        }
    }
}

impl Default for ReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
