//! Snapshot-backed event store.
//!
//! The analytics core never talks SQL. It consumes a materialized,
//! consistent view of the fleet database: live integrations implement
//! [`EventSource`] against their own storage (reading both collections
//! inside one transaction), while the CLI reads [`FleetSnapshot`], the
//! JSON export file produced by the fleet application.

use crate::event::{FuelEvent, InspectionEvent, VehicleRecord};
use chrono::{DateTime, Utc};
use fm_common::{schema, PlateNumber, VehicleId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Schema version for fleet snapshot files.
pub const SNAPSHOT_SCHEMA_VERSION: &str = "1.0.0";

/// Errors from snapshot loading and saving.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot schema version {found} is not compatible (expected {expected})")]
    IncompatibleSchema { found: String, expected: String },
}

impl From<SnapshotError> for fm_common::Error {
    fn from(err: SnapshotError) -> Self {
        match err {
            SnapshotError::Io(e) => fm_common::Error::Io(e),
            SnapshotError::Json(e) => fm_common::Error::Json(e),
            SnapshotError::IncompatibleSchema { found, expected } => {
                fm_common::Error::SnapshotSchema { found, expected }
            }
        }
    }
}

/// Read-side interface to the fleet event store.
///
/// Implementations must hand back lists reflecting one consistent point in
/// time; the two collections are always read together.
pub trait EventSource {
    /// All fuel events for one vehicle, in recorded order.
    fn fuel_events(&self, vehicle: VehicleId) -> fm_common::Result<Vec<FuelEvent>>;

    /// All inspection events for one vehicle, in recorded order.
    fn inspection_events(&self, vehicle: VehicleId) -> fm_common::Result<Vec<InspectionEvent>>;
}

/// Complete fleet snapshot: vehicles plus both event collections.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FleetSnapshot {
    /// Schema version for compatibility checking.
    pub schema_version: String,

    /// Human-readable name for this export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// When the export was taken.
    pub recorded_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vehicles: Vec<VehicleRecord>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fuel_events: Vec<FuelEvent>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inspections: Vec<InspectionEvent>,
}

impl FleetSnapshot {
    /// Resolve a vehicle by numeric row id or by plate.
    pub fn find_vehicle(&self, query: &str) -> Option<&VehicleRecord> {
        if let Ok(id) = query.parse::<i64>() {
            return self.vehicles.iter().find(|v| v.id == VehicleId(id));
        }
        let plate = PlateNumber::parse(query)?;
        self.vehicles.iter().find(|v| v.plate == plate)
    }
}

impl EventSource for FleetSnapshot {
    fn fuel_events(&self, vehicle: VehicleId) -> fm_common::Result<Vec<FuelEvent>> {
        Ok(self
            .fuel_events
            .iter()
            .filter(|e| e.vehicle_id == vehicle)
            .cloned()
            .collect())
    }

    fn inspection_events(&self, vehicle: VehicleId) -> fm_common::Result<Vec<InspectionEvent>> {
        Ok(self
            .inspections
            .iter()
            .filter(|e| e.vehicle_id == vehicle)
            .cloned()
            .collect())
    }
}

/// A snapshot loaded from disk, with provenance.
#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    pub snapshot: FleetSnapshot,

    /// SHA-256 of the raw file, recorded into reports for provenance.
    pub checksum_sha256: String,

    pub path: PathBuf,
}

/// Load and validate a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<LoadedSnapshot, SnapshotError> {
    let raw = std::fs::read(path)?;
    let snapshot: FleetSnapshot = serde_json::from_slice(&raw)?;

    if !schema::is_compatible(&snapshot.schema_version) {
        return Err(SnapshotError::IncompatibleSchema {
            found: snapshot.schema_version,
            expected: SNAPSHOT_SCHEMA_VERSION.to_string(),
        });
    }

    let checksum_sha256 = hex::encode(Sha256::digest(&raw));
    tracing::debug!(
        path = %path.display(),
        vehicles = snapshot.vehicles.len(),
        fuel_events = snapshot.fuel_events.len(),
        inspections = snapshot.inspections.len(),
        "loaded fleet snapshot"
    );

    Ok(LoadedSnapshot {
        snapshot,
        checksum_sha256,
        path: path.to_path_buf(),
    })
}

/// Write a snapshot as pretty-printed JSON.
pub fn save_snapshot(snapshot: &FleetSnapshot, path: &Path) -> Result<(), SnapshotError> {
    let raw = serde_json::to_vec_pretty(snapshot)?;
    std::fs::write(path, raw)?;
    Ok(())
}
