//! Typed event records at the storage boundary.
//!
//! Rows arrive from the storage collaborator already parsed into these
//! shapes; shape validation happens once at that boundary, and the
//! analysis functions never see dynamic row maps or stringly-typed fields.

use chrono::{DateTime, Utc};
use fm_common::{PlateNumber, VehicleId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Fuel type recorded at the pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    Gasoline,
    Ethanol,
    Diesel,
    Cng,
}

/// A single fueling record. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FuelEvent {
    pub vehicle_id: VehicleId,

    /// When the fill happened.
    pub recorded_at: DateTime<Utc>,

    /// Odometer reading at the pump, km.
    pub odometer_km: u32,

    /// Liters dispensed.
    pub liters: f64,

    /// Total amount paid.
    pub total_cost: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<FuelType>,

    /// Link to the archived invoice, when one was attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_ref: Option<String>,
}

/// Departure/return tag for an inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InspectionKind {
    Departure,
    Return,
}

/// Pass/fail flags for the fixed inspection checklist.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema)]
pub struct InspectionItems {
    pub tires_ok: bool,
    pub headlights_ok: bool,
    pub seatbelt_ok: bool,
    pub brakes_ok: bool,
    pub oil_level_ok: bool,
    pub windows_ok: bool,
    pub mirrors_ok: bool,
    pub horn_ok: bool,
    pub emergency_kit_ok: bool,
}

impl InspectionItems {
    /// All nine items passed.
    pub fn all_ok(&self) -> bool {
        self.failed_count() == 0
    }

    /// Number of failed items.
    pub fn failed_count(&self) -> usize {
        [
            self.tires_ok,
            self.headlights_ok,
            self.seatbelt_ok,
            self.brakes_ok,
            self.oil_level_ok,
            self.windows_ok,
            self.mirrors_ok,
            self.horn_ok,
            self.emergency_kit_ok,
        ]
        .iter()
        .filter(|ok| !**ok)
        .count()
    }
}

/// A single vehicle inspection record. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InspectionEvent {
    pub vehicle_id: VehicleId,

    /// When the inspection was performed.
    pub recorded_at: DateTime<Utc>,

    /// Odometer reading reported by the inspector, km.
    pub odometer_km: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<InspectionKind>,

    pub items: InspectionItems,

    /// Free-text inspector notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Registered vehicle, as exported by the fleet database.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VehicleRecord {
    pub id: VehicleId,

    pub plate: PlateNumber,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,

    /// Last odometer reading known to the registry, km.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_odometer_km: Option<u32>,
}
