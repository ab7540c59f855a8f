//! Unified odometer timeline construction.
//!
//! Fuel and inspection events both carry an odometer reading; merging the
//! two series chronologically gives the densest available view of how a
//! vehicle actually moved.

use crate::event::{FuelEvent, InspectionEvent};
use chrono::{DateTime, Utc};
use fm_common::VehicleId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where a timeline point came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PointOrigin {
    Fuel,
    Inspection,
}

/// One observed odometer reading at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimelinePoint {
    pub timestamp: DateTime<Utc>,

    /// Odometer reading, km.
    pub odometer_km: u32,

    pub origin: PointOrigin,

    /// Trailing 7-point odometer mean, filled by the rolling pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolling_avg_7: Option<f64>,

    /// Trailing 30-point odometer mean, filled by the rolling pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolling_avg_30: Option<f64>,
}

/// Merge a vehicle's fuel and inspection events into one chronological
/// odometer timeline.
///
/// Output is sorted non-decreasing by timestamp; equal timestamps keep
/// their input order (fuel before inspection), the only tie-break. The
/// sort is never by odometer: backward odometer steps are preserved and
/// left for the anomaly scan. Empty inputs yield an empty timeline.
pub fn build_timeline(
    fuel: &[FuelEvent],
    inspections: &[InspectionEvent],
    vehicle: VehicleId,
) -> Vec<TimelinePoint> {
    let mut points: Vec<TimelinePoint> = Vec::with_capacity(fuel.len() + inspections.len());

    points.extend(
        fuel.iter()
            .filter(|e| e.vehicle_id == vehicle)
            .map(|e| TimelinePoint {
                timestamp: e.recorded_at,
                odometer_km: e.odometer_km,
                origin: PointOrigin::Fuel,
                rolling_avg_7: None,
                rolling_avg_30: None,
            }),
    );

    points.extend(
        inspections
            .iter()
            .filter(|e| e.vehicle_id == vehicle)
            .map(|e| TimelinePoint {
                timestamp: e.recorded_at,
                odometer_km: e.odometer_km,
                origin: PointOrigin::Inspection,
                rolling_avg_7: None,
                rolling_avg_30: None,
            }),
    );

    // Stable sort: ties retain the fuel-before-inspection input order.
    points.sort_by_key(|p| p.timestamp);
    points
}

/// Per-step odometer deltas, km. Empty for fewer than 2 points.
pub fn step_deltas_km(timeline: &[TimelinePoint]) -> Vec<i64> {
    timeline
        .windows(2)
        .map(|pair| i64::from(pair[1].odometer_km) - i64::from(pair[0].odometer_km))
        .collect()
}

/// Arithmetic mean of the raw per-step deltas, sign included.
///
/// 0.0 when no deltas exist; forecast callers gate on a positive mean, so
/// that reads the same as "no usable history".
pub fn mean_step_delta_km(timeline: &[TimelinePoint]) -> f64 {
    let deltas = step_deltas_km(timeline);
    if deltas.is_empty() {
        return 0.0;
    }
    deltas.iter().sum::<i64>() as f64 / deltas.len() as f64
}
