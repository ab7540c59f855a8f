//! Fuel-efficiency metrics over a vehicle's odometer timeline.

use super::timeline::{mean_step_delta_km, TimelinePoint};
use crate::event::FuelEvent;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Derived efficiency metrics for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EfficiencyReport {
    /// Odometer span over the timeline (max − min), km.
    pub total_distance_km: u32,

    /// Sum of liters over the vehicle's fuel events.
    pub total_fuel_liters: f64,

    /// Sum of amounts paid over the vehicle's fuel events.
    pub total_fuel_cost: f64,

    /// 0 when no fuel volume is recorded.
    pub km_per_liter: f64,

    /// 0 when the vehicle has not moved.
    pub cost_per_km: f64,

    /// Mean of the raw per-step odometer deltas, sign included.
    pub mean_daily_km: f64,
}

/// Compute efficiency metrics for one vehicle.
///
/// `None` means insufficient data (empty timeline or no fuel events), a
/// normal condition for a newly registered vehicle, not an error. Distance
/// is the span between the odometer extremes, not a sum of positive steps,
/// so a backward reading does not corrupt it; the anomaly scan reports
/// those separately. The zero fallbacks on the two rates stand in for an
/// undefined ratio and must stay zeros, never errors.
pub fn compute_efficiency(
    timeline: &[TimelinePoint],
    fuel: &[FuelEvent],
) -> Option<EfficiencyReport> {
    if timeline.is_empty() || fuel.is_empty() {
        return None;
    }

    let max_km = timeline.iter().map(|p| p.odometer_km).max()?;
    let min_km = timeline.iter().map(|p| p.odometer_km).min()?;
    let total_distance_km = max_km - min_km;

    let total_fuel_liters: f64 = fuel.iter().map(|e| e.liters).sum();
    let total_fuel_cost: f64 = fuel.iter().map(|e| e.total_cost).sum();

    let km_per_liter = if total_fuel_liters > 0.0 {
        f64::from(total_distance_km) / total_fuel_liters
    } else {
        0.0
    };
    let cost_per_km = if total_distance_km > 0 {
        total_fuel_cost / f64::from(total_distance_km)
    } else {
        0.0
    };

    Some(EfficiencyReport {
        total_distance_km,
        total_fuel_liters,
        total_fuel_cost,
        km_per_liter,
        cost_per_km,
        mean_daily_km: mean_step_delta_km(timeline),
    })
}
