//! Fuel-history checks that work from fills alone.
//!
//! These run off the fueling records in recorded order, without the merged
//! timeline: first-to-last cost and consumption rates, plausibility of a
//! prospective fill's odometer, and fuel-only regression scanning. They
//! complement the timeline analytics rather than replacing them.

use crate::event::FuelEvent;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Fills needed before rate metrics are meaningful.
pub const MIN_FILL_EVENTS: usize = 2;

/// Mean cost per km over the fill history, rounded to 2 decimals.
///
/// `None` with fewer than [`MIN_FILL_EVENTS`] fills, or when the
/// first-to-last odometer span is not positive.
pub fn cost_per_km(fills: &[FuelEvent]) -> Option<f64> {
    if fills.len() < MIN_FILL_EVENTS {
        return None;
    }
    let first_km = fills.first()?.odometer_km;
    let last_km = fills.last()?.odometer_km;
    if last_km <= first_km {
        return None;
    }

    let total_cost: f64 = fills.iter().map(|e| e.total_cost).sum();
    Some(round2(total_cost / f64::from(last_km - first_km)))
}

/// Mean km per liter over the fill history, rounded to 2 decimals.
///
/// Same gating as [`cost_per_km`], plus a positive total fuel volume.
pub fn km_per_liter(fills: &[FuelEvent]) -> Option<f64> {
    if fills.len() < MIN_FILL_EVENTS {
        return None;
    }
    let first_km = fills.first()?.odometer_km;
    let last_km = fills.last()?.odometer_km;
    let total_liters: f64 = fills.iter().map(|e| e.liters).sum();
    if last_km <= first_km || total_liters <= 0.0 {
        return None;
    }

    Some(round2(f64::from(last_km - first_km) / total_liters))
}

/// Whether a prospective fill odometer is consistent with history: it must
/// be at least the highest odometer already recorded at a fill. Anything
/// goes on an empty history.
pub fn is_plausible_fill_odometer(fills: &[FuelEvent], reported_km: u32) -> bool {
    let max_recorded = fills.iter().map(|e| e.odometer_km).max().unwrap_or(0);
    reported_km >= max_recorded
}

/// Verdict on a prospective fill odometer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FillCheck {
    pub reported_km: u32,

    /// Highest fill odometer already on record; 0 with no history.
    pub max_recorded_km: u32,

    pub plausible: bool,
}

/// Check a prospective fill odometer against history.
pub fn check_fill(fills: &[FuelEvent], reported_km: u32) -> FillCheck {
    FillCheck {
        reported_km,
        max_recorded_km: fills.iter().map(|e| e.odometer_km).max().unwrap_or(0),
        plausible: is_plausible_fill_odometer(fills, reported_km),
    }
}

/// A fuel-only odometer regression between consecutive fills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FillRegression {
    /// Timestamp of the later (offending) fill.
    pub recorded_at: DateTime<Utc>,

    pub odometer_km: u32,
    pub previous_odometer_km: u32,
}

/// Consecutive fills whose odometer went backward.
pub fn fill_regressions(fills: &[FuelEvent]) -> Vec<FillRegression> {
    fills
        .windows(2)
        .filter(|pair| pair[1].odometer_km < pair[0].odometer_km)
        .map(|pair| FillRegression {
            recorded_at: pair[1].recorded_at,
            odometer_km: pair[1].odometer_km,
            previous_odometer_km: pair[0].odometer_km,
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use fm_common::VehicleId;

    fn make_fill(secs: i64, odometer_km: u32, liters: f64, total_cost: f64) -> FuelEvent {
        FuelEvent {
            vehicle_id: VehicleId(1),
            recorded_at: DateTime::from_timestamp(secs, 0).unwrap(),
            odometer_km,
            liters,
            total_cost,
            fuel_type: None,
            invoice_ref: None,
        }
    }

    #[test]
    fn test_cost_per_km_needs_two_fills() {
        assert!(cost_per_km(&[]).is_none());
        assert!(cost_per_km(&[make_fill(0, 1000, 20.0, 100.0)]).is_none());
    }

    #[test]
    fn test_cost_per_km_basic() {
        let fills = vec![
            make_fill(0, 1000, 20.0, 150.0),
            make_fill(86_400, 1500, 22.0, 200.0),
        ];
        assert_eq!(cost_per_km(&fills), Some(0.7));
    }

    #[test]
    fn test_cost_per_km_requires_forward_span() {
        let fills = vec![
            make_fill(0, 1500, 20.0, 150.0),
            make_fill(86_400, 1500, 22.0, 200.0),
        ];
        assert!(cost_per_km(&fills).is_none());
    }

    #[test]
    fn test_km_per_liter_rounded() {
        let fills = vec![
            make_fill(0, 1000, 30.0, 150.0),
            make_fill(86_400, 1450, 30.0, 150.0),
        ];
        // 450 km / 60 L = 7.5
        assert_eq!(km_per_liter(&fills), Some(7.5));
    }

    #[test]
    fn test_km_per_liter_zero_volume() {
        let fills = vec![
            make_fill(0, 1000, 0.0, 0.0),
            make_fill(86_400, 1450, 0.0, 0.0),
        ];
        assert!(km_per_liter(&fills).is_none());
    }

    #[test]
    fn test_fill_plausibility() {
        let fills = vec![make_fill(0, 1000, 20.0, 100.0), make_fill(1, 1200, 20.0, 100.0)];
        assert!(is_plausible_fill_odometer(&fills, 1200));
        assert!(is_plausible_fill_odometer(&fills, 1300));
        assert!(!is_plausible_fill_odometer(&fills, 1199));
        // Empty history accepts anything.
        assert!(is_plausible_fill_odometer(&[], 0));
        assert!(is_plausible_fill_odometer(&[], 999_999));
    }

    #[test]
    fn test_check_fill_record() {
        let fills = vec![make_fill(0, 1000, 20.0, 100.0)];
        let check = check_fill(&fills, 950);
        assert_eq!(check.max_recorded_km, 1000);
        assert!(!check.plausible);
    }

    #[test]
    fn test_fill_regressions() {
        let fills = vec![
            make_fill(0, 1000, 20.0, 100.0),
            make_fill(86_400, 950, 20.0, 100.0),
            make_fill(2 * 86_400, 1100, 20.0, 100.0),
        ];
        let regressions = fill_regressions(&fills);
        assert_eq!(regressions.len(), 1);
        assert_eq!(regressions[0].odometer_km, 950);
        assert_eq!(regressions[0].previous_odometer_km, 1000);
    }
}
