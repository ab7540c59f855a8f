//! Odometer consistency checks.
//!
//! Two per-step checks over the merged timeline: readings that went
//! backward, and single-step increases too large to be real driving.
//! Malformed upstream values (a typo'd extra digit, a swapped field)
//! surface here as one of the two kinds; no validation happens earlier.

use super::timeline::TimelinePoint;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Largest single-step odometer increase considered plausible, km.
pub const MAX_PLAUSIBLE_DAILY_DELTA_KM: i64 = 1000;

/// Kind of odometer inconsistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    OdometerDecreased,
    ImplausibleJump,
}

/// One detected inconsistency between two consecutive readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnomalyRecord {
    /// Timestamp of the later (offending) reading.
    pub timestamp: DateTime<Utc>,

    pub kind: AnomalyKind,

    pub odometer_before_km: u32,
    pub odometer_after_km: u32,

    /// Step delta, km. Negative for decreases.
    pub delta_km: i64,
}

/// Scan a chronological timeline for odometer anomalies.
///
/// The first point has no predecessor and is never flagged. A decrease is
/// negative and a jump is above the positive threshold, so one step can
/// trigger at most one record; output stays in timeline order.
pub fn detect_anomalies(timeline: &[TimelinePoint]) -> Vec<AnomalyRecord> {
    let mut anomalies = Vec::new();

    for pair in timeline.windows(2) {
        let delta = i64::from(pair[1].odometer_km) - i64::from(pair[0].odometer_km);
        let kind = if delta < 0 {
            AnomalyKind::OdometerDecreased
        } else if delta > MAX_PLAUSIBLE_DAILY_DELTA_KM {
            AnomalyKind::ImplausibleJump
        } else {
            continue;
        };

        anomalies.push(AnomalyRecord {
            timestamp: pair[1].timestamp,
            kind,
            odometer_before_km: pair[0].odometer_km,
            odometer_after_km: pair[1].odometer_km,
            delta_km: delta,
        });
    }

    anomalies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::timeline::PointOrigin;

    fn make_timeline(odometers: &[u32]) -> Vec<TimelinePoint> {
        odometers
            .iter()
            .enumerate()
            .map(|(i, &odometer_km)| TimelinePoint {
                timestamp: DateTime::from_timestamp(i as i64 * 86_400, 0).unwrap(),
                odometer_km,
                origin: PointOrigin::Fuel,
                rolling_avg_7: None,
                rolling_avg_30: None,
            })
            .collect()
    }

    #[test]
    fn test_clean_timeline_has_no_anomalies() {
        let timeline = make_timeline(&[1000, 1080, 1200, 1350]);
        assert!(detect_anomalies(&timeline).is_empty());
    }

    #[test]
    fn test_decrease_flagged() {
        let anomalies = detect_anomalies(&make_timeline(&[100, 90]));
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].kind, AnomalyKind::OdometerDecreased);
        assert_eq!(anomalies[0].delta_km, -10);
        assert_eq!(anomalies[0].odometer_before_km, 100);
        assert_eq!(anomalies[0].odometer_after_km, 90);
    }

    #[test]
    fn test_jump_flagged() {
        let anomalies = detect_anomalies(&make_timeline(&[100, 1500]));
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].kind, AnomalyKind::ImplausibleJump);
        assert_eq!(anomalies[0].delta_km, 1400);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Exactly 1000 km in one step is still plausible.
        assert!(detect_anomalies(&make_timeline(&[5000, 6000])).is_empty());
        assert_eq!(detect_anomalies(&make_timeline(&[5000, 6001])).len(), 1);
    }

    #[test]
    fn test_first_point_never_flagged() {
        assert!(detect_anomalies(&make_timeline(&[999_999])).is_empty());
        assert!(detect_anomalies(&[]).is_empty());
    }

    #[test]
    fn test_records_stay_in_timeline_order() {
        let anomalies = detect_anomalies(&make_timeline(&[1000, 900, 5000, 4900]));
        assert_eq!(anomalies.len(), 3);
        assert!(anomalies.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert_eq!(anomalies[0].kind, AnomalyKind::OdometerDecreased);
        assert_eq!(anomalies[1].kind, AnomalyKind::ImplausibleJump);
        assert_eq!(anomalies[2].kind, AnomalyKind::OdometerDecreased);
    }
}
