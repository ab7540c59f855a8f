//! Property-based tests for timeline analytics invariants.

use chrono::DateTime;
use fm_common::VehicleId;
use fm_core::analysis::{
    annotate_rolling, build_timeline, detect_anomalies, AnomalyKind,
    MAX_PLAUSIBLE_DAILY_DELTA_KM,
};
use fm_core::event::{FuelEvent, InspectionEvent, InspectionItems};
use proptest::prelude::*;

fn make_fuel(secs: i64, odometer_km: u32) -> FuelEvent {
    FuelEvent {
        vehicle_id: VehicleId(1),
        recorded_at: DateTime::from_timestamp(secs, 0).unwrap(),
        odometer_km,
        liters: 30.0,
        total_cost: 180.0,
        fuel_type: None,
        invoice_ref: None,
    }
}

fn make_inspection(secs: i64, odometer_km: u32) -> InspectionEvent {
    InspectionEvent {
        vehicle_id: VehicleId(1),
        recorded_at: DateTime::from_timestamp(secs, 0).unwrap(),
        odometer_km,
        kind: None,
        items: InspectionItems::default(),
        notes: None,
    }
}

fn events_strategy() -> impl Strategy<Value = (Vec<FuelEvent>, Vec<InspectionEvent>)> {
    let fuel = prop::collection::vec((0i64..2_000_000, 0u32..200_000), 0..40).prop_map(|raw| {
        raw.into_iter()
            .map(|(secs, km)| make_fuel(secs, km))
            .collect::<Vec<_>>()
    });
    let inspections =
        prop::collection::vec((0i64..2_000_000, 0u32..200_000), 0..40).prop_map(|raw| {
            raw.into_iter()
                .map(|(secs, km)| make_inspection(secs, km))
                .collect::<Vec<_>>()
        });
    (fuel, inspections)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn timeline_is_sorted_non_decreasing((fuel, inspections) in events_strategy()) {
        let timeline = build_timeline(&fuel, &inspections, VehicleId(1));
        prop_assert!(
            timeline.windows(2).all(|w| w[0].timestamp <= w[1].timestamp),
            "timeline out of order"
        );
        prop_assert_eq!(timeline.len(), fuel.len() + inspections.len());
    }

    #[test]
    fn pipeline_is_idempotent((fuel, inspections) in events_strategy()) {
        let first = annotate_rolling(&build_timeline(&fuel, &inspections, VehicleId(1)));
        let second = annotate_rolling(&build_timeline(&fuel, &inspections, VehicleId(1)));
        prop_assert_eq!(&first, &second);

        let anomalies_first = detect_anomalies(&first);
        let anomalies_second = detect_anomalies(&second);
        prop_assert_eq!(anomalies_first, anomalies_second);
    }

    #[test]
    fn rolling_preserves_shape_and_stays_in_range((fuel, inspections) in events_strategy()) {
        let timeline = build_timeline(&fuel, &inspections, VehicleId(1));
        let annotated = annotate_rolling(&timeline);

        prop_assert_eq!(annotated.len(), timeline.len());
        for (plain, rich) in timeline.iter().zip(&annotated) {
            prop_assert_eq!(plain.timestamp, rich.timestamp);
            prop_assert_eq!(plain.odometer_km, rich.odometer_km);
        }

        if let Some(first) = annotated.first() {
            prop_assert_eq!(first.rolling_avg_7, Some(f64::from(first.odometer_km)));
            prop_assert_eq!(first.rolling_avg_30, Some(f64::from(first.odometer_km)));
        }

        // A trailing mean can never leave the global odometer range.
        let lo = annotated.iter().map(|p| p.odometer_km).min().unwrap_or(0);
        let hi = annotated.iter().map(|p| p.odometer_km).max().unwrap_or(0);
        for point in &annotated {
            let avg = point.rolling_avg_7.unwrap();
            prop_assert!(avg >= f64::from(lo) - 1e-6 && avg <= f64::from(hi) + 1e-6);
        }
    }

    #[test]
    fn anomalies_match_the_delta_rule((fuel, inspections) in events_strategy()) {
        let timeline = build_timeline(&fuel, &inspections, VehicleId(1));
        let anomalies = detect_anomalies(&timeline);

        for record in &anomalies {
            match record.kind {
                AnomalyKind::OdometerDecreased => prop_assert!(record.delta_km < 0),
                AnomalyKind::ImplausibleJump => {
                    prop_assert!(record.delta_km > MAX_PLAUSIBLE_DAILY_DELTA_KM)
                }
            }
        }

        // Exactly the offending steps are reported, in order.
        let expected = timeline
            .windows(2)
            .filter(|w| {
                let delta = i64::from(w[1].odometer_km) - i64::from(w[0].odometer_km);
                delta < 0 || delta > MAX_PLAUSIBLE_DAILY_DELTA_KM
            })
            .count();
        prop_assert_eq!(anomalies.len(), expected);
        prop_assert!(anomalies.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }
}
