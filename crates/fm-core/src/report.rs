//! Per-vehicle report assembly and rendering.
//!
//! Pulls one vehicle's events through the whole analysis pipeline and
//! packages the results for the presentation layer: JSON for machines,
//! aligned plain text for terminals. Reports are values; nothing here is
//! persisted.

use crate::analysis::{
    annotate_rolling, build_timeline, check_fill, compute_efficiency, cost_per_km,
    detect_anomalies, fill_regressions, km_per_liter, predict_maintenance, AnomalyRecord,
    EfficiencyReport, FillRegression, MaintenanceForecast, TimelinePoint,
};
use crate::context::RequestContext;
use crate::event::VehicleRecord;
use crate::store::{EventSource, LoadedSnapshot};
use chrono::{DateTime, Utc};
use fm_common::{OutputFormat, PlateNumber, ReportId, Result, VehicleId, SCHEMA_VERSION};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Everything the dashboard layer needs for one vehicle, computed fresh
/// from the full event history.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VehicleReport {
    pub schema_version: String,
    pub report_id: ReportId,
    pub generated_at: DateTime<Utc>,

    /// Snapshot provenance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_name: Option<String>,
    pub snapshot_sha256: String,

    pub vehicle_id: VehicleId,
    pub plate: PlateNumber,

    pub point_count: usize,
    pub timeline: Vec<TimelinePoint>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anomalies: Vec<AnomalyRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<EfficiencyReport>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance: Option<MaintenanceForecast>,

    /// First-to-last fill cost rate, when the fill history supports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_cost_per_km: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_km_per_liter: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fill_regressions: Vec<FillRegression>,
}

/// Build the full report for one vehicle.
///
/// `last_service_km` is the caller-resolved odometer at the last completed
/// service (CLI flag, else config, else 0).
pub fn build_report(
    ctx: &RequestContext,
    loaded: &LoadedSnapshot,
    vehicle: &VehicleRecord,
    last_service_km: u32,
) -> Result<VehicleReport> {
    let fuel = loaded.snapshot.fuel_events(vehicle.id)?;
    let inspections = loaded.snapshot.inspection_events(vehicle.id)?;

    let timeline = annotate_rolling(&build_timeline(&fuel, &inspections, vehicle.id));
    let anomalies = detect_anomalies(&timeline);
    let efficiency = compute_efficiency(&timeline, &fuel);
    let maintenance = predict_maintenance(&timeline, last_service_km, ctx.now);

    tracing::info!(
        vehicle = %vehicle.plate,
        points = timeline.len(),
        anomalies = anomalies.len(),
        "built vehicle report"
    );

    Ok(VehicleReport {
        schema_version: SCHEMA_VERSION.to_string(),
        report_id: ReportId::new(),
        generated_at: ctx.now,
        snapshot_name: loaded.snapshot.name.clone(),
        snapshot_sha256: loaded.checksum_sha256.clone(),
        vehicle_id: vehicle.id,
        plate: vehicle.plate.clone(),
        point_count: timeline.len(),
        anomalies,
        efficiency,
        maintenance,
        fill_cost_per_km: cost_per_km(&fuel),
        fill_km_per_liter: km_per_liter(&fuel),
        fill_regressions: fill_regressions(&fuel),
        timeline,
    })
}

/// Serialize any payload in the requested format; table rendering is done
/// by the per-type helpers below.
pub fn render_json<T: Serialize>(payload: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(payload)?),
        _ => Ok(serde_json::to_string(payload)?),
    }
}

/// Aligned-text timeline listing.
pub fn render_timeline_table(timeline: &[TimelinePoint]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20}  {:<10}  {:>10}  {:>12}  {:>12}",
        "timestamp", "origin", "odometer", "avg (7)", "avg (30)"
    );
    for point in timeline {
        let _ = writeln!(
            out,
            "{:<20}  {:<10}  {:>10}  {:>12}  {:>12}",
            point.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            match point.origin {
                crate::analysis::PointOrigin::Fuel => "fuel",
                crate::analysis::PointOrigin::Inspection => "inspection",
            },
            point.odometer_km,
            point
                .rolling_avg_7
                .map(|v| format!("{v:.1}"))
                .unwrap_or_else(|| "-".to_string()),
            point
                .rolling_avg_30
                .map(|v| format!("{v:.1}"))
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    out
}

/// Aligned-text anomaly listing.
pub fn render_anomalies_table(anomalies: &[AnomalyRecord]) -> String {
    if anomalies.is_empty() {
        return "no anomalies detected\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20}  {:<18}  {:>10}  {:>10}  {:>8}",
        "timestamp", "kind", "before", "after", "delta"
    );
    for record in anomalies {
        let kind = match record.kind {
            crate::analysis::AnomalyKind::OdometerDecreased => "odometer_decreased",
            crate::analysis::AnomalyKind::ImplausibleJump => "implausible_jump",
        };
        let _ = writeln!(
            out,
            "{:<20}  {:<18}  {:>10}  {:>10}  {:>8}",
            record.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            kind,
            record.odometer_before_km,
            record.odometer_after_km,
            record.delta_km,
        );
    }
    out
}

/// Aligned-text efficiency summary.
pub fn render_efficiency_table(report: &EfficiencyReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "total distance     {:>12} km", report.total_distance_km);
    let _ = writeln!(out, "total fuel         {:>12.2} L", report.total_fuel_liters);
    let _ = writeln!(out, "total fuel cost    {:>12.2}", report.total_fuel_cost);
    let _ = writeln!(out, "km per liter       {:>12.2}", report.km_per_liter);
    let _ = writeln!(out, "cost per km        {:>12.2}", report.cost_per_km);
    let _ = writeln!(out, "mean daily km      {:>12.1}", report.mean_daily_km);
    out
}

/// Aligned-text maintenance forecast.
pub fn render_forecast_table(forecast: &MaintenanceForecast) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "current odometer   {:>12} km",
        forecast.current_odometer_km
    );
    let _ = writeln!(
        out,
        "last service at    {:>12} km",
        forecast.odometer_at_last_service_km
    );
    let _ = writeln!(out, "remaining          {:>12} km", forecast.remaining_km);
    match (forecast.days_to_service, forecast.forecast_date) {
        (Some(days), Some(date)) => {
            let _ = writeln!(out, "days to service    {:>12.1}", days);
            let _ = writeln!(
                out,
                "forecast date      {:>12}",
                date.format("%Y-%m-%d").to_string()
            );
        }
        _ => {
            let _ = writeln!(out, "days to service    {:>12}", "no forecast");
        }
    }
    out
}

/// Aligned-text full report.
pub fn render_report_table(report: &VehicleReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "vehicle {} (id {}): {} timeline points",
        report.plate, report.vehicle_id, report.point_count
    );
    let _ = writeln!(out, "snapshot sha256 {}", report.snapshot_sha256);
    let _ = writeln!(out);

    let _ = writeln!(out, "anomalies:");
    out.push_str(&render_anomalies_table(&report.anomalies));
    let _ = writeln!(out);

    match &report.efficiency {
        Some(efficiency) => {
            let _ = writeln!(out, "efficiency:");
            out.push_str(&render_efficiency_table(efficiency));
        }
        None => {
            let _ = writeln!(out, "efficiency: not enough data");
        }
    }
    let _ = writeln!(out);

    match &report.maintenance {
        Some(forecast) => {
            let _ = writeln!(out, "maintenance:");
            out.push_str(&render_forecast_table(forecast));
        }
        None => {
            let _ = writeln!(out, "maintenance: not enough data");
        }
    }

    if let (Some(cost), Some(consumption)) = (report.fill_cost_per_km, report.fill_km_per_liter) {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "fill history: {:.2} per km, {:.2} km/L",
            cost, consumption
        );
    }
    if !report.fill_regressions.is_empty() {
        let _ = writeln!(
            out,
            "fill regressions: {} (see anomalies)",
            report.fill_regressions.len()
        );
    }

    out
}

// check_fill is re-exported through analysis; referenced here so the CLI
// has one import surface for everything it prints.
pub use crate::analysis::FillCheck;

/// Check a prospective fill odometer for one vehicle.
pub fn build_fill_check(
    loaded: &LoadedSnapshot,
    vehicle: &VehicleRecord,
    reported_km: u32,
) -> Result<FillCheck> {
    let fuel = loaded.snapshot.fuel_events(vehicle.id)?;
    Ok(check_fill(&fuel, reported_km))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::FuelEvent;
    use crate::store::{FleetSnapshot, SNAPSHOT_SCHEMA_VERSION};
    use fm_config::FleetConfig;

    fn make_loaded() -> LoadedSnapshot {
        let snapshot = FleetSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION.to_string(),
            name: Some("unit".to_string()),
            recorded_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            vehicles: vec![VehicleRecord {
                id: VehicleId(1),
                plate: PlateNumber::parse("ABC1D23").unwrap(),
                model: None,
                year: None,
                current_odometer_km: None,
            }],
            fuel_events: vec![
                FuelEvent {
                    vehicle_id: VehicleId(1),
                    recorded_at: DateTime::from_timestamp(1_690_000_000, 0).unwrap(),
                    odometer_km: 1_000,
                    liters: 20.0,
                    total_cost: 100.0,
                    fuel_type: None,
                    invoice_ref: None,
                },
                FuelEvent {
                    vehicle_id: VehicleId(1),
                    recorded_at: DateTime::from_timestamp(1_690_086_400, 0).unwrap(),
                    odometer_km: 1_500,
                    liters: 25.0,
                    total_cost: 250.0,
                    fuel_type: None,
                    invoice_ref: None,
                },
            ],
            inspections: vec![],
        };
        LoadedSnapshot {
            snapshot,
            checksum_sha256: "0".repeat(64),
            path: "unit.json".into(),
        }
    }

    fn make_ctx() -> RequestContext {
        RequestContext::at(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            FleetConfig::default(),
            OutputFormat::Table,
        )
    }

    #[test]
    fn test_build_report_assembles_everything() {
        let loaded = make_loaded();
        let vehicle = loaded.snapshot.vehicles[0].clone();

        let report = build_report(&make_ctx(), &loaded, &vehicle, 0).unwrap();
        assert_eq!(report.point_count, 2);
        assert!(report.anomalies.is_empty());

        let efficiency = report.efficiency.as_ref().unwrap();
        assert_eq!(efficiency.total_distance_km, 500);
        assert_eq!(report.fill_cost_per_km, Some(0.7));

        let forecast = report.maintenance.as_ref().unwrap();
        assert_eq!(forecast.remaining_km, 10_000 - 1_500);
    }

    #[test]
    fn test_report_determinism_under_fixed_clock() {
        let loaded = make_loaded();
        let vehicle = loaded.snapshot.vehicles[0].clone();
        let ctx = make_ctx();

        let a = build_report(&ctx, &loaded, &vehicle, 0).unwrap();
        let b = build_report(&ctx, &loaded, &vehicle, 0).unwrap();
        assert_eq!(a.timeline, b.timeline);
        assert_eq!(a.anomalies, b.anomalies);
        assert_eq!(a.efficiency, b.efficiency);
        assert_eq!(a.maintenance, b.maintenance);
    }

    #[test]
    fn test_table_rendering_mentions_placeholder() {
        let loaded = make_loaded();
        let mut vehicle = loaded.snapshot.vehicles[0].clone();
        vehicle.id = VehicleId(99); // no events

        let report = build_report(&make_ctx(), &loaded, &vehicle, 0).unwrap();
        let text = render_report_table(&report);
        assert!(text.contains("efficiency: not enough data"));
        assert!(text.contains("maintenance: not enough data"));
    }
}
