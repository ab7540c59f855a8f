//! Next-service forecasting from odometer history.

use super::timeline::{mean_step_delta_km, TimelinePoint};
use chrono::{DateTime, Duration, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Fixed distance between scheduled services, km.
pub const SERVICE_INTERVAL_KM: u32 = 10_000;

/// Advisory forecast of the next scheduled service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MaintenanceForecast {
    /// Highest odometer reading on the timeline, km.
    pub current_odometer_km: u32,

    pub odometer_at_last_service_km: u32,

    /// Distance left until the service interval elapses; negative when the
    /// vehicle is overdue.
    pub remaining_km: i64,

    /// Mean of the raw per-step odometer deltas, km per step.
    pub mean_daily_km: f64,

    /// `None` when the history shows no forward movement (no forecast).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_to_service: Option<f64>,

    /// `None` whenever `days_to_service` is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast_date: Option<DateTime<Utc>>,
}

/// Linear next-service extrapolation.
///
/// `None` only when the timeline is empty. The forecast itself is
/// advisory: a plain remaining/mean ratio with no outlier rejection and no
/// confidence interval. `now` is the caller's request clock; passing it in
/// keeps the function deterministic.
pub fn predict_maintenance(
    timeline: &[TimelinePoint],
    odometer_at_last_service_km: u32,
    now: DateTime<Utc>,
) -> Option<MaintenanceForecast> {
    let current_odometer_km = timeline.iter().map(|p| p.odometer_km).max()?;

    let remaining_km = i64::from(SERVICE_INTERVAL_KM)
        - (i64::from(current_odometer_km) - i64::from(odometer_at_last_service_km));

    let mean_daily_km = mean_step_delta_km(timeline);

    let days_to_service = if mean_daily_km > 0.0 {
        Some(remaining_km as f64 / mean_daily_km)
    } else {
        None
    };

    // Saturating cast plus checked add: an absurd extrapolation falls out
    // of chrono's range and becomes "no forecast" instead of a panic.
    let forecast_date = days_to_service
        .and_then(|days| now.checked_add_signed(Duration::seconds((days * 86_400.0) as i64)));

    Some(MaintenanceForecast {
        current_odometer_km,
        odometer_at_last_service_km,
        remaining_km,
        mean_daily_km,
        days_to_service,
        forecast_date,
    })
}
