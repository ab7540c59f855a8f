//! Odometer timeline analytics.
//!
//! Pipeline: [`build_timeline`] merges raw events, [`annotate_rolling`]
//! adds trailing means, then [`detect_anomalies`], [`compute_efficiency`]
//! and [`predict_maintenance`] each consume the annotated timeline
//! independently. There is no feedback loop and no derived-state
//! persistence; everything recomputes from raw events per request.

pub mod anomaly;
pub mod efficiency;
pub mod fuel;
pub mod maintenance;
pub mod rolling;
pub mod timeline;

pub use anomaly::{
    detect_anomalies, AnomalyKind, AnomalyRecord, MAX_PLAUSIBLE_DAILY_DELTA_KM,
};
pub use efficiency::{compute_efficiency, EfficiencyReport};
pub use fuel::{
    check_fill, cost_per_km, fill_regressions, is_plausible_fill_odometer, km_per_liter,
    FillCheck, FillRegression, MIN_FILL_EVENTS,
};
pub use maintenance::{predict_maintenance, MaintenanceForecast, SERVICE_INTERVAL_KM};
pub use rolling::{annotate_rolling, ROLLING_LONG_WINDOW, ROLLING_SHORT_WINDOW};
pub use timeline::{
    build_timeline, mean_step_delta_km, step_deltas_km, PointOrigin, TimelinePoint,
};
