//! Per-invocation request context.
//!
//! Request-scoped state is an explicit value created at invocation start
//! and dropped at the end; nothing analytics-facing lives in process
//! globals. The clock rides along so forecasts stay deterministic under
//! test and replay.

use chrono::{DateTime, Utc};
use fm_common::OutputFormat;
use fm_config::FleetConfig;

/// Context for one analysis request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Request clock, fixed for the whole invocation.
    pub now: DateTime<Utc>,

    pub config: FleetConfig,

    pub format: OutputFormat,
}

impl RequestContext {
    /// Context stamped with the wall clock.
    pub fn new(config: FleetConfig, format: OutputFormat) -> Self {
        Self::at(Utc::now(), config, format)
    }

    /// Fixed-clock context for deterministic tests and replays.
    pub fn at(now: DateTime<Utc>, config: FleetConfig, format: OutputFormat) -> Self {
        Self { now, config, format }
    }
}
