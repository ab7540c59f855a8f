//! fm-core CLI entry point.
//!
//! One invocation = one request: resolve config, load the snapshot, run
//! the requested analysis for one vehicle, render, exit with a stable
//! code. See `exit_codes` for the code table.

use clap::{Parser, Subcommand};
use fm_common::{Error, OutputFormat, Result};
use fm_core::analysis::{
    annotate_rolling, build_timeline, compute_efficiency, detect_anomalies, predict_maintenance,
    TimelinePoint,
};
use fm_core::event::{FuelEvent, VehicleRecord};
use fm_core::report;
use fm_core::store::{self, EventSource, FleetSnapshot, LoadedSnapshot};
use fm_core::{ExitCode, RequestContext};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fm-core", version, about = "Fleet fuel/odometer analytics")]
struct Cli {
    /// Path to the fleet snapshot JSON export.
    #[arg(long, global = true, env = "FM_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Path to fleet.json (overrides FM_CONFIG and the XDG lookup).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Log filter, e.g. "info" or "fm_core=debug".
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Merged, rolling-annotated odometer timeline for a vehicle.
    Timeline {
        /// Vehicle plate or numeric id.
        #[arg(long)]
        vehicle: String,
    },

    /// Odometer consistency anomalies.
    Anomalies {
        #[arg(long)]
        vehicle: String,
    },

    /// Efficiency metrics: distance, consumption, cost rates.
    Efficiency {
        #[arg(long)]
        vehicle: String,
    },

    /// Next-service forecast.
    Forecast {
        #[arg(long)]
        vehicle: String,

        /// Odometer at the last completed service, km. Falls back to the
        /// config entry for the plate, then 0.
        #[arg(long)]
        last_service_km: Option<u32>,
    },

    /// Full per-vehicle report: timeline, anomalies, efficiency,
    /// forecast, and fill-history metrics.
    Report {
        #[arg(long)]
        vehicle: String,

        #[arg(long)]
        last_service_km: Option<u32>,
    },

    /// Check a prospective fill odometer against the fill history.
    CheckFill {
        #[arg(long)]
        vehicle: String,

        /// Odometer the driver is about to enter, km.
        #[arg(long)]
        odometer_km: u32,
    },

    /// Print the JSON Schema for snapshot files.
    Schema,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_json);

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            let code = exit_code_for(&err);
            tracing::error!(error = %err, code = err.code(), "command failed");
            eprintln!("error: {err}");
            code
        }
    };
    std::process::exit(code.as_i32());
}

fn run(cli: Cli) -> Result<ExitCode> {
    if let Command::Schema = cli.command {
        let schema = schemars::schema_for!(FleetSnapshot);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(ExitCode::Clean);
    }

    let resolved = fm_config::resolve_config(cli.config.as_deref())?;
    let format = cli
        .format
        .or(resolved.config.default_format)
        .unwrap_or_default();
    let ctx = RequestContext::new(resolved.config, format);

    let snapshot_path = cli
        .snapshot
        .clone()
        .or_else(|| ctx.config.snapshot_path.clone())
        .ok_or_else(|| {
            Error::Config(
                "no snapshot given: pass --snapshot or set snapshot_path in fleet.json".to_string(),
            )
        })?;
    let loaded = store::load_snapshot(&snapshot_path).map_err(Error::from)?;

    match cli.command {
        Command::Timeline { vehicle } => {
            let (record, _fuel, timeline) = vehicle_pipeline(&loaded, &vehicle)?;
            if ctx.format.is_json() {
                println!("{}", report::render_json(&timeline, ctx.format)?);
            } else {
                println!("vehicle {}: {} points", record.plate, timeline.len());
                print!("{}", report::render_timeline_table(&timeline));
            }
            Ok(ExitCode::Clean)
        }

        Command::Anomalies { vehicle } => {
            let (_record, _fuel, timeline) = vehicle_pipeline(&loaded, &vehicle)?;
            let anomalies = detect_anomalies(&timeline);
            if ctx.format.is_json() {
                println!("{}", report::render_json(&anomalies, ctx.format)?);
            } else {
                print!("{}", report::render_anomalies_table(&anomalies));
            }
            Ok(if anomalies.is_empty() {
                ExitCode::Clean
            } else {
                ExitCode::AnomaliesFound
            })
        }

        Command::Efficiency { vehicle } => {
            let (record, fuel, timeline) = vehicle_pipeline(&loaded, &vehicle)?;
            match compute_efficiency(&timeline, &fuel) {
                Some(metrics) => {
                    if ctx.format.is_json() {
                        println!("{}", report::render_json(&metrics, ctx.format)?);
                    } else {
                        print!("{}", report::render_efficiency_table(&metrics));
                    }
                    Ok(ExitCode::Clean)
                }
                None => insufficient(&ctx, &format!("no usable history for {}", record.plate)),
            }
        }

        Command::Forecast {
            vehicle,
            last_service_km,
        } => {
            let (record, _fuel, timeline) = vehicle_pipeline(&loaded, &vehicle)?;
            let last_service =
                last_service_km.unwrap_or_else(|| ctx.config.last_service_for(&record.plate));
            match predict_maintenance(&timeline, last_service, ctx.now) {
                Some(forecast) => {
                    if ctx.format.is_json() {
                        println!("{}", report::render_json(&forecast, ctx.format)?);
                    } else {
                        print!("{}", report::render_forecast_table(&forecast));
                    }
                    Ok(ExitCode::Clean)
                }
                None => insufficient(&ctx, &format!("no odometer history for {}", record.plate)),
            }
        }

        Command::Report {
            vehicle,
            last_service_km,
        } => {
            let record = resolve_vehicle(&loaded, &vehicle)?.clone();
            let last_service =
                last_service_km.unwrap_or_else(|| ctx.config.last_service_for(&record.plate));
            let vehicle_report = report::build_report(&ctx, &loaded, &record, last_service)?;
            if ctx.format.is_json() {
                println!("{}", report::render_json(&vehicle_report, ctx.format)?);
            } else {
                print!("{}", report::render_report_table(&vehicle_report));
            }
            Ok(if vehicle_report.anomalies.is_empty() {
                ExitCode::Clean
            } else {
                ExitCode::AnomaliesFound
            })
        }

        Command::CheckFill {
            vehicle,
            odometer_km,
        } => {
            let record = resolve_vehicle(&loaded, &vehicle)?.clone();
            let check = report::build_fill_check(&loaded, &record, odometer_km)?;
            if ctx.format.is_json() {
                println!("{}", report::render_json(&check, ctx.format)?);
            } else {
                println!(
                    "reported {} km vs max recorded {} km: {}",
                    check.reported_km,
                    check.max_recorded_km,
                    if check.plausible { "plausible" } else { "implausible" }
                );
            }
            Ok(if check.plausible {
                ExitCode::Clean
            } else {
                ExitCode::AnomaliesFound
            })
        }

        Command::Schema => unreachable!("handled before snapshot loading"),
    }
}

/// Empty-result path: an informational line, never an error banner.
fn insufficient(ctx: &RequestContext, message: &str) -> Result<ExitCode> {
    if ctx.format.is_json() {
        println!("null");
    } else {
        println!("not enough data: {message}");
    }
    Ok(ExitCode::InsufficientData)
}

fn resolve_vehicle<'a>(loaded: &'a LoadedSnapshot, query: &str) -> Result<&'a VehicleRecord> {
    loaded.snapshot.find_vehicle(query).ok_or_else(|| Error::VehicleNotFound {
        query: query.to_string(),
    })
}

fn vehicle_pipeline(
    loaded: &LoadedSnapshot,
    query: &str,
) -> Result<(VehicleRecord, Vec<FuelEvent>, Vec<TimelinePoint>)> {
    let record = resolve_vehicle(loaded, query)?.clone();
    let fuel = loaded.snapshot.fuel_events(record.id)?;
    let inspections = loaded.snapshot.inspection_events(record.id)?;
    let timeline = annotate_rolling(&build_timeline(&fuel, &inspections, record.id));
    Ok((record, fuel, timeline))
}

fn exit_code_for(err: &Error) -> ExitCode {
    match err {
        Error::Config(_) | Error::ConfigValidation(_) => ExitCode::ConfigError,
        Error::Snapshot(_) | Error::SnapshotSchema { .. } | Error::VehicleNotFound { .. } => {
            ExitCode::SnapshotError
        }
        Error::InsufficientData(_) => ExitCode::InsufficientData,
        Error::Io(_) => ExitCode::IoError,
        Error::Json(_) => ExitCode::InternalError,
    }
}

fn init_tracing(filter: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_new(filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
