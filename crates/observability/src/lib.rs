//! # Observability
//!
//! Tracing and metrics wiring for the sidecar.
//!
//! Responsibilities:
//! - Tracing subscriber initialization (JSON / pretty / compact)
//! - Optional Prometheus exporter for the `metrics` events the business
//!   crates emit
//! - Metric descriptions for everything the workspace records

use anyhow::{Context, Result};
use metrics::{describe_counter, describe_gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, Default)]
pub enum LogFormat {
    /// JSON structured logs.
    Json,
    /// Human-readable multi-line format.
    Pretty,
    /// Compact single-line format.
    #[default]
    Compact,
}

/// Observability configuration.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Log output format.
    pub log_format: LogFormat,
    /// Prometheus listen port (None = exporter disabled).
    pub metrics_port: Option<u16>,
    /// Default log filter when `RUST_LOG` is unset.
    pub default_log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Compact,
            metrics_port: None,
            default_log_level: "info".to_string(),
        }
    }
}

/// Initialize tracing and (if configured) the Prometheus exporter.
pub fn init_with_config(config: ObservabilityConfig) -> Result<()> {
    init_tracing(&config)?;

    if let Some(port) = config.metrics_port {
        init_metrics_only(port)?;
    }

    tracing::info!(
        log_format = ?config.log_format,
        metrics_port = ?config.metrics_port,
        "observability initialized"
    );
    Ok(())
}

/// Initialize with defaults: compact logs, no exporter.
pub fn init() -> Result<()> {
    init_with_config(ObservabilityConfig::default())
}

/// Install only the Prometheus exporter.
///
/// For binaries that set up their own tracing subscriber.
pub fn init_metrics_only(port: u16) -> Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()
        .context("failed to install Prometheus recorder")?;
    describe_metrics();
    tracing::info!(port, "Prometheus metrics endpoint initialized");
    Ok(())
}

fn init_tracing(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_log_level));

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_file(true))
            .try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
    }
    .context("failed to initialize tracing subscriber")
}

/// Register descriptions for every metric the workspace emits.
fn describe_metrics() {
    describe_counter!(
        "logdemux_records_total",
        "Records dispatched to a sink, labeled by channel"
    );
    describe_counter!(
        "logdemux_records_dropped_total",
        "Records dropped for an unrecognized channel tag"
    );
    describe_counter!(
        "logdemux_sink_write_failures_total",
        "Records lost to sink write failures, labeled by channel"
    );
    describe_counter!(
        "logdemux_decode_errors_total",
        "Frame decode faults recovered by resynchronization"
    );
    describe_gauge!("logdemux_sessions_active", "Currently registered sessions");
}
