//! Logging bootstrap for bookstand binaries.

use anyhow::anyhow;
use bookstand_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// The filter defaults to `info` and can be overridden with `RUST_LOG`.
/// Calling this twice returns an error from the subscriber registry,
/// so binaries invoke it exactly once at bootstrap.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match settings.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    result.map_err(|e| anyhow!("failed to initialize tracing subscriber: {e}"))?;

    tracing::debug!(log_format = ?settings.log_format, "telemetry initialized");
    Ok(())
}
