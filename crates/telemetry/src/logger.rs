use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::reload;
use tracing_subscriber::util::SubscriberInitExt;

use crate::TelemetryError;

const VALID_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Custom time formatter that displays time as "YYYY-MM-DD HH:MM:SS.micros"
struct CustomTimeFormat;

impl FormatTime for CustomTimeFormat {
	fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
		let now = std::time::SystemTime::now();
		let datetime: chrono::DateTime<chrono::Local> = now.into();
		write!(w, "{}", datetime.format("[%Y-%m-%d %H:%M:%S%.6f]"))
	}
}

type ReloadHandle = reload::Handle<EnvFilter, Registry>;

static RELOAD_HANDLE: OnceLock<ReloadHandle> = OnceLock::new();

/// Lowercase `level` and check it names one of the supported levels.
pub fn check_level(level: &str) -> Result<String, TelemetryError> {
	let level_lower = level.to_lowercase();
	if VALID_LEVELS.contains(&level_lower.as_str()) {
		Ok(level_lower)
	} else {
		Err(TelemetryError::InvalidLogLevel(level.to_string()))
	}
}

/// Initialize the console logger at the given level.
///
/// Output goes to stderr and carries a local timestamp, the emitting
/// target and the thread id. The level can later be changed with [`reload_log_level`].
///
/// # Example
///
/// ```no_run
/// telemetry::init("info")?;
/// tracing::info!("Bot starting");
/// # Ok::<(), telemetry::TelemetryError>(())
/// ```
///
/// # Errors
///
/// Fails on an unknown level or when a global subscriber is already set.
pub fn init(level: &str) -> Result<(), TelemetryError> {
	let level = check_level(level)?;

	let (filter_layer, reload_handle) = reload::Layer::new(EnvFilter::new(level));

	tracing_subscriber::registry()
		.with(filter_layer)
		.with(
			fmt::layer()
				.with_writer(std::io::stderr)
				.with_timer(CustomTimeFormat)
				.with_target(true)
				.with_thread_ids(true)
				.with_line_number(false)
				.with_file(false),
		)
		.try_init()
		.map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;

	let _ = RELOAD_HANDLE.set(reload_handle);
	Ok(())
}

/// Reload the log level dynamically
///
/// # Arguments
///
/// * `level` - The new log level to set. Valid values: trace, debug, info,
///   warn, error
///
/// # Example
///
/// ```no_run
/// # use telemetry::logger::reload_log_level;
/// reload_log_level("debug")?;
/// # Ok::<(), telemetry::TelemetryError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The logger has not been initialized
/// - The provided log level is invalid
/// - The reload operation fails
pub fn reload_log_level(level: &str) -> Result<(), TelemetryError> {
	let level = check_level(level)?;

	let handle = RELOAD_HANDLE.get().ok_or(TelemetryError::NotInitialized)?;

	handle
		.reload(EnvFilter::new(&level))
		.map_err(|e| TelemetryError::ReloadFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	/// Valid levels pass validation and then hit the uninitialized logger.
	///
	/// The subscriber is process-global, so these tests never call init().
	#[rstest]
	#[case("trace")]
	#[case("debug")]
	#[case("info")]
	#[case("warn")]
	#[case("error")]
	#[case("TRACE")]
	#[case("DeBuG")]
	fn test_valid_log_levels(#[case] level: &str) {
		let result = reload_log_level(level);
		assert!(
			matches!(result, Err(TelemetryError::NotInitialized)),
			"Expected NotInitialized for valid level: {}",
			level
		);
	}

	#[rstest]
	#[case("invalid")]
	#[case("")]
	#[case("warning")] // Common mistake (should be "warn")
	#[case("critical")]
	fn test_invalid_log_levels(#[case] level: &str) {
		let result = reload_log_level(level);
		assert!(
			matches!(result, Err(TelemetryError::InvalidLogLevel(_))),
			"Expected InvalidLogLevel for: {}",
			level
		);
	}

	#[rstest]
	#[case("Info", "info")]
	#[case("WARN", "warn")]
	fn test_check_level_lowercases(#[case] level: &str, #[case] expected: &str) {
		assert_eq!(check_level(level).unwrap(), expected);
	}

	#[test]
	fn test_init_rejects_unknown_level_before_installing() {
		assert!(matches!(
			init("loud"),
			Err(TelemetryError::InvalidLogLevel(ref l)) if l == "loud"
		));
		assert!(RELOAD_HANDLE.get().is_none());
	}
}
