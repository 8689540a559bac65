//! Configuration for the Herald bot
//!
//! Settings come from an optional configuration file (TOML, JSON or YAML)
//! overlaid with command-line flags, and live in a global hot-swappable
//! slot so that a reload is visible to every reader without restarting.
//!
//! # Example
//!
//! ```no_run
//! use config::{BOT_CONF, Cli, Parser, setup};
//!
//! let args = Cli::parse();
//! setup(&args)?;
//!
//! let config = BOT_CONF.load();
//! println!("Gateway address: {}:{}", config.host, config.port);
//! # Ok::<(), config::ConfigError>(())
//! ```

pub mod credentials;
mod error;

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::OnceLock;

use arc_swap::ArcSwap;
pub use clap::Parser;
use clap::Subcommand;
pub use credentials::Credentials;
pub use error::ConfigError;
use serde::Deserialize;
use serde::Serialize;
use tracing::info;
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "conf/config.toml";

const ECHO_DELAY_RANGE: std::ops::RangeInclusive<u64> = 1000..=60000;

/// Command-line arguments for the bot
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
	/// Configuration file path (TOML, JSON, or YAML).
	/// Defaults to conf/config.toml if it exists.
	#[arg(short, long, global = true)]
	pub config: Option<PathBuf>,

	/// Port the local gateway listens on
	#[arg(short, long, global = true)]
	pub port: Option<u16>,

	/// Host the local gateway binds to
	#[arg(long, global = true)]
	pub host: Option<String>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, global = true)]
	pub log_level: Option<String>,

	#[command(subcommand)]
	pub mode: Option<Mode>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Mode {
	/// Run the interaction gateway (default)
	Serve,
	/// Print the registration payload for every command
	Schema {
		/// Write to this file instead of stdout
		#[arg(short, long)]
		output: Option<PathBuf>,
	},
}

impl Cli {
	pub fn mode(&self) -> Mode {
		self.mode.clone().unwrap_or(Mode::Serve)
	}
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BotConfig {
	pub host: String,
	pub port: u16,
	pub log_level: String,
	/// Minimum gap between two coalesced reply updates
	pub show_fast_delay_ms: u64,
	pub commands: CommandsConfig,
}

impl Default for BotConfig {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".into(),
			port: 7878,
			log_level: "info".into(),
			show_fast_delay_ms: 3000,
			commands: CommandsConfig::default(),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CommandsConfig {
	pub echo: EchoConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EchoConfig {
	/// Pause between repeated echo follow-ups
	pub echo_delay_ms: u64,
}

impl Default for EchoConfig {
	fn default() -> Self {
		Self {
			echo_delay_ms: 1000,
		}
	}
}

impl BotConfig {
	pub fn validate(&self) -> Result<(), ConfigError> {
		telemetry::logger::check_level(&self.log_level)
			.map_err(|e| ConfigError::Invalid(e.to_string()))?;

		if self.show_fast_delay_ms == 0 {
			return Err(ConfigError::Invalid(
				"show_fast_delay_ms must be positive".into(),
			));
		}

		let delay = self.commands.echo.echo_delay_ms;
		if !ECHO_DELAY_RANGE.contains(&delay) {
			return Err(ConfigError::Invalid(format!(
				"commands.echo.echo_delay_ms must be within {}..={}, got {}",
				ECHO_DELAY_RANGE.start(),
				ECHO_DELAY_RANGE.end(),
				delay
			)));
		}
		Ok(())
	}

	fn apply(&mut self, args: &Cli) {
		if let Some(host) = &args.host {
			self.host = host.clone();
		}
		if let Some(port) = args.port {
			self.port = port;
		}
		if let Some(log_level) = &args.log_level {
			self.log_level = log_level.clone();
		}
	}
}

/// Build and validate the configuration described by `args`: the chosen
/// (or default) file, overlaid with explicit flags.
pub fn resolve(args: &Cli) -> Result<BotConfig, ConfigError> {
	let mut config = match args.config.as_deref() {
		Some(p) => load_from_file(p)?,
		None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from_file(DEFAULT_CONFIG_PATH)?,
		None => BotConfig::default(),
	};
	config.apply(args);
	config.validate()?;
	Ok(config)
}

pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<BotConfig, ConfigError> {
	let path_ref = path.as_ref();
	let content = std::fs::read_to_string(path_ref).map_err(|source| ConfigError::Io {
		path: path_ref.display().to_string(),
		source,
	})?;

	let extension = path_ref
		.extension()
		.and_then(|ext| ext.to_str())
		.ok_or(ConfigError::NoExtension)?;

	match extension.to_lowercase().as_str() {
		"toml" => Ok(toml::from_str(&content)?),
		"json" => Ok(serde_json::from_str(&content)?),
		"yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
		_ => Err(ConfigError::UnsupportedFormat(extension.to_string())),
	}
}

pub struct GlobalConfig {
	inner: OnceLock<ArcSwap<BotConfig>>,
	origin: OnceLock<Cli>,
}

impl GlobalConfig {
	pub const fn new() -> Self {
		Self {
			inner: OnceLock::new(),
			origin: OnceLock::new(),
		}
	}

	/// Install the first configuration and remember where it came from.
	/// Later calls are no-ops.
	pub fn init(&self, config: BotConfig, origin: Cli) {
		let _ = self.inner.set(ArcSwap::from_pointee(config));
		let _ = self.origin.set(origin);
	}

	pub fn is_initialized(&self) -> bool {
		self.inner.get().is_some()
	}

	pub fn load(&self) -> arc_swap::Guard<Arc<BotConfig>> {
		self.inner.get().expect("Config is not initialized").load()
	}

	/// An owned snapshot, for holding across await points.
	pub fn load_full(&self) -> Arc<BotConfig> {
		self.inner.get().expect("Config is not initialized").load_full()
	}

	/// Update the configuration with a new one
	pub fn update(&self, new_config: BotConfig) -> Result<(), ConfigError> {
		self.inner
			.get()
			.ok_or(ConfigError::NotInitialized)?
			.store(Arc::new(new_config));
		Ok(())
	}

	/// Re-read the configuration from the sources used at startup and swap
	/// it in. The current configuration stays active if the new one is
	/// invalid. A changed log level is applied to the running logger.
	pub fn reload(&self) -> Result<Arc<BotConfig>, ConfigError> {
		let slot = self.inner.get().ok_or(ConfigError::NotInitialized)?;
		let origin = self.origin.get().ok_or(ConfigError::NotInitialized)?;

		let fresh = Arc::new(resolve(origin)?);
		let previous = slot.swap(fresh.clone());

		if previous.log_level != fresh.log_level {
			if let Err(e) = telemetry::reload_log_level(&fresh.log_level) {
				warn!(error = %e, "Log level not applied");
			}
		}
		info!("Configuration reloaded");
		Ok(fresh)
	}
}

impl Default for GlobalConfig {
	fn default() -> Self {
		Self::new()
	}
}

pub static BOT_CONF: GlobalConfig = GlobalConfig::new();

/// Helper macro to access bot configuration fields
///
/// Usage:
/// - For Copy types (numbers): `let port = bot_config!(port);`
/// - For Borrowed types (Strings): `let host = &bot_config!(host);`
#[macro_export]
macro_rules! bot_config {
	($($field:ident).+) => {
		$crate::BOT_CONF.load().$($field).+
	};
}

/// Resolve the configuration, start the logger at its level and install it
/// as [`BOT_CONF`].
pub fn setup(args: &Cli) -> Result<(), ConfigError> {
	let config = resolve(args)?;
	telemetry::init(&config.log_level)?;
	BOT_CONF.init(config, args.clone());
	Ok(())
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
		let path = dir.path().join(name);
		std::fs::write(&path, content).unwrap();
		path
	}

	#[test]
	fn test_parse_toml() {
		let dir = tempfile::tempdir().unwrap();
		let path = write(
			&dir,
			"config.toml",
			r#"
host = "0.0.0.0"
port = 1234
log_level = "debug"

[commands.echo]
echo_delay_ms = 2500
"#,
		);

		let config = load_from_file(&path).unwrap();
		assert_eq!(config.host, "0.0.0.0");
		assert_eq!(config.port, 1234);
		assert_eq!(config.log_level, "debug");
		assert_eq!(config.show_fast_delay_ms, 3000);
		assert_eq!(config.commands.echo.echo_delay_ms, 2500);
	}

	#[test]
	fn test_parse_json() {
		let dir = tempfile::tempdir().unwrap();
		let path = write(
			&dir,
			"config.json",
			r#"{"port": 1234, "show_fast_delay_ms": 500, "commands": {"echo": {"echo_delay_ms": 1000}}}"#,
		);

		let config = load_from_file(&path).unwrap();
		assert_eq!(config.port, 1234);
		assert_eq!(config.show_fast_delay_ms, 500);
		assert_eq!(config.host, "127.0.0.1");
	}

	#[test]
	fn test_parse_yaml() {
		let dir = tempfile::tempdir().unwrap();
		let path = write(
			&dir,
			"config.yml",
			"log_level: warn\ncommands:\n  echo:\n    echo_delay_ms: 60000\n",
		);

		let config = load_from_file(&path).unwrap();
		assert_eq!(config.log_level, "warn");
		assert_eq!(config.commands.echo.echo_delay_ms, 60000);
	}

	#[rstest]
	#[case("config.ini", "ini")]
	#[case("config.TXT", "TXT")]
	fn test_unsupported_format(#[case] name: &str, #[case] ext: &str) {
		let dir = tempfile::tempdir().unwrap();
		let path = write(&dir, name, "port = 1");
		let err = load_from_file(&path).unwrap_err();
		assert!(matches!(err, ConfigError::UnsupportedFormat(ref e) if e == ext));
	}

	#[test]
	fn test_missing_file_and_extension() {
		let dir = tempfile::tempdir().unwrap();
		assert!(matches!(
			load_from_file(dir.path().join("absent.toml")),
			Err(ConfigError::Io { .. })
		));
		let bare = write(&dir, "config", "");
		assert!(matches!(load_from_file(&bare), Err(ConfigError::NoExtension)));
	}

	#[rstest]
	#[case(999, false)]
	#[case(1000, true)]
	#[case(60000, true)]
	#[case(60001, false)]
	fn test_echo_delay_bounds(#[case] delay: u64, #[case] ok: bool) {
		let mut config = BotConfig::default();
		config.commands.echo.echo_delay_ms = delay;
		assert_eq!(config.validate().is_ok(), ok);
	}

	#[test]
	fn test_invalid_log_level_is_rejected() {
		let config = BotConfig {
			log_level: "loud".into(),
			..BotConfig::default()
		};
		assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
	}

	#[test]
	fn test_flags_override_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = write(&dir, "config.toml", "host = \"10.0.0.1\"\nport = 1111\n");
		let args = Cli {
			config: Some(path),
			port: Some(2222),
			..Cli::default()
		};

		let config = resolve(&args).unwrap();
		assert_eq!(config.host, "10.0.0.1");
		assert_eq!(config.port, 2222);
	}

	#[test]
	fn test_reload_picks_up_file_changes() {
		let dir = tempfile::tempdir().unwrap();
		let path = write(&dir, "config.toml", "[commands.echo]\necho_delay_ms = 1000\n");
		let args = Cli {
			config: Some(path.clone()),
			..Cli::default()
		};

		let global = GlobalConfig::new();
		assert!(matches!(global.reload(), Err(ConfigError::NotInitialized)));
		global.init(resolve(&args).unwrap(), args);

		std::fs::write(&path, "[commands.echo]\necho_delay_ms = 5000\n").unwrap();
		let fresh = global.reload().unwrap();
		assert_eq!(fresh.commands.echo.echo_delay_ms, 5000);
		assert_eq!(global.load().commands.echo.echo_delay_ms, 5000);

		// An invalid file leaves the active configuration in place.
		std::fs::write(&path, "[commands.echo]\necho_delay_ms = 5\n").unwrap();
		assert!(global.reload().is_err());
		assert_eq!(global.load().commands.echo.echo_delay_ms, 5000);
	}

	#[test]
	fn test_cli_defaults_to_serve() {
		let args = Cli::parse_from(["herald"]);
		assert_eq!(args.mode(), Mode::Serve);

		let args = Cli::parse_from(["herald", "schema", "--output", "commands.json", "-l", "debug"]);
		assert_eq!(
			args.mode(),
			Mode::Schema {
				output: Some(PathBuf::from("commands.json"))
			}
		);
		assert_eq!(args.log_level.as_deref(), Some("debug"));
	}
}
