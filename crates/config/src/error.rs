use telemetry::TelemetryError;
use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("Failed to read configuration file '{path}': {source}")]
	Io {
		source: std::io::Error,
		path: String,
	},

	#[error("Failed to parse TOML configuration: {0}")]
	TomlParse(#[from] toml::de::Error),

	#[error("Failed to parse JSON configuration: {0}")]
	JsonParse(#[from] serde_json::Error),

	#[error("Failed to parse YAML configuration: {0}")]
	YamlParse(#[from] serde_yaml::Error),

	#[error("Unsupported configuration format: {0}")]
	UnsupportedFormat(String),

	#[error("Configuration file has no extension")]
	NoExtension,

	#[error("Invalid configuration: {0}")]
	Invalid(String),

	#[error("Configuration is not initialized")]
	NotInitialized,

	#[error(transparent)]
	Telemetry(#[from] TelemetryError),

	#[error("Failed to load .env file: {0}")]
	Dotenv(#[from] dotenvy::Error),

	#[error("Environment variable {0} is not set")]
	MissingEnv(&'static str),

	#[error("DISCORD_BOT_TOKEN is not a bot token")]
	MalformedToken,

	#[error("DISCORD_BOT_APPLICATION_ID must be a decimal id, got '{0}'")]
	MalformedApplicationId(String),

	#[error("DISCORD_BOT_TOKEN is not for application {0}")]
	TokenMismatch(String),
}
