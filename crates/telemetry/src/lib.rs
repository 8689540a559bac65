mod error;
pub mod incident;
pub mod logger;

pub use error::TelemetryError;
pub use logger::init;
pub use logger::reload_log_level;
