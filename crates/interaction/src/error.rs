//! Error types for interaction payload parsing.

use thiserror::Error;

/// Errors that can occur while decoding a payload from the platform.
#[derive(Error, Debug)]
pub enum InteractionError {
	/// Payload is not valid JSON or does not match the expected shape
	#[error("Malformed payload: {0}")]
	Malformed(#[from] serde_json::Error),

	/// Unknown option type code
	#[error("Unknown option type: {0}")]
	UnknownOptionType(u8),

	/// Unknown interaction type code
	#[error("Unknown interaction type: {0}")]
	UnknownInteractionType(u8),

	/// Snowflake that is neither a decimal string nor an integer
	#[error("Invalid id: {0}")]
	InvalidId(String),
}
