//! Bot credentials taken from the environment.

use std::fmt;
use std::sync::LazyLock;

use base64::Engine;
use base64::alphabet;
use base64::engine::DecodePaddingMode;
use base64::engine::GeneralPurpose;
use base64::engine::GeneralPurposeConfig;
use regex::Regex;

use crate::ConfigError;

pub const TOKEN_VAR: &str = "DISCORD_BOT_TOKEN";
pub const APPLICATION_ID_VAR: &str = "DISCORD_BOT_APPLICATION_ID";

// <application id, base64>.<timestamp>.<signature>
static TOKEN_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[A-Za-z0-9_-]+={0,2}\.[A-Za-z0-9_-]+={0,2}\.[A-Za-z0-9_-]{38}$")
		.expect("token pattern compiles")
});

const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
	&alphabet::STANDARD,
	GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	pub token: String,
	pub application_id: String,
}

impl fmt::Debug for Credentials {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Credentials")
			.field("token", &"<redacted>")
			.field("application_id", &self.application_id)
			.finish()
	}
}

impl Credentials {
	/// Load `.env` if present, then read the credentials from the process
	/// environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		if let Err(e) = dotenvy::dotenv() {
			if !e.not_found() {
				return Err(e.into());
			}
		}
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Read and check the credentials through `lookup`.
	///
	/// The token's first segment encodes the application id it was issued
	/// for; a token for another application is rejected.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let token = lookup(TOKEN_VAR).ok_or(ConfigError::MissingEnv(TOKEN_VAR))?;
		let application_id =
			lookup(APPLICATION_ID_VAR).ok_or(ConfigError::MissingEnv(APPLICATION_ID_VAR))?;

		if !TOKEN_SHAPE.is_match(&token) {
			return Err(ConfigError::MalformedToken);
		}
		if application_id.is_empty() || !application_id.bytes().all(|b| b.is_ascii_digit()) {
			return Err(ConfigError::MalformedApplicationId(application_id));
		}

		let encoded_id = token.split('.').next().unwrap_or_default();
		let decoded = LENIENT_BASE64
			.decode(encoded_id)
			.ok()
			.and_then(|bytes| String::from_utf8(bytes).ok());
		if decoded.as_deref() != Some(application_id.as_str()) {
			return Err(ConfigError::TokenMismatch(application_id));
		}

		Ok(Self {
			token,
			application_id,
		})
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use rstest::rstest;

	use super::*;

	// "123456789012345678" in base64
	const APP_ID: &str = "123456789012345678";
	const ID_SEGMENT: &str = "MTIzNDU2Nzg5MDEyMzQ1Njc4";
	const SIGNATURE: &str = "abcdefghijklmnopqrstuvwxyz_ABCDEFGHIJK";

	fn token(id_segment: &str) -> String {
		format!("{}.GhT2xQ.{}", id_segment, SIGNATURE)
	}

	fn env(pairs: &[(&str, String)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.clone()))
			.collect();
		move |key| map.get(key).cloned()
	}

	#[test]
	fn test_valid_credentials() {
		let creds = Credentials::from_lookup(env(&[
			(TOKEN_VAR, token(ID_SEGMENT)),
			(APPLICATION_ID_VAR, APP_ID.to_string()),
		]))
		.unwrap();
		assert_eq!(creds.application_id, APP_ID);
		assert!(!format!("{:?}", creds).contains(SIGNATURE));
	}

	#[test]
	fn test_missing_token() {
		let err =
			Credentials::from_lookup(env(&[(APPLICATION_ID_VAR, APP_ID.to_string())])).unwrap_err();
		assert!(matches!(err, ConfigError::MissingEnv(TOKEN_VAR)));
	}

	#[rstest]
	#[case("not-a-token")]
	#[case("MTIz.GhT2xQ.short")]
	#[case("MTIz GhT2xQ abcdefghijklmnopqrstuvwxyz_ABCDEFGHIJK")]
	fn test_malformed_token(#[case] raw: &str) {
		let err = Credentials::from_lookup(env(&[
			(TOKEN_VAR, raw.to_string()),
			(APPLICATION_ID_VAR, APP_ID.to_string()),
		]))
		.unwrap_err();
		assert!(matches!(err, ConfigError::MalformedToken));
	}

	#[test]
	fn test_non_numeric_application_id() {
		let err = Credentials::from_lookup(env(&[
			(TOKEN_VAR, token(ID_SEGMENT)),
			(APPLICATION_ID_VAR, "herald".to_string()),
		]))
		.unwrap_err();
		assert!(matches!(err, ConfigError::MalformedApplicationId(_)));
	}

	#[test]
	fn test_token_for_other_application() {
		let err = Credentials::from_lookup(env(&[
			(TOKEN_VAR, token(ID_SEGMENT)),
			(APPLICATION_ID_VAR, "987654321".to_string()),
		]))
		.unwrap_err();
		assert!(matches!(err, ConfigError::TokenMismatch(ref id) if id == "987654321"));
	}
}
