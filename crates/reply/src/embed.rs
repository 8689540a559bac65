//! Stock embeds for status messages.

use chrono::SecondsFormat;
use chrono::Utc;

use crate::Embed;
use crate::EmbedField;
use crate::EmbedThumbnail;
use crate::Reply;
use crate::truncate;

/// Longest value an embed field may carry.
pub const FIELD_VALUE_LIMIT: usize = 1024;

pub mod color {
	pub const SUCCESS: u32 = 0x17EF17;
	pub const INFO: u32 = 0x1778EE;
	pub const ERROR: u32 = 0xEF3A18;
	pub const WARNING: u32 = 0xE4EF17;
}

pub mod icon {
	pub const SUCCESS: &str = "https://i.imgur.com/d2LZMux.png";
	pub const INFO: &str = "https://i.imgur.com/6r7xDwe.png";
	pub const ERROR: &str = "https://i.imgur.com/VrXlt7k.png";
	pub const WARNING: &str = "https://i.imgur.com/3rN45Cd.png";
}

fn status(color: u32, title: &str, icon: &str) -> Embed {
	Embed {
		title: Some(title.to_string()),
		color: Some(color),
		thumbnail: Some(EmbedThumbnail {
			url: icon.to_string(),
		}),
		..Embed::default()
	}
}

fn field(name: &str, value: &str) -> EmbedField {
	EmbedField {
		name: name.to_string(),
		value: truncate(value, FIELD_VALUE_LIMIT),
		inline: false,
	}
}

pub fn success(message: &str) -> Reply {
	Reply::embed(Embed {
		description: Some(message.to_string()),
		..status(color::SUCCESS, "Success", icon::SUCCESS)
	})
}

pub fn info(message: &str) -> Reply {
	Reply::embed(Embed {
		description: Some(message.to_string()),
		..status(color::INFO, "Information", icon::INFO)
	})
}

pub fn warning(name: &str, description: &str) -> Reply {
	Reply::embed(Embed {
		fields: vec![field(name, description)],
		..status(color::WARNING, "Warning", icon::WARNING)
	})
}

pub fn error(name: &str, description: &str) -> Reply {
	Reply::embed(Embed {
		fields: vec![field(name, description)],
		..status(color::ERROR, "Error", icon::ERROR)
	})
}

/// An unexpected failure. `detail` goes to the log under a fresh tracking
/// id; the user only sees the id.
pub fn catastrophic(name: &str, detail: impl std::fmt::Display) -> Reply {
	let tracking_id = telemetry::incident::report(name, detail);
	Reply::embed(Embed {
		fields: vec![field(
			name,
			&format!("Please contact bot owner with error\n`{}`", tracking_id),
		)],
		timestamp: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
		..status(color::ERROR, "Catastrophic Error", icon::ERROR)
	})
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	fn only_embed(reply: Reply) -> Embed {
		let mut embeds = reply.embeds.unwrap();
		assert_eq!(embeds.len(), 1);
		embeds.remove(0)
	}

	#[rstest]
	#[case(success("ok"), "Success", color::SUCCESS, icon::SUCCESS)]
	#[case(info("fyi"), "Information", color::INFO, icon::INFO)]
	#[case(warning("careful", ""), "Warning", color::WARNING, icon::WARNING)]
	#[case(error("broken", "why"), "Error", color::ERROR, icon::ERROR)]
	fn test_status_embeds(
		#[case] reply: Reply,
		#[case] title: &str,
		#[case] color: u32,
		#[case] icon: &str,
	) {
		let embed = only_embed(reply);
		assert_eq!(embed.title.as_deref(), Some(title));
		assert_eq!(embed.color, Some(color));
		assert_eq!(embed.thumbnail.map(|t| t.url).as_deref(), Some(icon));
	}

	#[test]
	fn test_error_puts_reason_in_field() {
		let embed = only_embed(error("Invalid argument", "count"));
		assert_eq!(embed.fields, vec![field("Invalid argument", "count")]);
		assert!(embed.description.is_none());
	}

	#[test]
	fn test_long_field_value_is_shortened() {
		let embed = only_embed(warning("Too long", &"x".repeat(5000)));
		let value = &embed.fields[0].value;
		assert_eq!(value.chars().count(), FIELD_VALUE_LIMIT);
		assert!(value.contains(" ... "));
	}

	#[test]
	fn test_catastrophic_shows_tracking_id() {
		let embed = only_embed(catastrophic("Command failed", "disk on fire"));
		assert_eq!(embed.title.as_deref(), Some("Catastrophic Error"));
		let value = &embed.fields[0].value;
		assert!(value.starts_with("Please contact bot owner with error\n`"));
		assert!(!value.contains("disk on fire"));
		assert!(embed.timestamp.is_some());
	}
}
