use serde::Deserialize;
use serde::Serialize;
use serde_json::Number;

use crate::Choice;
use crate::Localizations;
use crate::OptionType;

/// Chat-input (slash) command type code.
const CHAT_INPUT: u8 = 1;

fn chat_input() -> u8 {
	CHAT_INPUT
}

/// Registration payload for a single slash command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSchema {
	#[serde(rename = "type", default = "chat_input")]
	pub kind: u8,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name_localizations: Option<Localizations>,
	pub description: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description_localizations: Option<Localizations>,
	#[serde(default)]
	pub options: Vec<OptionSchema>,
}

impl CommandSchema {
	pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			kind: CHAT_INPUT,
			name: name.into(),
			name_localizations: None,
			description: description.into(),
			description_localizations: None,
			options: Vec::new(),
		}
	}
}

/// Registration payload for one argument of a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSchema {
	#[serde(rename = "type")]
	pub kind: OptionType,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name_localizations: Option<Localizations>,
	pub description: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description_localizations: Option<Localizations>,
	#[serde(default)]
	pub required: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub choices: Option<Vec<Choice>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub autocomplete: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub min_value: Option<Number>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_value: Option<Number>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub min_length: Option<u16>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_length: Option<u16>,
}

impl OptionSchema {
	pub fn new(kind: OptionType, name: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			kind,
			name: name.into(),
			name_localizations: None,
			description: description.into(),
			description_localizations: None,
			required: false,
			choices: None,
			autocomplete: None,
			min_value: None,
			max_value: None,
			min_length: None,
			max_length: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn test_absent_fields_are_omitted() {
		let mut schema = CommandSchema::new("echo", "Echo the message.");
		let mut msg = OptionSchema::new(OptionType::String, "msg", "Message to reply with.");
		msg.required = true;
		msg.min_length = Some(4);
		msg.max_length = Some(64);
		schema.options.push(msg);

		assert_eq!(
			serde_json::to_value(&schema).unwrap(),
			json!({
				"type": 1,
				"name": "echo",
				"description": "Echo the message.",
				"options": [{
					"type": 3,
					"name": "msg",
					"description": "Message to reply with.",
					"required": true,
					"min_length": 4,
					"max_length": 64
				}]
			})
		);
	}
}
