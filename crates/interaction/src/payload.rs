use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::Id;
use crate::InteractionError;
use crate::OptionType;

/// Kind of inbound interaction the engine cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum InteractionKind {
	/// A user submitted a slash command
	ApplicationCommand,
	/// A user is typing into an argument that offers suggestions
	Autocomplete,
}

impl From<InteractionKind> for u8 {
	fn from(value: InteractionKind) -> Self {
		match value {
			InteractionKind::ApplicationCommand => 2,
			InteractionKind::Autocomplete => 4,
		}
	}
}

impl TryFrom<u8> for InteractionKind {
	type Error = InteractionError;

	fn try_from(code: u8) -> Result<Self, Self::Error> {
		match code {
			2 => Ok(InteractionKind::ApplicationCommand),
			4 => Ok(InteractionKind::Autocomplete),
			other => Err(InteractionError::UnknownInteractionType(other)),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
	pub id: Id,
	pub username: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub global_name: Option<String>,
}

impl User {
	/// Name shown to other users.
	pub fn display_name(&self) -> &str {
		self.global_name.as_deref().unwrap_or(&self.username)
	}
}

/// One argument value as delivered by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOption {
	pub name: String,
	#[serde(rename = "type")]
	pub kind: OptionType,
	#[serde(default)]
	pub value: Value,
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub focused: bool,
}

/// The argument currently being typed in an autocomplete interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Focused {
	pub name: String,
	/// Partial input; numeric partials are rendered as text.
	pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommandData {
	pub name: String,
	#[serde(default)]
	pub options: Vec<CommandOption>,
}

impl CommandData {
	pub fn option(&self, name: &str) -> Option<&CommandOption> {
		self.options.iter().find(|opt| opt.name == name)
	}

	/// Raw value of the named option, if supplied with the given type.
	pub fn value(&self, name: &str, kind: OptionType) -> Option<&Value> {
		self.option(name)
			.filter(|opt| opt.kind == kind && !opt.value.is_null())
			.map(|opt| &opt.value)
	}

	pub fn focused(&self) -> Option<Focused> {
		let opt = self.options.iter().find(|opt| opt.focused)?;
		let value = match &opt.value {
			Value::String(s) => s.clone(),
			Value::Null => String::new(),
			other => other.to_string(),
		};
		Some(Focused {
			name: opt.name.clone(),
			value,
		})
	}
}

/// An inbound interaction event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
	pub id: Id,
	#[serde(rename = "type")]
	pub kind: InteractionKind,
	pub data: CommandData,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user: Option<User>,
}

impl Interaction {
	/// Decode one interaction from its JSON text.
	pub fn parse(raw: &str) -> Result<Self, InteractionError> {
		Ok(serde_json::from_str(raw)?)
	}
}
