use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// Message body sent in answer to an interaction.
///
/// `None` fields are left untouched when editing an earlier reply; an
/// empty value clears them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reply {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub content: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub embeds: Option<Vec<Embed>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub components: Option<Vec<Value>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub files: Option<Vec<String>>,
	/// Only visible to the user who triggered the interaction
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub ephemeral: bool,
}

impl Reply {
	pub fn text(content: impl Into<String>) -> Self {
		Self {
			content: Some(content.into()),
			..Self::default()
		}
	}

	pub fn embed(embed: Embed) -> Self {
		Self {
			embeds: Some(vec![embed]),
			..Self::default()
		}
	}

	/// Fill every unset part with an empty value, so that an edit replaces
	/// the whole previous message.
	pub fn clearing(self) -> Self {
		Self {
			content: Some(self.content.unwrap_or_default()),
			embeds: Some(self.embeds.unwrap_or_default()),
			components: Some(self.components.unwrap_or_default()),
			files: Some(self.files.unwrap_or_default()),
			ephemeral: self.ephemeral,
		}
	}
}

impl From<&str> for Reply {
	fn from(content: &str) -> Self {
		Self::text(content)
	}
}

impl From<String> for Reply {
	fn from(content: String) -> Self {
		Self::text(content)
	}
}

impl From<Embed> for Reply {
	fn from(embed: Embed) -> Self {
		Self::embed(embed)
	}
}

/// A reply that wipes the previous content, embeds, components and files.
pub fn clear_reply() -> Reply {
	Reply::default().clearing()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Embed {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub author: Option<EmbedAuthor>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub fields: Vec<EmbedField>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub thumbnail: Option<EmbedThumbnail>,
	/// ISO 8601
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedField {
	pub name: String,
	pub value: String,
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedAuthor {
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedThumbnail {
	pub url: String,
}
