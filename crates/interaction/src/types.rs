use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de;

use crate::InteractionError;

/// Locale code (e.g. `en-US`, `fr`) to translated text.
///
/// A `BTreeMap` keeps the serialized schema stable between runs.
pub type Localizations = BTreeMap<String, String>;

/// Argument type codes understood by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum OptionType {
	String,
	Integer,
	Boolean,
	User,
	Channel,
	Role,
	Mentionable,
	Number,
	Attachment,
}

impl OptionType {
	pub fn code(self) -> u8 {
		match self {
			OptionType::String => 3,
			OptionType::Integer => 4,
			OptionType::Boolean => 5,
			OptionType::User => 6,
			OptionType::Channel => 7,
			OptionType::Role => 8,
			OptionType::Mentionable => 9,
			OptionType::Number => 10,
			OptionType::Attachment => 11,
		}
	}

	/// Whether values of this type refer to an entity the platform resolves.
	pub fn is_reference(self) -> bool {
		matches!(
			self,
			OptionType::User
				| OptionType::Channel
				| OptionType::Role
				| OptionType::Mentionable
				| OptionType::Attachment
		)
	}
}

impl From<OptionType> for u8 {
	fn from(value: OptionType) -> Self {
		value.code()
	}
}

impl TryFrom<u8> for OptionType {
	type Error = InteractionError;

	fn try_from(code: u8) -> Result<Self, Self::Error> {
		Ok(match code {
			3 => OptionType::String,
			4 => OptionType::Integer,
			5 => OptionType::Boolean,
			6 => OptionType::User,
			7 => OptionType::Channel,
			8 => OptionType::Role,
			9 => OptionType::Mentionable,
			10 => OptionType::Number,
			11 => OptionType::Attachment,
			other => return Err(InteractionError::UnknownOptionType(other)),
		})
	}
}

/// Snowflake identifier of a platform entity (user, channel, role, ...).
///
/// Serialized as a decimal string since the values exceed the integer
/// precision of most JSON consumers. Deserializes from either form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub u64);

impl Id {
	pub fn get(self) -> u64 {
		self.0
	}
}

impl fmt::Display for Id {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl FromStr for Id {
	type Err = InteractionError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		s.parse::<u64>()
			.map(Id)
			.map_err(|_| InteractionError::InvalidId(s.to_string()))
	}
}

impl From<u64> for Id {
	fn from(value: u64) -> Self {
		Id(value)
	}
}

impl Serialize for Id {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for Id {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct IdVisitor;

		impl de::Visitor<'_> for IdVisitor {
			type Value = Id;

			fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str("a snowflake as a decimal string or integer")
			}

			fn visit_u64<E: de::Error>(self, v: u64) -> Result<Id, E> {
				Ok(Id(v))
			}

			fn visit_i64<E: de::Error>(self, v: i64) -> Result<Id, E> {
				u64::try_from(v)
					.map(Id)
					.map_err(|_| E::custom(format!("negative id {}", v)))
			}

			fn visit_str<E: de::Error>(self, v: &str) -> Result<Id, E> {
				v.parse().map_err(E::custom)
			}
		}

		deserializer.deserialize_any(IdVisitor)
	}
}

/// Value carried by a [`Choice`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceValue {
	Integer(i64),
	Number(f64),
	String(String),
}

impl ChoiceValue {
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			ChoiceValue::Integer(i) => Some(*i as f64),
			ChoiceValue::Number(n) => Some(*n),
			ChoiceValue::String(_) => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			ChoiceValue::String(s) => Some(s),
			_ => None,
		}
	}
}

impl From<i64> for ChoiceValue {
	fn from(value: i64) -> Self {
		ChoiceValue::Integer(value)
	}
}

impl From<f64> for ChoiceValue {
	fn from(value: f64) -> Self {
		ChoiceValue::Number(value)
	}
}

impl From<&str> for ChoiceValue {
	fn from(value: &str) -> Self {
		ChoiceValue::String(value.to_string())
	}
}

impl From<String> for ChoiceValue {
	fn from(value: String) -> Self {
		ChoiceValue::String(value)
	}
}

/// A named value offered to the user, either as a fixed choice or as an
/// autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name_localizations: Option<Localizations>,
	pub value: ChoiceValue,
}

impl Choice {
	pub fn new(name: impl Into<String>, value: impl Into<ChoiceValue>) -> Self {
		Self {
			name: name.into(),
			name_localizations: None,
			value: value.into(),
		}
	}

	pub fn with_localizations(mut self, localizations: Localizations) -> Self {
		self.name_localizations = Some(localizations);
		self
	}
}

/// A bare string is its own display name.
impl From<&str> for Choice {
	fn from(value: &str) -> Self {
		Choice::new(value, value)
	}
}

impl From<String> for Choice {
	fn from(value: String) -> Self {
		Choice::new(value.clone(), value)
	}
}
