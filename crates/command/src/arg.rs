use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use interaction::Choice;
use interaction::ChoiceValue;
use interaction::Localizations;
use interaction::OptionSchema;
use interaction::OptionType;
use serde_json::Number;

use crate::ArgError;
use crate::ArgValue;
use crate::OptionSource;

/// Whether a numeric argument accepts only whole numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
	Integer,
	Real,
}

/// Argument type together with its type-specific constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgKind {
	Number {
		kind: NumberKind,
		min: Option<f64>,
		max: Option<f64>,
	},
	String {
		min_length: Option<u16>,
		max_length: Option<u16>,
	},
	Boolean,
	User,
	Channel,
	Role,
	Mentionable,
	Attachment,
}

impl ArgKind {
	pub fn name(&self) -> &'static str {
		match self {
			ArgKind::Number {
				kind: NumberKind::Integer,
				..
			} => "integer",
			ArgKind::Number {
				kind: NumberKind::Real,
				..
			} => "number",
			ArgKind::String { .. } => "string",
			ArgKind::Boolean => "boolean",
			ArgKind::User => "user",
			ArgKind::Channel => "channel",
			ArgKind::Role => "role",
			ArgKind::Mentionable => "mentionable",
			ArgKind::Attachment => "attachment",
		}
	}

	pub fn option_type(&self) -> OptionType {
		match self {
			ArgKind::Number {
				kind: NumberKind::Integer,
				..
			} => OptionType::Integer,
			ArgKind::Number {
				kind: NumberKind::Real,
				..
			} => OptionType::Number,
			ArgKind::String { .. } => OptionType::String,
			ArgKind::Boolean => OptionType::Boolean,
			ArgKind::User => OptionType::User,
			ArgKind::Channel => OptionType::Channel,
			ArgKind::Role => OptionType::Role,
			ArgKind::Mentionable => OptionType::Mentionable,
			ArgKind::Attachment => OptionType::Attachment,
		}
	}

	fn accepts_choices(&self) -> bool {
		matches!(self, ArgKind::Number { .. } | ArgKind::String { .. })
	}

	fn choice_matches(&self, value: &ChoiceValue) -> bool {
		match (self, value) {
			(
				ArgKind::Number {
					kind: NumberKind::Integer,
					..
				},
				ChoiceValue::Integer(_),
			) => true,
			(
				ArgKind::Number {
					kind: NumberKind::Real,
					..
				},
				v,
			) => v.as_f64().is_some(),
			(ArgKind::String { .. }, ChoiceValue::String(_)) => true,
			_ => false,
		}
	}

	/// Convert a default value into this kind's value type.
	fn coerce(&self, value: ArgValue) -> Option<ArgValue> {
		match (self, value) {
			(
				ArgKind::Number {
					kind: NumberKind::Integer,
					..
				},
				v @ ArgValue::Integer(_),
			) => Some(v),
			(
				ArgKind::Number {
					kind: NumberKind::Real,
					..
				},
				v,
			) => v.as_f64().map(ArgValue::Number),
			(ArgKind::String { .. }, v @ ArgValue::String(_)) => Some(v),
			(ArgKind::Boolean, v @ ArgValue::Boolean(_)) => Some(v),
			_ => None,
		}
	}
}

/// Source of suggestions for an argument while the user is typing it.
#[async_trait]
pub trait Autocomplete: Send + Sync {
	async fn suggest(&self, partial: &str) -> Vec<Choice>;
}

#[async_trait]
impl<F, Fut> Autocomplete for F
where
	F: Fn(String) -> Fut + Send + Sync,
	Fut: Future<Output = Vec<Choice>> + Send + 'static,
{
	async fn suggest(&self, partial: &str) -> Vec<Choice> {
		(self)(partial.to_string()).await
	}
}

/// Immutable descriptor of one command argument.
///
/// Built through [`ArgBuilder`], which rejects inconsistent declarations
/// up front so that request handling never sees them.
#[derive(Clone)]
pub struct Arg {
	kind: ArgKind,
	description: String,
	name_localizations: Option<Localizations>,
	description_localizations: Option<Localizations>,
	required: bool,
	default: Option<ArgValue>,
	choices: Option<Vec<Choice>>,
	autocomplete: Option<Arc<dyn Autocomplete>>,
}

impl Arg {
	fn builder(kind: ArgKind, description: impl Into<String>) -> ArgBuilder {
		ArgBuilder {
			arg: Arg {
				kind,
				description: description.into(),
				name_localizations: None,
				description_localizations: None,
				required: false,
				default: None,
				choices: None,
				autocomplete: None,
			},
			misuse: None,
		}
	}

	pub fn integer(description: impl Into<String>) -> ArgBuilder {
		Self::builder(
			ArgKind::Number {
				kind: NumberKind::Integer,
				min: None,
				max: None,
			},
			description,
		)
	}

	pub fn number(description: impl Into<String>) -> ArgBuilder {
		Self::builder(
			ArgKind::Number {
				kind: NumberKind::Real,
				min: None,
				max: None,
			},
			description,
		)
	}

	pub fn string(description: impl Into<String>) -> ArgBuilder {
		Self::builder(
			ArgKind::String {
				min_length: None,
				max_length: None,
			},
			description,
		)
	}

	pub fn boolean(description: impl Into<String>) -> ArgBuilder {
		Self::builder(ArgKind::Boolean, description)
	}

	pub fn user(description: impl Into<String>) -> ArgBuilder {
		Self::builder(ArgKind::User, description)
	}

	pub fn channel(description: impl Into<String>) -> ArgBuilder {
		Self::builder(ArgKind::Channel, description)
	}

	pub fn role(description: impl Into<String>) -> ArgBuilder {
		Self::builder(ArgKind::Role, description)
	}

	pub fn mentionable(description: impl Into<String>) -> ArgBuilder {
		Self::builder(ArgKind::Mentionable, description)
	}

	pub fn attachment(description: impl Into<String>) -> ArgBuilder {
		Self::builder(ArgKind::Attachment, description)
	}

	pub fn kind(&self) -> &ArgKind {
		&self.kind
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	pub fn is_required(&self) -> bool {
		self.required
	}

	pub fn default_value(&self) -> Option<&ArgValue> {
		self.default.as_ref()
	}

	pub fn choices(&self) -> Option<&[Choice]> {
		self.choices.as_deref()
	}

	pub fn has_autocomplete(&self) -> bool {
		self.autocomplete.is_some()
	}

	/// Schema fragment for this argument under the given name.
	pub fn schema(&self, name: &str) -> OptionSchema {
		let mut schema = OptionSchema::new(self.kind.option_type(), name, &self.description);
		schema.name_localizations = self.name_localizations.clone();
		schema.description_localizations = self.description_localizations.clone();
		schema.required = self.required;
		schema.choices = self.choices.clone();
		if self.autocomplete.is_some() {
			schema.autocomplete = Some(true);
		}

		match &self.kind {
			ArgKind::Number { kind, min, max } => {
				schema.min_value = min.and_then(|v| bound(*kind, v));
				schema.max_value = max.and_then(|v| bound(*kind, v));
			}
			ArgKind::String {
				min_length,
				max_length,
			} => {
				schema.min_length = *min_length;
				schema.max_length = *max_length;
			}
			_ => {}
		}

		schema
	}

	/// Check a resolved value against the argument's constraints.
	pub fn validate(&self, value: &ArgValue) -> bool {
		match (&self.kind, value) {
			(ArgKind::Number { kind, min, max }, value) => {
				let Some(n) = value.as_f64() else {
					return false;
				};
				if n.is_nan() {
					return false;
				}
				if min.is_some_and(|min| n < min) || max.is_some_and(|max| n > max) {
					return false;
				}
				!(*kind == NumberKind::Integer && n.fract() != 0.0)
			}
			(
				ArgKind::String {
					min_length,
					max_length,
				},
				ArgValue::String(s),
			) => {
				let len = s.chars().count();
				!(min_length.is_some_and(|min| len < min as usize)
					|| max_length.is_some_and(|max| len > max as usize))
			}
			(ArgKind::Boolean, ArgValue::Boolean(_))
			| (ArgKind::User, ArgValue::User(_))
			| (ArgKind::Channel, ArgValue::Channel(_))
			| (ArgKind::Role, ArgValue::Role(_))
			| (ArgKind::Mentionable, ArgValue::Mentionable(_))
			| (ArgKind::Attachment, ArgValue::Attachment(_)) => true,
			_ => false,
		}
	}

	/// Read this argument's raw value through the accessor matching its kind.
	pub fn fetch<O>(&self, name: &str, source: &O) -> Option<ArgValue>
	where
		O: OptionSource + ?Sized,
	{
		match &self.kind {
			ArgKind::Number {
				kind: NumberKind::Integer,
				..
			} => source.integer(name).map(integer_value),
			ArgKind::Number {
				kind: NumberKind::Real,
				..
			} => source.number(name).map(ArgValue::Number),
			ArgKind::String { .. } => source.string(name).map(ArgValue::String),
			ArgKind::Boolean => source.boolean(name).map(ArgValue::Boolean),
			ArgKind::User => source.user(name).map(ArgValue::User),
			ArgKind::Channel => source.channel(name).map(ArgValue::Channel),
			ArgKind::Role => source.role(name).map(ArgValue::Role),
			ArgKind::Mentionable => source.mentionable(name).map(ArgValue::Mentionable),
			ArgKind::Attachment => source.attachment(name).map(ArgValue::Attachment),
		}
	}

	/// Ask the autocomplete provider for suggestions. `None` when the
	/// argument has no provider.
	pub async fn suggest(&self, partial: &str) -> Option<Vec<Choice>> {
		let provider = self.autocomplete.clone()?;
		Some(provider.suggest(partial).await)
	}
}

/// Whole numbers become `Integer`; anything else stays a `Number` and is
/// rejected by `validate`.
fn integer_value(n: Number) -> ArgValue {
	if let Some(i) = n.as_i64() {
		return ArgValue::Integer(i);
	}
	let f = n.as_f64().unwrap_or(f64::NAN);
	if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
		ArgValue::Integer(f as i64)
	} else {
		ArgValue::Number(f)
	}
}

fn bound(kind: NumberKind, value: f64) -> Option<Number> {
	match kind {
		NumberKind::Integer => Some(Number::from(value as i64)),
		NumberKind::Real => Number::from_f64(value),
	}
}

impl fmt::Debug for Arg {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Arg")
			.field("kind", &self.kind)
			.field("description", &self.description)
			.field("required", &self.required)
			.field("default", &self.default)
			.field("choices", &self.choices)
			.field("autocomplete", &self.autocomplete.is_some())
			.finish()
	}
}

/// Fluent declaration of an [`Arg`].
pub struct ArgBuilder {
	arg: Arg,
	misuse: Option<ArgError>,
}

impl ArgBuilder {
	pub fn required(mut self) -> Self {
		self.arg.required = true;
		self
	}

	/// Value used when an optional argument is not supplied.
	pub fn default(mut self, value: impl Into<ArgValue>) -> Self {
		self.arg.default = Some(value.into());
		self
	}

	pub fn name_localizations(mut self, localizations: Localizations) -> Self {
		self.arg.name_localizations = Some(localizations);
		self
	}

	pub fn description_localizations(mut self, localizations: Localizations) -> Self {
		self.arg.description_localizations = Some(localizations);
		self
	}

	/// Fixed set of values. Bare strings become `{name: s, value: s}`.
	pub fn choices<I, T>(mut self, choices: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<Choice>,
	{
		self.arg
			.choices
			.get_or_insert_with(Vec::new)
			.extend(choices.into_iter().map(Into::into));
		self
	}

	pub fn autocomplete(mut self, provider: impl Autocomplete + 'static) -> Self {
		self.arg.autocomplete = Some(Arc::new(provider));
		self
	}

	pub fn min(mut self, value: impl Into<f64>) -> Self {
		match &mut self.arg.kind {
			ArgKind::Number { min, .. } => *min = Some(value.into()),
			_ => self.misuse("min"),
		}
		self
	}

	pub fn max(mut self, value: impl Into<f64>) -> Self {
		match &mut self.arg.kind {
			ArgKind::Number { max, .. } => *max = Some(value.into()),
			_ => self.misuse("max"),
		}
		self
	}

	pub fn min_length(mut self, value: u16) -> Self {
		match &mut self.arg.kind {
			ArgKind::String { min_length, .. } => *min_length = Some(value),
			_ => self.misuse("min_length"),
		}
		self
	}

	pub fn max_length(mut self, value: u16) -> Self {
		match &mut self.arg.kind {
			ArgKind::String { max_length, .. } => *max_length = Some(value),
			_ => self.misuse("max_length"),
		}
		self
	}

	fn misuse(&mut self, constraint: &'static str) {
		if self.misuse.is_none() {
			self.misuse = Some(ArgError::ConstraintMismatch {
				constraint,
				kind: self.arg.kind.name(),
			});
		}
	}

	/// Check the declaration and produce the descriptor.
	pub fn build(self) -> Result<Arg, ArgError> {
		if let Some(err) = self.misuse {
			return Err(err);
		}

		let mut arg = self.arg;
		let kind = arg.kind.name();

		if arg.choices.is_some() && arg.autocomplete.is_some() {
			return Err(ArgError::ChoicesWithAutocomplete);
		}
		if arg.required && arg.default.is_some() {
			return Err(ArgError::DefaultOnRequired);
		}
		if arg.kind.option_type().is_reference() && arg.default.is_some() {
			return Err(ArgError::DefaultOnReference(kind));
		}

		if !arg.kind.accepts_choices() {
			if arg.choices.is_some() {
				return Err(ArgError::ChoicesNotSupported(kind));
			}
			if arg.autocomplete.is_some() {
				return Err(ArgError::AutocompleteNotSupported(kind));
			}
		}
		if let Some(choice) = arg
			.choices
			.iter()
			.flatten()
			.find(|choice| !arg.kind.choice_matches(&choice.value))
		{
			return Err(ArgError::ChoiceTypeMismatch(choice.name.clone()));
		}

		match &arg.kind {
			ArgKind::Number { kind, min, max } => {
				if *kind == NumberKind::Integer
					&& [min, max].into_iter().flatten().any(|b| b.fract() != 0.0)
				{
					return Err(ArgError::NonIntegralBound);
				}
				if let (Some(min), Some(max)) = (min, max)
					&& min > max
				{
					return Err(ArgError::InvalidRange);
				}
			}
			ArgKind::String {
				min_length: Some(min),
				max_length: Some(max),
			} if min > max => return Err(ArgError::InvalidRange),
			_ => {}
		}

		if let Some(default) = arg.default.take() {
			let default = arg
				.kind
				.coerce(default)
				.ok_or(ArgError::DefaultTypeMismatch(kind))?;
			if !arg.validate(&default) {
				return Err(ArgError::InvalidDefault);
			}
			arg.default = Some(default);
		}

		Ok(arg)
	}
}
