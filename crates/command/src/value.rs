use interaction::Id;

/// A resolved argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
	Integer(i64),
	Number(f64),
	String(String),
	Boolean(bool),
	User(Id),
	Channel(Id),
	Role(Id),
	Mentionable(Id),
	Attachment(Id),
}

impl ArgValue {
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			ArgValue::Integer(i) => Some(*i as f64),
			ArgValue::Number(n) => Some(*n),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			ArgValue::String(s) => Some(s),
			_ => None,
		}
	}
}

impl From<i64> for ArgValue {
	fn from(value: i64) -> Self {
		ArgValue::Integer(value)
	}
}

impl From<i32> for ArgValue {
	fn from(value: i32) -> Self {
		ArgValue::Integer(value.into())
	}
}

impl From<f64> for ArgValue {
	fn from(value: f64) -> Self {
		ArgValue::Number(value)
	}
}

impl From<bool> for ArgValue {
	fn from(value: bool) -> Self {
		ArgValue::Boolean(value)
	}
}

impl From<&str> for ArgValue {
	fn from(value: &str) -> Self {
		ArgValue::String(value.to_string())
	}
}

impl From<String> for ArgValue {
	fn from(value: String) -> Self {
		ArgValue::String(value)
	}
}

/// Conversion from a resolved value into the type an executor asks for.
pub trait FromArg: Sized {
	fn from_arg(value: &ArgValue) -> Option<Self>;
}

impl FromArg for i64 {
	fn from_arg(value: &ArgValue) -> Option<Self> {
		match value {
			ArgValue::Integer(i) => Some(*i),
			_ => None,
		}
	}
}

impl FromArg for f64 {
	fn from_arg(value: &ArgValue) -> Option<Self> {
		value.as_f64()
	}
}

impl FromArg for String {
	fn from_arg(value: &ArgValue) -> Option<Self> {
		value.as_str().map(str::to_string)
	}
}

impl FromArg for bool {
	fn from_arg(value: &ArgValue) -> Option<Self> {
		match value {
			ArgValue::Boolean(b) => Some(*b),
			_ => None,
		}
	}
}

impl FromArg for Id {
	fn from_arg(value: &ArgValue) -> Option<Self> {
		match value {
			ArgValue::User(id)
			| ArgValue::Channel(id)
			| ArgValue::Role(id)
			| ArgValue::Mentionable(id)
			| ArgValue::Attachment(id) => Some(*id),
			_ => None,
		}
	}
}

/// Validated arguments of one invocation, in declaration order.
///
/// Optional arguments that were not supplied and have no default are
/// absent rather than present with a placeholder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
	values: Vec<(String, ArgValue)>,
}

impl Args {
	pub fn new() -> Self {
		Self::default()
	}

	pub(crate) fn insert(&mut self, name: String, value: ArgValue) {
		match self.values.iter_mut().find(|(n, _)| *n == name) {
			Some((_, slot)) => *slot = value,
			None => self.values.push((name, value)),
		}
	}

	/// Typed access. `None` if the argument is absent or has another type.
	pub fn get<T: FromArg>(&self, name: &str) -> Option<T> {
		self.raw(name).and_then(T::from_arg)
	}

	pub fn raw(&self, name: &str) -> Option<&ArgValue> {
		self.values
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, value)| value)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.raw(name).is_some()
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v))
	}
}
