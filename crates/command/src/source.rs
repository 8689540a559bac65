use interaction::CommandData;
use interaction::Id;
use interaction::OptionType;
use serde_json::Number;

/// Host-provided access to the raw argument values of one request.
///
/// Each method returns the value supplied for `name` if it is present and
/// of the matching kind. Resolving referenced entities is the host's job;
/// the engine accepts whatever id the host hands back.
///
/// `integer` hands back the number as sent, whole or not, so that a
/// fractional value fails validation instead of reading as absent.
pub trait OptionSource: Sync {
	fn integer(&self, name: &str) -> Option<Number>;
	fn number(&self, name: &str) -> Option<f64>;
	fn string(&self, name: &str) -> Option<String>;
	fn boolean(&self, name: &str) -> Option<bool>;
	fn user(&self, name: &str) -> Option<Id>;
	fn channel(&self, name: &str) -> Option<Id>;
	fn role(&self, name: &str) -> Option<Id>;
	fn mentionable(&self, name: &str) -> Option<Id>;
	fn attachment(&self, name: &str) -> Option<Id>;
}

fn id_value(data: &CommandData, name: &str, kind: OptionType) -> Option<Id> {
	let value = data.value(name, kind)?;
	serde_json::from_value(value.clone()).ok()
}

impl OptionSource for CommandData {
	fn integer(&self, name: &str) -> Option<Number> {
		self.value(name, OptionType::Integer)?.as_number().cloned()
	}

	fn number(&self, name: &str) -> Option<f64> {
		self.value(name, OptionType::Number)?.as_f64()
	}

	fn string(&self, name: &str) -> Option<String> {
		self.value(name, OptionType::String)?
			.as_str()
			.map(str::to_string)
	}

	fn boolean(&self, name: &str) -> Option<bool> {
		self.value(name, OptionType::Boolean)?.as_bool()
	}

	fn user(&self, name: &str) -> Option<Id> {
		id_value(self, name, OptionType::User)
	}

	fn channel(&self, name: &str) -> Option<Id> {
		id_value(self, name, OptionType::Channel)
	}

	fn role(&self, name: &str) -> Option<Id> {
		id_value(self, name, OptionType::Role)
	}

	fn mentionable(&self, name: &str) -> Option<Id> {
		id_value(self, name, OptionType::Mentionable)
	}

	fn attachment(&self, name: &str) -> Option<Id> {
		id_value(self, name, OptionType::Attachment)
	}
}
