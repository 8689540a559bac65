use std::any::Any;

use thiserror::Error;

/// Error type returned by executors, factories and teardown hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Text of a caught panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(s) = payload.downcast_ref::<&str>() {
		format!("panicked: {}", s)
	} else if let Some(s) = payload.downcast_ref::<String>() {
		format!("panicked: {}", s)
	} else {
		"panicked".to_string()
	}
}

/// Invalid argument descriptor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgError {
	#[error("choices and autocomplete are mutually exclusive")]
	ChoicesWithAutocomplete,

	#[error("a required argument cannot have a default")]
	DefaultOnRequired,

	#[error("{0} arguments cannot have a default")]
	DefaultOnReference(&'static str),

	#[error("default value does not match the {0} argument type")]
	DefaultTypeMismatch(&'static str),

	#[error("default value does not satisfy the argument constraints")]
	InvalidDefault,

	#[error("{0} arguments do not support choices")]
	ChoicesNotSupported(&'static str),

	#[error("{0} arguments do not support autocomplete")]
	AutocompleteNotSupported(&'static str),

	#[error("choice '{0}' does not match the argument type")]
	ChoiceTypeMismatch(String),

	#[error("'{constraint}' does not apply to {kind} arguments")]
	ConstraintMismatch {
		constraint: &'static str,
		kind: &'static str,
	},

	#[error("integer bounds must be whole numbers")]
	NonIntegralBound,

	#[error("lower bound is greater than upper bound")]
	InvalidRange,
}

/// Invalid command declaration. Raised when the command is built, never
/// while serving a request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
	#[error("invalid argument '{arg}': {source}")]
	InvalidArgument {
		arg: String,
		#[source]
		source: ArgError,
	},

	#[error("argument '{0}' is declared more than once")]
	DuplicateArgument(String),

	#[error("command '{0}' has no executor")]
	MissingExecutor(String),
}

/// Failure of a single command invocation.
#[derive(Error, Debug)]
pub enum CommandError {
	#[error("argument '{0}' is required")]
	MissingArgument(String),

	#[error("argument '{0}' failed validation")]
	ValidationFailed(String),

	#[error("command failed: {0}")]
	Executor(BoxError),
}

impl CommandError {
	/// Whether the requester caused the failure, as opposed to the
	/// command itself.
	pub fn is_user_error(&self) -> bool {
		matches!(
			self,
			CommandError::MissingArgument(_) | CommandError::ValidationFailed(_)
		)
	}
}

#[derive(Error, Debug)]
pub enum RegistryError {
	#[error("failed to create command '{name}': {source}")]
	Factory {
		name: String,
		#[source]
		source: BoxError,
	},
}

/// A teardown hook that failed while the registry cache was cleared.
#[derive(Error, Debug)]
#[error("teardown of command '{name}' failed: {source}")]
pub struct TeardownError {
	pub name: String,
	#[source]
	pub source: BoxError,
}
