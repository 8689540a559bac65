use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use interaction::Choice;
use interaction::CommandSchema;
use interaction::Focused;
use interaction::Localizations;
use tracing::debug;

use crate::Arg;
use crate::ArgBuilder;
use crate::Args;
use crate::BoxError;
use crate::CommandError;
use crate::ConfigError;
use crate::OptionSource;

/// The user-supplied behavior of a command.
///
/// `C` is the host's request/reply handle, passed through untouched.
#[async_trait]
pub trait Executor<C>: Send + Sync {
	async fn execute(&self, ctx: C, args: Args) -> Result<(), BoxError>;
}

#[async_trait]
impl<C, F, Fut> Executor<C> for F
where
	C: Send + 'static,
	F: Fn(C, Args) -> Fut + Send + Sync,
	Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
{
	async fn execute(&self, ctx: C, args: Args) -> Result<(), BoxError> {
		(self)(ctx, args).await
	}
}

/// A declared slash command: metadata, ordered arguments and an executor.
pub struct Command<C> {
	name: String,
	description: String,
	name_localizations: Option<Localizations>,
	description_localizations: Option<Localizations>,
	args: Vec<(String, Arg)>,
	executor: Arc<dyn Executor<C>>,
}

impl<C: Send + 'static> Command<C> {
	pub fn builder(name: impl Into<String>, description: impl Into<String>) -> CommandBuilder<C> {
		CommandBuilder {
			name: name.into(),
			description: description.into(),
			name_localizations: None,
			description_localizations: None,
			args: Vec::new(),
			executor: None,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	/// Arguments in declaration order.
	pub fn args(&self) -> impl Iterator<Item = (&str, &Arg)> {
		self.args.iter().map(|(name, arg)| (name.as_str(), arg))
	}

	pub fn arg(&self, name: &str) -> Option<&Arg> {
		self.args
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, arg)| arg)
	}

	/// Registration schema, with arguments in declaration order.
	pub fn schema(&self) -> CommandSchema {
		let mut schema = CommandSchema::new(&self.name, &self.description);
		schema.name_localizations = self.name_localizations.clone();
		schema.description_localizations = self.description_localizations.clone();
		schema.options = self
			.args
			.iter()
			.map(|(name, arg)| arg.schema(name))
			.collect();
		schema
	}

	/// Resolve and validate every argument, in declaration order.
	///
	/// Stops at the first missing required argument or failed validation.
	/// A missing optional argument takes its default, or is left out of
	/// the result when it has none.
	pub fn parse<O>(&self, source: &O) -> Result<Args, CommandError>
	where
		O: OptionSource + ?Sized,
	{
		let mut args = Args::new();

		for (name, arg) in &self.args {
			let value = match arg.fetch(name, source) {
				Some(value) => value,
				None if arg.is_required() => {
					return Err(CommandError::MissingArgument(name.clone()));
				}
				None => match arg.default_value() {
					Some(default) => default.clone(),
					None => continue,
				},
			};

			if !arg.validate(&value) {
				return Err(CommandError::ValidationFailed(name.clone()));
			}
			args.insert(name.clone(), value);
		}

		Ok(args)
	}

	/// Parse the request and, only if every argument is valid, run the
	/// executor with the typed arguments.
	pub async fn execute<O>(&self, ctx: C, source: &O) -> Result<(), CommandError>
	where
		O: OptionSource + ?Sized,
	{
		let args = match self.parse(source) {
			Ok(args) => args,
			Err(err) => {
				debug!(command = %self.name, error = %err, "Rejected invocation");
				return Err(err);
			}
		};

		debug!(command = %self.name, args = ?args, "Executing command");
		self.executor
			.execute(ctx, args)
			.await
			.map_err(CommandError::Executor)
	}

	/// Suggestions for the argument being typed. `None` if the argument is
	/// unknown or has no autocomplete provider.
	pub async fn autocomplete(&self, focused: &Focused) -> Option<Vec<Choice>> {
		self.arg(&focused.name)?.suggest(&focused.value).await
	}
}

impl<C> fmt::Debug for Command<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Command")
			.field("name", &self.name)
			.field("description", &self.description)
			.field("args", &self.args)
			.finish_non_exhaustive()
	}
}

pub struct CommandBuilder<C> {
	name: String,
	description: String,
	name_localizations: Option<Localizations>,
	description_localizations: Option<Localizations>,
	args: Vec<(String, ArgBuilder)>,
	executor: Option<Arc<dyn Executor<C>>>,
}

impl<C: Send + 'static> CommandBuilder<C> {
	pub fn name_localizations(mut self, localizations: Localizations) -> Self {
		self.name_localizations = Some(localizations);
		self
	}

	pub fn description_localizations(mut self, localizations: Localizations) -> Self {
		self.description_localizations = Some(localizations);
		self
	}

	/// Declare an argument. The name is what the platform shows and sends.
	pub fn arg(mut self, name: impl Into<String>, arg: ArgBuilder) -> Self {
		self.args.push((name.into(), arg));
		self
	}

	pub fn executor(mut self, executor: impl Executor<C> + 'static) -> Self {
		self.executor = Some(Arc::new(executor));
		self
	}

	pub fn build(self) -> Result<Command<C>, ConfigError> {
		let mut args: Vec<(String, Arg)> = Vec::with_capacity(self.args.len());
		for (name, builder) in self.args {
			if args.iter().any(|(key, _)| *key == name) {
				return Err(ConfigError::DuplicateArgument(name));
			}
			let arg = builder
				.build()
				.map_err(|source| ConfigError::InvalidArgument {
					arg: name.clone(),
					source,
				})?;
			args.push((name, arg));
		}

		let executor = self
			.executor
			.ok_or_else(|| ConfigError::MissingExecutor(self.name.clone()))?;

		Ok(Command {
			name: self.name,
			description: self.description,
			name_localizations: self.name_localizations,
			description_localizations: self.description_localizations,
			args,
			executor,
		})
	}
}

#[cfg(test)]
mod tests {
	use interaction::OptionType;

	use super::*;
	use crate::ArgError;

	async fn noop(_ctx: (), _args: Args) -> Result<(), BoxError> {
		Ok(())
	}

	#[test]
	fn test_schema_keeps_declaration_order() {
		let cmd = Command::builder("debug", "Debug command.")
			.description_localizations(Localizations::from([(
				"fr".to_string(),
				"Commande de debug.".to_string(),
			)]))
			.arg("zeta", Arg::string("z"))
			.arg("alpha", Arg::integer("a"))
			.arg("mid", Arg::boolean("m"))
			.arg("who", Arg::user("u"))
			.executor(noop)
			.build()
			.unwrap();

		let schema = cmd.schema();
		assert_eq!(schema.name, "debug");
		let names: Vec<_> = schema.options.iter().map(|o| o.name.as_str()).collect();
		assert_eq!(names, ["zeta", "alpha", "mid", "who"]);
		let kinds: Vec<_> = schema.options.iter().map(|o| o.kind).collect();
		assert_eq!(
			kinds,
			[
				OptionType::String,
				OptionType::Integer,
				OptionType::Boolean,
				OptionType::User
			]
		);
		assert_eq!(
			schema.description_localizations.unwrap()["fr"],
			"Commande de debug."
		);
		assert_eq!(cmd.schema(), cmd.schema());
	}

	#[test]
	fn test_invalid_argument_names_the_argument() {
		let err = Command::builder("echo", "Echo.")
			.arg("msg", Arg::string("m"))
			.arg("count", Arg::integer("c").required().default(1))
			.executor(noop)
			.build()
			.unwrap_err();
		assert_eq!(
			err,
			ConfigError::InvalidArgument {
				arg: "count".into(),
				source: ArgError::DefaultOnRequired
			}
		);
	}

	#[test]
	fn test_duplicate_argument() {
		let err = Command::builder("echo", "Echo.")
			.arg("msg", Arg::string("m"))
			.arg("msg", Arg::string("again"))
			.executor(noop)
			.build()
			.unwrap_err();
		assert_eq!(err, ConfigError::DuplicateArgument("msg".into()));
	}

	#[test]
	fn test_missing_executor() {
		let err = Command::<()>::builder("echo", "Echo.").build().unwrap_err();
		assert_eq!(err, ConfigError::MissingExecutor("echo".into()));
	}
}
