//! Declarative slash commands.
//!
//! A [`Command`] binds a name and description to an ordered set of
//! argument descriptors ([`Arg`]) and an executor. From that single
//! declaration the crate derives the registration schema sent to the
//! platform and a parser that turns an inbound request into a validated
//! [`Args`] object before the executor runs.
//!
//! Commands are resolved lazily through a [`CommandRegistry`], which
//! memoizes each instance and supports tearing the whole set down for a
//! reload.
//!
//! # Example
//!
//! ```no_run
//! use command::Arg;
//! use command::Args;
//! use command::BoxError;
//! use command::Command;
//!
//! # fn main() -> Result<(), command::ConfigError> {
//! let echo: Command<()> = Command::builder("echo", "Echo the message.")
//! 	.arg("msg", Arg::string("Message to reply with.").required().min_length(4).max_length(64))
//! 	.arg("count", Arg::integer("Number of times to reply.").min(1).max(3).default(1))
//! 	.executor(|_ctx: (), args: Args| async move {
//! 		println!("{:?}", args.get::<String>("msg"));
//! 		Ok::<(), BoxError>(())
//! 	})
//! 	.build()?;
//! # Ok(())
//! # }
//! ```

mod arg;
mod cmd;
mod error;
mod registry;
pub mod search;
mod source;
mod value;

pub use arg::Arg;
pub use arg::ArgBuilder;
pub use arg::ArgKind;
pub use arg::Autocomplete;
pub use arg::NumberKind;
pub use cmd::Command;
pub use cmd::CommandBuilder;
pub use cmd::Executor;
pub use error::ArgError;
pub use error::BoxError;
pub use error::CommandError;
pub use error::ConfigError;
pub use error::RegistryError;
pub use error::TeardownError;
pub use error::panic_message;
pub use registry::CommandFactory;
pub use registry::CommandRegistry;
pub use registry::Entry;
pub use registry::Loaded;
pub use registry::Teardown;
pub use search::WordSearch;
pub use source::OptionSource;
pub use value::ArgValue;
pub use value::Args;
pub use value::FromArg;
