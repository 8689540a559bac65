use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use command::CommandError;
use command::CommandRegistry;
use command::panic_message;
use config::BOT_CONF;
use config::BotConfig;
use futures::FutureExt;
use interaction::AutocompleteResponse;
use interaction::Interaction;
use interaction::InteractionKind;
use reply::embed;
use tracing::debug;
use tracing::error;
use tracing::warn;

use crate::Context;
use crate::context::DynResponder;

/// Routes interactions to the commands in a registry.
pub struct Handler {
	registry: Arc<CommandRegistry<Context>>,
}

impl Handler {
	pub fn new(registry: Arc<CommandRegistry<Context>>) -> Self {
		Self { registry }
	}

	pub fn registry(&self) -> &Arc<CommandRegistry<Context>> {
		&self.registry
	}

	/// Handle one interaction with the current global configuration.
	pub async fn handle(
		&self,
		interaction: Interaction,
		responder: DynResponder,
	) -> Option<AutocompleteResponse> {
		self.dispatch(interaction, responder, current_config()).await
	}

	/// Run a command, or collect autocomplete suggestions.
	///
	/// Only autocomplete interactions produce a return value; commands
	/// answer through `responder`. Unknown commands are ignored.
	pub async fn dispatch(
		&self,
		interaction: Interaction,
		responder: DynResponder,
		config: Arc<BotConfig>,
	) -> Option<AutocompleteResponse> {
		let name = interaction.data.name.as_str();
		let command = match self.registry.get(name).await {
			Ok(Some(command)) => command,
			Ok(None) => {
				debug!(command = name, "Ignoring unknown command");
				return None;
			}
			Err(e) => {
				error!(command = name, error = %e, "Failed to load command");
				if interaction.kind == InteractionKind::ApplicationCommand {
					let ctx = Context::new(responder, interaction.user, config);
					if let Err(e) = ctx.reply.show(embed::catastrophic("Command unavailable", &e)).await {
						warn!(error = %e, "Failed to report load failure");
					}
				}
				return None;
			}
		};

		match interaction.kind {
			InteractionKind::Autocomplete => {
				let focused = interaction.data.focused()?;
				let choices = command.autocomplete(&focused).await?;
				Some(AutocompleteResponse::capped(choices))
			}
			InteractionKind::ApplicationCommand => {
				let ctx = Context::new(responder, interaction.user.clone(), config);
				let result = AssertUnwindSafe(command.execute(ctx.clone(), &interaction.data))
					.catch_unwind()
					.await
					.unwrap_or_else(|payload| {
						Err(CommandError::Executor(panic_message(payload.as_ref()).into()))
					});
				let shown = match result {
					Ok(()) => return None,
					Err(e @ CommandError::MissingArgument(_)) => {
						ctx.reply
							.show(embed::error("Missing argument", &e.to_string()))
							.await
					}
					Err(e @ CommandError::ValidationFailed(_)) => {
						ctx.reply
							.show(embed::error("Invalid argument", &e.to_string()))
							.await
					}
					Err(CommandError::Executor(e)) => {
						ctx.reply
							.show(embed::catastrophic("Command failed", &e))
							.await
					}
				};
				if let Err(e) = shown {
					warn!(command = name, error = %e, "Failed to report command error");
				}
				None
			}
		}
	}
}

fn current_config() -> Arc<BotConfig> {
	if BOT_CONF.is_initialized() {
		BOT_CONF.load_full()
	} else {
		Arc::new(BotConfig::default())
	}
}
