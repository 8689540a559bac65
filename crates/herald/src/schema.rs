//! Registration payload export.

use std::path::Path;

use command::BoxError;
use command::CommandRegistry;
use interaction::CommandSchema;
use tracing::info;

use crate::Context;

/// Schemas of every command that loads, in registration order.
pub async fn collect(registry: &CommandRegistry<Context>) -> Vec<CommandSchema> {
	registry
		.get_all()
		.await
		.iter()
		.map(|command| command.schema())
		.collect()
}

/// Write the registration payload to `output`, or stdout without one.
pub async fn export(
	registry: &CommandRegistry<Context>,
	output: Option<&Path>,
) -> Result<Vec<CommandSchema>, BoxError> {
	let schemas = collect(registry).await;
	let json = serde_json::to_string_pretty(&schemas)?;

	match output {
		Some(path) => {
			tokio::fs::write(path, json + "\n").await?;
			info!(
				commands = schemas.len(),
				"Wrote command schemas to {}",
				path.display()
			);
		}
		None => println!("{}", json),
	}
	Ok(schemas)
}
