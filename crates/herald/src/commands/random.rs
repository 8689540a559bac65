use command::Arg;
use command::Args;
use command::BoxError;
use command::Command;
use command::ConfigError;
use interaction::Choice;
use rand::Rng;

use crate::Context;

const SUGGESTIONS: usize = 10;

/// Registered under whatever name the registry entry carries.
pub fn command(name: &str) -> Result<Command<Context>, ConfigError> {
	Command::builder(name, "Test command • Pick a random number.")
		.arg(
			"rand",
			Arg::number("Random generated number.")
				.min(0)
				.max(1)
				.autocomplete(suggest),
		)
		.executor(execute)
		.build()
}

async fn suggest(_partial: String) -> Vec<Choice> {
	let mut rng = rand::thread_rng();
	(0..SUGGESTIONS)
		.map(|_| {
			let value: f64 = rng.r#gen();
			Choice::new(value.to_string(), value)
		})
		.collect()
}

async fn execute(ctx: Context, args: Args) -> Result<(), BoxError> {
	let text = match args.get::<f64>("rand") {
		Some(value) => value.to_string(),
		None => "No number picked.".to_string(),
	};
	ctx.reply.show(text).await?;
	Ok(())
}
