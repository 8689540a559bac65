use std::sync::Arc;
use std::time::Duration;

use chrono::SecondsFormat;
use chrono::Utc;
use command::Arg;
use command::Args;
use command::BoxError;
use command::Command;
use command::ConfigError;
use reply::Embed;
use reply::EmbedAuthor;
use reply::Reply;
use reply::UserQueue;
use reply::embed;

use crate::Context;

/// Each user may have one echo running at a time.
pub fn command() -> Result<Command<Context>, ConfigError> {
	let running = Arc::new(UserQueue::new(usize::MAX, 1));
	Command::builder("echo", "Test command • Echo the message.")
		.arg(
			"msg",
			Arg::string("Message to reply with.")
				.required()
				.min_length(4)
				.max_length(64),
		)
		.arg(
			"count",
			Arg::integer("Number of times to reply.")
				.min(1)
				.max(3)
				.default(1),
		)
		.executor(move |ctx: Context, args: Args| {
			let running = running.clone();
			async move { execute(ctx, args, running).await }
		})
		.build()
}

async fn execute(ctx: Context, args: Args, running: Arc<UserQueue>) -> Result<(), BoxError> {
	let _slot = match &ctx.user {
		Some(user) => match running.enter(user.id) {
			Some(slot) => Some(slot),
			None => {
				ctx.reply
					.show(embed::warning("Busy", "Wait for your previous echo to finish."))
					.await?;
				return Ok(());
			}
		},
		None => None,
	};

	let msg: String = args.get("msg").unwrap_or_default();
	let count = args.get::<i64>("count").unwrap_or(1);
	let delay = Duration::from_millis(ctx.config.commands.echo.echo_delay_ms);

	let message = Reply::embed(Embed {
		title: Some(msg),
		author: Some(EmbedAuthor {
			name: ctx.display_name().to_string(),
			icon_url: None,
		}),
		color: Some(0x000000),
		timestamp: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
		..Embed::default()
	});

	ctx.reply.show(message.clone()).await?;
	for _ in 1..count {
		tokio::time::sleep(delay).await;
		ctx.reply.follow_up(message.clone()).await?;
	}
	Ok(())
}
