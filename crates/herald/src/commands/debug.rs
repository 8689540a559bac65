use command::Arg;
use command::Args;
use command::BoxError;
use command::Command;
use command::ConfigError;
use command::WordSearch;
use tracing::debug;

use crate::Context;

const SAMPLES: [&str; 6] = [
	"hello world",
	"hello_there",
	"lorem ipsum",
	"quick brown fox",
	"the lazy dog",
	"zero-width",
];

pub fn command() -> Result<Command<Context>, ConfigError> {
	Command::builder(
		"debug",
		"Debug command • This command will probably change a lot.",
	)
	.arg(
		"argString",
		Arg::string("argString").autocomplete(WordSearch::new(SAMPLES)),
	)
	.arg("argNumber", Arg::integer("argNumber"))
	.arg("argBoolean", Arg::boolean("argBoolean"))
	.arg("argUser", Arg::user("argUser"))
	.executor(execute)
	.build()
}

async fn execute(ctx: Context, args: Args) -> Result<(), BoxError> {
	debug!(args = ?args, "Debug command invoked");
	ctx.reply.show("Test").await?;
	Ok(())
}
