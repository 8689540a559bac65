//! Operator console on stdin.

use std::str::FromStr;

use command::CommandRegistry;
use command::search::edit_distance;
use config::BOT_CONF;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;
use tracing::info;
use tracing::warn;

use crate::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
	Reload,
	Quit,
}

impl FromStr for ConsoleCommand {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"r" | "reload" => Ok(Self::Reload),
			"q" | "quit" => Ok(Self::Quit),
			other => Err(match suggest(other) {
				Some(near) => format!("unknown console command '{}', did you mean '{}'?", other, near),
				None => format!("unknown console command '{}'", other),
			}),
		}
	}
}

const KNOWN: [&str; 2] = ["reload", "quit"];

/// Closest known command within two edits of `input`.
fn suggest(input: &str) -> Option<&'static str> {
	KNOWN
		.into_iter()
		.map(|known| (edit_distance(input, known, true), known))
		.filter(|(distance, _)| *distance <= 2)
		.min()
		.map(|(_, known)| known)
}

/// Re-read the configuration and drop every cached command so the next
/// lookup builds it afresh.
pub async fn reload(registry: &CommandRegistry<Context>) {
	if BOT_CONF.is_initialized() {
		if let Err(e) = BOT_CONF.reload() {
			warn!(error = %e, "Keeping previous configuration");
		}
	}

	let failures = registry.clear_cache().await;
	info!(
		commands = registry.len(),
		teardown_failures = failures.len(),
		"Commands reloaded"
	);
}

/// Read console commands until `quit` or end of input.
pub async fn run<R>(input: R, registry: &CommandRegistry<Context>) -> std::io::Result<()>
where
	R: AsyncBufRead + Unpin,
{
	let mut lines = input.lines();
	while let Some(line) = lines.next_line().await? {
		if line.trim().is_empty() {
			continue;
		}
		match line.parse::<ConsoleCommand>() {
			Ok(ConsoleCommand::Reload) => reload(registry).await,
			Ok(ConsoleCommand::Quit) => {
				info!("Quit requested from console");
				return Ok(());
			}
			Err(e) => warn!("{}", e),
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("r", ConsoleCommand::Reload)]
	#[case("reload", ConsoleCommand::Reload)]
	#[case(" RELOAD\r", ConsoleCommand::Reload)]
	#[case("q", ConsoleCommand::Quit)]
	#[case("Quit", ConsoleCommand::Quit)]
	fn test_parse_console_command(#[case] input: &str, #[case] expected: ConsoleCommand) {
		assert_eq!(input.parse::<ConsoleCommand>(), Ok(expected));
	}

	#[test]
	fn test_unknown_console_command() {
		let err = "restart".parse::<ConsoleCommand>().unwrap_err();
		assert!(!err.contains("did you mean"));
	}

	#[rstest]
	#[case("relaod", "reload")]
	#[case("quti", "quit")]
	#[case("reloa", "reload")]
	fn test_typo_suggests_known_command(#[case] input: &str, #[case] expected: &str) {
		let err = input.parse::<ConsoleCommand>().unwrap_err();
		assert!(err.ends_with(&format!("did you mean '{}'?", expected)), "{}", err);
	}
}
