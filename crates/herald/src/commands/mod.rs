//! The commands this bot ships with.

pub mod debug;
pub mod echo;
pub mod random;

use command::BoxError;
use command::CommandRegistry;
use command::Entry;
use command::Loaded;

use crate::Context;

/// Registry entries for every shipped command, in registration order.
pub fn entries() -> Vec<Entry<Context>> {
	vec![
		Entry::new("echo", |_name: String| async {
			echo::command().map(Loaded::from).map_err(BoxError::from)
		}),
		Entry::new("debug", |_name: String| async {
			debug::command().map(Loaded::from).map_err(BoxError::from)
		}),
		Entry::new("random", |name: String| async move {
			random::command(&name)
				.map(Loaded::from)
				.map_err(BoxError::from)
		}),
	]
}

pub fn registry() -> CommandRegistry<Context> {
	let registry = CommandRegistry::new();
	for entry in entries() {
		registry.add(entry);
	}
	registry
}
