use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use arc_swap::ArcSwap;
use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use futures::future::join_all;
use tokio::sync::Mutex;
use tracing::debug;
use tracing::error;
use tracing::warn;

use crate::BoxError;
use crate::Command;
use crate::RegistryError;
use crate::TeardownError;
use crate::panic_message;

/// Cleanup hook run when a cached command is evicted.
pub type Teardown = Box<dyn FnOnce() -> BoxFuture<'static, Result<(), BoxError>> + Send>;

/// What a factory produces: the command plus an optional teardown hook.
pub struct Loaded<C> {
	pub command: Command<C>,
	pub teardown: Option<Teardown>,
}

impl<C> Loaded<C> {
	pub fn new(command: Command<C>) -> Self {
		Self {
			command,
			teardown: None,
		}
	}

	pub fn with_teardown<F, Fut>(mut self, teardown: F) -> Self
	where
		F: FnOnce() -> Fut + Send + 'static,
		Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
	{
		self.teardown = Some(Box::new(move || teardown().boxed()));
		self
	}
}

impl<C> From<Command<C>> for Loaded<C> {
	fn from(command: Command<C>) -> Self {
		Loaded::new(command)
	}
}

/// Creates a command on first use. Receives the name it is registered
/// under.
#[async_trait]
pub trait CommandFactory<C>: Send + Sync {
	async fn create(&self, name: &str) -> Result<Loaded<C>, BoxError>;
}

#[async_trait]
impl<C, F, Fut> CommandFactory<C> for F
where
	C: 'static,
	F: Fn(String) -> Fut + Send + Sync,
	Fut: Future<Output = Result<Loaded<C>, BoxError>> + Send + 'static,
{
	async fn create(&self, name: &str) -> Result<Loaded<C>, BoxError> {
		(self)(name.to_string()).await
	}
}

struct Cached<C> {
	command: Arc<Command<C>>,
	teardown: Option<Teardown>,
}

/// A named, lazily resolved command.
pub struct Entry<C> {
	name: String,
	factory: Arc<dyn CommandFactory<C>>,
	// Held across the factory call so concurrent lookups of an uncached
	// entry wait for the first one instead of creating their own.
	slot: Mutex<Option<Cached<C>>>,
}

impl<C: Send + 'static> Entry<C> {
	pub fn new(name: impl Into<String>, factory: impl CommandFactory<C> + 'static) -> Self {
		Self {
			name: name.into(),
			factory: Arc::new(factory),
			slot: Mutex::new(None),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	async fn resolve(&self) -> Result<Arc<Command<C>>, RegistryError> {
		let mut slot = self.slot.lock().await;
		if let Some(cached) = slot.as_ref() {
			return Ok(cached.command.clone());
		}

		debug!(command = %self.name, "Creating command");
		let loaded = self
			.factory
			.create(&self.name)
			.await
			.map_err(|source| RegistryError::Factory {
				name: self.name.clone(),
				source,
			})?;
		if loaded.command.name() != self.name {
			warn!(
				"Command registered as '{}' declares itself as '{}'",
				self.name,
				loaded.command.name()
			);
		}

		let command = Arc::new(loaded.command);
		*slot = Some(Cached {
			command: command.clone(),
			teardown: loaded.teardown,
		});
		Ok(command)
	}

	async fn evict(&self) -> Option<(String, Option<Teardown>)> {
		let cached = self.slot.lock().await.take()?;
		Some((self.name.clone(), cached.teardown))
	}
}

/// Name-to-command resolution with memoization and reload support.
///
/// Entries are kept in registration order. Lookups return the first entry
/// with a matching name.
pub struct CommandRegistry<C> {
	entries: ArcSwap<Vec<Arc<Entry<C>>>>,
}

impl<C: Send + 'static> Default for CommandRegistry<C> {
	fn default() -> Self {
		Self::new()
	}
}

impl<C: Send + 'static> CommandRegistry<C> {
	pub fn new() -> Self {
		Self {
			entries: ArcSwap::from_pointee(Vec::new()),
		}
	}

	pub fn add(&self, entry: Entry<C>) {
		let entry = Arc::new(entry);
		self.entries.rcu(|current| {
			if current.iter().any(|e| e.name == entry.name) {
				warn!(
					"Command '{}' is already registered; the new entry is shadowed",
					entry.name
				);
			}
			let mut next = Vec::clone(current);
			next.push(entry.clone());
			next
		});
	}

	pub fn len(&self) -> usize {
		self.entries.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.load().is_empty()
	}

	/// Registered names in registration order.
	pub fn names(&self) -> Vec<String> {
		self.entries.load().iter().map(|e| e.name.clone()).collect()
	}

	/// Resolve a command by name.
	///
	/// Returns `Ok(None)` when nothing is registered under `name`. The
	/// factory runs at most once per cache lifetime, even for concurrent
	/// callers; all of them get the same instance.
	pub async fn get(&self, name: &str) -> Result<Option<Arc<Command<C>>>, RegistryError> {
		let entry = self
			.entries
			.load()
			.iter()
			.find(|e| e.name == name)
			.cloned();
		match entry {
			Some(entry) => entry.resolve().await.map(Some),
			None => Ok(None),
		}
	}

	/// Resolve every entry, in registration order.
	///
	/// Entries whose factory fails are logged and left out so that one
	/// broken command does not prevent the rest from being registered.
	pub async fn get_all(&self) -> Vec<Arc<Command<C>>> {
		let entries = self.entries.load_full();
		let resolved = join_all(entries.iter().map(|entry| entry.resolve())).await;

		resolved
			.into_iter()
			.filter_map(|result| match result {
				Ok(command) => Some(command),
				Err(e) => {
					error!("Skipping command: {}", e);
					None
				}
			})
			.collect()
	}

	/// Evict every cached command and run its teardown hook.
	///
	/// Hooks run concurrently. A failing or panicking hook does not stop
	/// the others; failures are logged and returned.
	pub async fn clear_cache(&self) -> Vec<TeardownError> {
		let entries = self.entries.load_full();
		teardown_all(&entries).await
	}

	/// Swap in a new set of entries and tear down everything the old set
	/// had cached.
	pub async fn replace(&self, entries: Vec<Entry<C>>) -> Vec<TeardownError> {
		let next: Vec<_> = entries.into_iter().map(Arc::new).collect();
		let previous = self.entries.swap(Arc::new(next));
		teardown_all(&previous).await
	}
}

async fn teardown_all<C: Send + 'static>(entries: &[Arc<Entry<C>>]) -> Vec<TeardownError> {
	let evicted = join_all(entries.iter().map(|entry| entry.evict())).await;

	let hooks = evicted
		.into_iter()
		.flatten()
		.filter_map(|(name, teardown)| teardown.map(|teardown| (name, teardown)))
		.map(|(name, teardown)| async move {
			match AssertUnwindSafe(async move { teardown().await })
				.catch_unwind()
				.await
			{
				Ok(result) => result.map_err(|source| TeardownError { name, source }),
				Err(payload) => Err(TeardownError {
					name,
					source: panic_message(payload.as_ref()).into(),
				}),
			}
		});

	let failures: Vec<TeardownError> = join_all(hooks)
		.await
		.into_iter()
		.filter_map(Result::err)
		.collect();
	for failure in &failures {
		warn!("{}", failure);
	}
	failures
}
