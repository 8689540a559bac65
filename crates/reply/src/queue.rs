//! A rate-limited slot holding the latest value to show.
//!
//! [`SingularQueue`] lets callers publish updates as often as they like
//! while emitting at most one value per `delay`. Every emission carries the
//! newest queued value; values overtaken in between come out as
//! [`QueueEvent::Skip`] so their owner can release them.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::sync::Weak;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueEvent<T> {
	/// The value to show now
	Next(T),
	/// A value superseded or cancelled before its turn
	Skip(T),
}

struct State<T> {
	pending: Option<T>,
	/// No emission before this instant
	not_before: Option<Instant>,
	timer: Option<JoinHandle<()>>,
	/// Identifies the armed timer; a stale timer that wakes anyway is ignored.
	generation: u64,
}

struct Shared<T> {
	delay: Duration,
	state: Mutex<State<T>>,
	events: mpsc::UnboundedSender<QueueEvent<T>>,
}

/// Coalescing update scheduler.
///
/// Must be used from within a Tokio runtime: waiting out the cooldown
/// spawns a timer task.
pub struct SingularQueue<T> {
	shared: Arc<Shared<T>>,
}

impl<T: Send + 'static> SingularQueue<T> {
	/// Create a queue and the receiving end of its event stream.
	pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<QueueEvent<T>>) {
		let (events, rx) = mpsc::unbounded_channel();
		let shared = Arc::new(Shared {
			delay,
			state: Mutex::new(State {
				pending: None,
				not_before: None,
				timer: None,
				generation: 0,
			}),
			events,
		});
		(Self { shared }, rx)
	}

	pub fn delay(&self) -> Duration {
		self.shared.delay
	}

	/// Make `value` the next one to show, superseding any pending value.
	pub fn queue(&self, value: T) {
		let mut state = self.shared.lock();
		if let Some(old) = state.pending.replace(value) {
			self.shared.emit(QueueEvent::Skip(old));
		}
		Shared::tick(&self.shared, &mut state);
	}

	/// Drop the pending value and restart the cooldown from now.
	pub fn skip(&self) {
		let mut state = self.shared.lock();
		if let Some(old) = state.pending.take() {
			self.shared.emit(QueueEvent::Skip(old));
		}
		state.disarm();
		state.not_before = Some(Instant::now() + self.shared.delay);
	}

	pub fn is_pending(&self) -> bool {
		self.shared.lock().pending.is_some()
	}
}

impl<T> Drop for SingularQueue<T> {
	fn drop(&mut self) {
		self.shared.lock().disarm();
	}
}

impl<T> State<T> {
	fn disarm(&mut self) {
		if let Some(timer) = self.timer.take() {
			timer.abort();
		}
		self.generation = self.generation.wrapping_add(1);
	}
}

impl<T> Shared<T> {
	fn lock(&self) -> MutexGuard<'_, State<T>> {
		self.state.lock().unwrap_or_else(PoisonError::into_inner)
	}

	fn emit(&self, event: QueueEvent<T>) {
		// A closed receiver means nobody shows updates any more.
		let _ = self.events.send(event);
	}
}

impl<T: Send + 'static> Shared<T> {
	fn tick(this: &Arc<Self>, state: &mut State<T>) {
		state.disarm();
		let now = Instant::now();

		if let Some(deadline) = state.not_before.filter(|deadline| now < *deadline) {
			let generation = state.generation;
			let weak = Arc::downgrade(this);
			state.timer = Some(tokio::spawn(async move {
				tokio::time::sleep_until(deadline).await;
				Self::fire(weak, generation);
			}));
			return;
		}

		if let Some(value) = state.pending.take() {
			state.not_before = Some(now + this.delay);
			this.emit(QueueEvent::Next(value));
		}
	}

	fn fire(weak: Weak<Self>, generation: u64) {
		let Some(this) = weak.upgrade() else {
			return;
		};
		let mut state = this.lock();
		if state.generation != generation {
			return;
		}
		state.timer = None;
		Self::tick(&this, &mut state);
	}
}

#[cfg(test)]
mod tests {
	use tokio::sync::mpsc::error::TryRecvError;

	use super::*;

	const DELAY: Duration = Duration::from_millis(1000);

	#[tokio::test(start_paused = true)]
	async fn test_first_value_is_emitted_immediately() {
		let (queue, mut rx) = SingularQueue::new(DELAY);
		queue.queue("a");
		assert_eq!(rx.try_recv(), Ok(QueueEvent::Next("a")));
		assert!(!queue.is_pending());
	}

	#[tokio::test(start_paused = true)]
	async fn test_latest_value_wins_within_window() {
		let (queue, mut rx) = SingularQueue::new(DELAY);
		queue.queue("x");
		assert_eq!(rx.recv().await, Some(QueueEvent::Next("x")));
		let emitted_at = Instant::now();

		queue.queue("a");
		queue.queue("b");
		assert_eq!(rx.try_recv(), Ok(QueueEvent::Skip("a")));
		assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));

		assert_eq!(rx.recv().await, Some(QueueEvent::Next("b")));
		assert!(Instant::now() - emitted_at >= DELAY);
		assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
	}

	#[tokio::test(start_paused = true)]
	async fn test_emissions_never_closer_than_delay() {
		let (queue, mut rx) = SingularQueue::new(DELAY);
		let mut emitted = Vec::new();

		for i in 0..20u32 {
			queue.queue(i);
			tokio::time::sleep(Duration::from_millis(150)).await;
			while let Ok(event) = rx.try_recv() {
				if let QueueEvent::Next(v) = event {
					emitted.push((v, Instant::now()));
				}
			}
		}
		tokio::time::sleep(DELAY).await;
		while let Ok(QueueEvent::Next(v)) = rx.try_recv() {
			emitted.push((v, Instant::now()));
		}

		assert!(emitted.len() >= 3);
		// Observed times trail real emission by at most one sleep step.
		for pair in emitted.windows(2) {
			assert!(pair[1].1 - pair[0].1 >= DELAY - Duration::from_millis(150));
			assert!(pair[1].0 > pair[0].0);
		}
		assert_eq!(emitted.last().map(|(v, _)| *v), Some(19));
	}

	#[tokio::test(start_paused = true)]
	async fn test_skip_cancels_pending_and_restarts_cooldown() {
		let (queue, mut rx) = SingularQueue::new(DELAY);
		queue.queue(1);
		assert_eq!(rx.recv().await, Some(QueueEvent::Next(1)));

		queue.queue(2);
		queue.skip();
		assert_eq!(rx.try_recv(), Ok(QueueEvent::Skip(2)));

		// The timer armed for 2 is gone: nothing arrives after the window.
		tokio::time::sleep(DELAY * 2).await;
		assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));

		queue.skip();
		let skipped_at = Instant::now();
		queue.queue(3);
		assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
		assert_eq!(rx.recv().await, Some(QueueEvent::Next(3)));
		assert!(Instant::now() - skipped_at >= DELAY);
	}

	#[tokio::test(start_paused = true)]
	async fn test_skip_on_idle_queue_emits_nothing() {
		let (queue, mut rx) = SingularQueue::<u8>::new(DELAY);
		queue.skip();
		assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
	}

	#[tokio::test(start_paused = true)]
	async fn test_drop_aborts_timer() {
		let (queue, mut rx) = SingularQueue::new(DELAY);
		queue.queue(1);
		queue.queue(2);
		assert_eq!(rx.recv().await, Some(QueueEvent::Next(1)));
		drop(queue);

		tokio::time::sleep(DELAY * 2).await;
		assert_eq!(rx.recv().await, None);
	}
}
