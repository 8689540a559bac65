use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::sync::MutexGuard;
use tokio::task::JoinHandle;
use tracing::trace;
use tracing::warn;

use crate::QueueEvent;
use crate::Reply;
use crate::ReplyError;
use crate::SingularQueue;

/// Delay between coalesced updates unless configured otherwise.
pub const DEFAULT_SHOW_FAST_DELAY: Duration = Duration::from_millis(3000);

/// The host's way of answering one interaction.
#[async_trait]
pub trait Responder: Send + Sync + 'static {
	/// Send the initial reply.
	async fn reply(&self, reply: Reply) -> Result<(), ReplyError>;

	/// Replace the initial reply.
	async fn edit_reply(&self, reply: Reply) -> Result<(), ReplyError>;

	/// Send an additional message after the initial reply.
	async fn follow_up(&self, reply: Reply) -> Result<(), ReplyError>;
}

#[async_trait]
impl<R: Responder + ?Sized> Responder for Arc<R> {
	async fn reply(&self, reply: Reply) -> Result<(), ReplyError> {
		(**self).reply(reply).await
	}

	async fn edit_reply(&self, reply: Reply) -> Result<(), ReplyError> {
		(**self).edit_reply(reply).await
	}

	async fn follow_up(&self, reply: Reply) -> Result<(), ReplyError> {
		(**self).follow_up(reply).await
	}
}

struct Inner<R> {
	responder: R,
	ephemeral: AtomicBool,
	/// Whether the initial reply went out; held while sending so that
	/// reply and edit never overtake each other.
	replied: Mutex<bool>,
	/// Bumped by every direct `show` while `replied` is held. Queued
	/// updates carry the epoch they were queued in and are dropped once
	/// it is stale.
	epoch: AtomicU64,
}

impl<R: Responder> Inner<R> {
	async fn show(&self, reply: Reply) -> Result<(), ReplyError> {
		let replied = self.replied.lock().await;
		self.epoch.fetch_add(1, Ordering::SeqCst);
		self.send(replied, reply).await
	}

	async fn show_queued(&self, epoch: u64, reply: Reply) -> Result<(), ReplyError> {
		let replied = self.replied.lock().await;
		if self.epoch.load(Ordering::SeqCst) != epoch {
			trace!("Queued update overtaken by show");
			return Ok(());
		}
		self.send(replied, reply).await
	}

	async fn send(
		&self,
		mut replied: MutexGuard<'_, bool>,
		mut reply: Reply,
	) -> Result<(), ReplyError> {
		if *replied {
			self.responder.edit_reply(reply).await
		} else {
			reply.ephemeral = self.ephemeral.load(Ordering::Relaxed);
			self.responder.reply(reply).await?;
			*replied = true;
			Ok(())
		}
	}
}

/// Reply handle given to command executors.
///
/// [`show`](Self::show) sends or replaces the reply right away;
/// [`show_fast`](Self::show_fast) is for frequent progress updates and is
/// rate limited to one message per delay, always showing the latest.
pub struct ReplyHelper<R> {
	inner: Arc<Inner<R>>,
	queue: SingularQueue<(u64, Reply)>,
	pump: JoinHandle<()>,
}

impl<R: Responder> ReplyHelper<R> {
	pub fn new(responder: R) -> Self {
		Self::with_delay(responder, DEFAULT_SHOW_FAST_DELAY)
	}

	pub fn with_delay(responder: R, delay: Duration) -> Self {
		let inner = Arc::new(Inner {
			responder,
			ephemeral: AtomicBool::new(false),
			replied: Mutex::new(false),
			epoch: AtomicU64::new(0),
		});
		let (queue, mut events) = SingularQueue::new(delay);

		let pump_inner = inner.clone();
		let pump = tokio::spawn(async move {
			while let Some(event) = events.recv().await {
				match event {
					QueueEvent::Next((epoch, reply)) => {
						if let Err(e) = pump_inner.show_queued(epoch, reply).await {
							warn!(error = %e, "Failed to show queued update");
						}
					}
					QueueEvent::Skip(_) => trace!("Superseded update dropped"),
				}
			}
		});

		Self { inner, queue, pump }
	}

	/// Make the initial reply visible only to the requester.
	pub fn set_ephemeral(&self, ephemeral: bool) {
		self.inner.ephemeral.store(ephemeral, Ordering::Relaxed);
	}

	pub fn is_ephemeral(&self) -> bool {
		self.inner.ephemeral.load(Ordering::Relaxed)
	}

	pub async fn has_replied(&self) -> bool {
		*self.inner.replied.lock().await
	}

	pub fn responder(&self) -> &R {
		&self.inner.responder
	}

	/// Reply, or edit the reply if one was already sent. Cancels any
	/// update still waiting in [`show_fast`](Self::show_fast).
	pub async fn show(&self, reply: impl Into<Reply>) -> Result<(), ReplyError> {
		self.queue.skip();
		self.inner.show(reply.into()).await
	}

	/// Queue a rate-limited update.
	pub fn show_fast(&self, reply: impl Into<Reply>) {
		let epoch = self.inner.epoch.load(Ordering::SeqCst);
		self.queue.queue((epoch, reply.into()));
	}

	pub async fn follow_up(&self, reply: impl Into<Reply>) -> Result<(), ReplyError> {
		let mut reply = reply.into();
		reply.ephemeral = self.is_ephemeral();
		self.inner.responder.follow_up(reply).await
	}
}

impl<R> Drop for ReplyHelper<R> {
	fn drop(&mut self) {
		self.pump.abort();
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Mutex as StdMutex;

	use super::*;

	#[derive(Debug, Clone, PartialEq)]
	enum Sent {
		Reply(Reply),
		Edit(Reply),
		FollowUp(Reply),
	}

	#[derive(Default, Clone)]
	struct Recorder(Arc<StdMutex<Vec<Sent>>>);

	impl Recorder {
		fn sent(&self) -> Vec<Sent> {
			self.0.lock().unwrap().clone()
		}
	}

	#[async_trait]
	impl Responder for Recorder {
		async fn reply(&self, reply: Reply) -> Result<(), ReplyError> {
			self.0.lock().unwrap().push(Sent::Reply(reply));
			Ok(())
		}

		async fn edit_reply(&self, reply: Reply) -> Result<(), ReplyError> {
			self.0.lock().unwrap().push(Sent::Edit(reply));
			Ok(())
		}

		async fn follow_up(&self, reply: Reply) -> Result<(), ReplyError> {
			self.0.lock().unwrap().push(Sent::FollowUp(reply));
			Ok(())
		}
	}

	#[tokio::test]
	async fn test_show_replies_then_edits() {
		let recorder = Recorder::default();
		let helper = ReplyHelper::new(recorder.clone());

		assert!(!helper.has_replied().await);
		helper.show("one").await.unwrap();
		helper.show("two").await.unwrap();
		assert!(helper.has_replied().await);

		assert_eq!(
			recorder.sent(),
			vec![
				Sent::Reply(Reply::text("one")),
				Sent::Edit(Reply::text("two"))
			]
		);
	}

	#[tokio::test]
	async fn test_ephemeral_applies_to_reply_and_follow_up() {
		let recorder = Recorder::default();
		let helper = ReplyHelper::new(recorder.clone());
		helper.set_ephemeral(true);

		helper.show("secret").await.unwrap();
		helper.follow_up("more").await.unwrap();

		let sent = recorder.sent();
		assert!(matches!(&sent[0], Sent::Reply(r) if r.ephemeral));
		assert!(matches!(&sent[1], Sent::FollowUp(r) if r.ephemeral));
	}

	#[tokio::test(start_paused = true)]
	async fn test_show_fast_coalesces_updates() {
		let recorder = Recorder::default();
		let helper = ReplyHelper::with_delay(recorder.clone(), Duration::from_millis(1000));

		helper.show_fast("10%");
		tokio::time::sleep(Duration::from_millis(10)).await;
		helper.show_fast("20%");
		helper.show_fast("30%");
		tokio::time::sleep(Duration::from_millis(2000)).await;

		assert_eq!(
			recorder.sent(),
			vec![
				Sent::Reply(Reply::text("10%")),
				Sent::Edit(Reply::text("30%"))
			]
		);
	}

	#[tokio::test(start_paused = true)]
	async fn test_show_overrides_pending_fast_update() {
		let recorder = Recorder::default();
		let helper = ReplyHelper::with_delay(recorder.clone(), Duration::from_millis(1000));

		helper.show_fast("working");
		tokio::time::sleep(Duration::from_millis(10)).await;
		helper.show_fast("still working");
		helper.show("done").await.unwrap();
		tokio::time::sleep(Duration::from_millis(3000)).await;

		assert_eq!(
			recorder.sent(),
			vec![
				Sent::Reply(Reply::text("working")),
				Sent::Edit(Reply::text("done"))
			]
		);
	}

	#[tokio::test(start_paused = true)]
	async fn test_show_drops_update_already_emitted() {
		let recorder = Recorder::default();
		let helper = ReplyHelper::with_delay(recorder.clone(), Duration::from_millis(1000));

		helper.show_fast("working");
		helper.show("done").await.unwrap();
		tokio::time::sleep(Duration::from_millis(3000)).await;

		assert_eq!(recorder.sent(), vec![Sent::Reply(Reply::text("done"))]);
	}

	#[tokio::test(start_paused = true)]
	async fn test_show_fast_after_show_still_updates() {
		let recorder = Recorder::default();
		let helper = ReplyHelper::with_delay(recorder.clone(), Duration::from_millis(1000));

		helper.show("start").await.unwrap();
		helper.show_fast("progress");
		tokio::time::sleep(Duration::from_millis(3000)).await;

		assert_eq!(
			recorder.sent(),
			vec![
				Sent::Reply(Reply::text("start")),
				Sent::Edit(Reply::text("progress"))
			]
		);
	}
}
