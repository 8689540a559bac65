use std::sync::Arc;
use std::time::Duration;

use config::BotConfig;
use interaction::User;
use reply::ReplyHelper;
use reply::Responder;

pub type DynResponder = Arc<dyn Responder>;

/// What an executor gets to answer one interaction.
#[derive(Clone)]
pub struct Context {
	pub reply: Arc<ReplyHelper<DynResponder>>,
	pub user: Option<User>,
	/// Snapshot taken when the interaction arrived
	pub config: Arc<BotConfig>,
}

impl Context {
	pub fn new(responder: DynResponder, user: Option<User>, config: Arc<BotConfig>) -> Self {
		let delay = Duration::from_millis(config.show_fast_delay_ms);
		Self {
			reply: Arc::new(ReplyHelper::with_delay(responder, delay)),
			user,
			config,
		}
	}

	/// Name to address the requester by.
	pub fn display_name(&self) -> &str {
		self.user.as_ref().map_or("someone", User::display_name)
	}
}
