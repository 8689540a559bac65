use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplyError {
	#[error("Failed to deliver reply: {0}")]
	Delivery(#[source] Box<dyn std::error::Error + Send + Sync>),

	#[error("Interaction is no longer connected")]
	Closed,
}
