//! Answering interactions.
//!
//! [`ReplyHelper`] wraps the host's [`Responder`] and gives command
//! executors a single `show` entry point, plus a rate-limited `show_fast`
//! for progress updates backed by [`SingularQueue`].

pub mod embed;
mod error;
mod helper;
mod queue;
mod reply;
mod text;
mod user_queue;

pub use error::ReplyError;
pub use helper::DEFAULT_SHOW_FAST_DELAY;
pub use helper::ReplyHelper;
pub use helper::Responder;
pub use queue::QueueEvent;
pub use queue::SingularQueue;
pub use reply::Embed;
pub use reply::EmbedAuthor;
pub use reply::EmbedField;
pub use reply::EmbedThumbnail;
pub use reply::Reply;
pub use reply::clear_reply;
pub use text::truncate;
pub use user_queue::UserQueue;
pub use user_queue::UserSlot;
