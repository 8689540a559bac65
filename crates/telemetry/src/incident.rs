//! Correlating user-visible failures with operator logs.
//!
//! A failure that cannot be explained to the requester is logged under a
//! fresh tracking id; the same id is shown to the user so the two can be
//! matched later.

use std::fmt::Display;

use tracing::error;
use ulid::Ulid;

/// Log an incident and return its tracking id.
pub fn report(name: &str, detail: impl Display) -> Ulid {
	let tracking_id = Ulid::new();
	error!(%tracking_id, incident = name, "{}", detail);
	tracking_id
}
