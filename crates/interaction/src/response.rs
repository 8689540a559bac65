use serde::Deserialize;
use serde::Serialize;

use crate::Choice;

/// Maximum number of choices or suggestions the platform accepts.
pub const MAX_CHOICES: usize = 25;

/// Suggestions sent back for an autocomplete interaction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AutocompleteResponse {
	pub choices: Vec<Choice>,
}

impl AutocompleteResponse {
	/// Build a response, keeping at most [`MAX_CHOICES`] suggestions in
	/// their original order.
	pub fn capped(mut choices: Vec<Choice>) -> Self {
		choices.truncate(MAX_CHOICES);
		Self { choices }
	}
}
