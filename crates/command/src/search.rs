//! Building blocks for autocomplete providers.

use async_trait::async_trait;
use interaction::Choice;
use interaction::MAX_CHOICES;

use crate::Autocomplete;

/// Levenshtein distance between two strings, counted in characters.
pub fn edit_distance(value: &str, other: &str, case_insensitive: bool) -> usize {
	if value == other {
		return 0;
	}
	let (value, other) = if case_insensitive {
		(value.to_lowercase(), other.to_lowercase())
	} else {
		(value.to_string(), other.to_string())
	};

	let other: Vec<char> = other.chars().collect();
	let mut row: Vec<usize> = (0..=other.len()).collect();
	for (i, a) in value.chars().enumerate() {
		let mut diagonal = row[0];
		row[0] = i + 1;
		for (j, b) in other.iter().enumerate() {
			let above = row[j + 1];
			row[j + 1] = if a == *b {
				diagonal
			} else {
				1 + diagonal.min(above).min(row[j])
			};
			diagonal = above;
		}
	}
	row[other.len()]
}

fn words(value: &str) -> impl Iterator<Item = &str> {
	value.split(|c: char| !c.is_alphanumeric())
}

/// Values with a word starting with `term`, sorted, at most `limit` of them.
///
/// Words are split on anything that is not a letter or digit, so
/// `"hello_world"` matches both `"hel"` and `"wor"`. An empty term matches
/// everything.
pub fn query_search<I, S>(values: I, term: &str, limit: usize) -> Vec<String>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut matches: Vec<String> = values
		.into_iter()
		.filter(|value| words(value.as_ref()).any(|word| word.starts_with(term)))
		.map(|value| value.as_ref().to_string())
		.collect();
	matches.sort();
	matches.truncate(limit);
	matches
}

/// Autocomplete over a fixed list of values using [`query_search`].
#[derive(Debug, Clone)]
pub struct WordSearch {
	values: Vec<String>,
	limit: usize,
}

impl WordSearch {
	pub fn new<I, S>(values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			values: values.into_iter().map(Into::into).collect(),
			limit: MAX_CHOICES,
		}
	}

	pub fn limit(mut self, limit: usize) -> Self {
		self.limit = limit;
		self
	}
}

#[async_trait]
impl Autocomplete for WordSearch {
	async fn suggest(&self, partial: &str) -> Vec<Choice> {
		query_search(&self.values, partial, self.limit)
			.into_iter()
			.map(Choice::from)
			.collect()
	}
}
