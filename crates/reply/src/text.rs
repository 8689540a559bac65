/// Shorten `text` to at most `max_len` characters by cutting out its
/// middle and marking the cut with ` ... `.
///
/// Text that already fits is returned unchanged.
pub fn truncate(text: &str, max_len: usize) -> String {
	let len = text.chars().count();
	if len <= max_len {
		return text.to_string();
	}
	if max_len < 6 {
		return text.chars().take(max_len).collect();
	}

	let head = max_len / 2 - 3;
	let tail = max_len - max_len / 2 - 2;
	let start: String = text.chars().take(head).collect();
	let end: String = text.chars().skip(len - tail).collect();
	format!("{} ... {}", start, end)
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("short", 10, "short")]
	#[case("exactly10!", 10, "exactly10!")]
	#[case("abcdefghijklmnopqrstuvwxyz", 12, "abc ... wxyz")]
	#[case("abcdefghijklmnopqrstuvwxyz", 11, "ab ... wxyz")]
	#[case("abcdefghijklmnopqrstuvwxyz", 4, "abcd")]
	#[case("ééééééééééüüüüüüüüüü", 10, "éé ... üüü")]
	fn test_truncate(#[case] text: &str, #[case] max_len: usize, #[case] expected: &str) {
		let out = truncate(text, max_len);
		assert_eq!(out, expected);
		assert!(out.chars().count() <= max_len);
	}
}
