use crate::Portable;
use regex::Regex;
use std::sync::OnceLock;

fn whitespace() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| Regex::new(r"[\t\n\x0B\x0C\r ]+").expect("valid regex"))
}

fn non_word() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]").expect("valid regex"))
}

/// Lowercase, join words with `_` and drop everything else that isn't a word character.
pub fn clean(text: &str) -> String {
	let lower = text.trim().to_ascii_lowercase();
	let joined = whitespace().replace_all(&lower, "_");
	non_word().replace_all(&joined, "").into_owned()
}

fn non_blank<'a, R: Portable>(record: &'a R, name: &str) -> Option<std::borrow::Cow<'a, str>> {
	record.field(name).filter(|value| !value.trim().is_empty())
}

/// Name for a record suitable for file names.
///
/// Uses the `name` field, then the `title` field (if declared and not blank), and falls back to
/// the (uncleaned) id.
pub fn clean_identifier<R: Portable>(record: &R) -> String {
	match non_blank(record, "name").or_else(|| non_blank(record, "title")) {
		Some(name) => clean(&name),
		None => record.id().to_string(),
	}
}
