use crate::{
	errors::Error,
	Portable,
	Result,
	Storable,
};
use std::borrow::Cow;

/// Hand-written record; lists a bookkeeping field to make sure the row builder filters it.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Snippet {
	pub kind: String,
	pub id: u64,
	pub active: bool,
	pub title: String,
	pub replacement: String,
	pub priority: u32,
}

impl Snippet {
	pub const ROW_1: &'static str = "\t<title-7><![CDATA[Bold Text]]></title-7>\n\t<replacement-7><![CDATA[<b>$1</b>]]></replacement-7>\n\t<priority-7><![CDATA[10]]></priority-7>\n";

	pub const DOCUMENT_1: &'static str = r#"<?xml version="1.0" encoding="UTF-8"?>
<snippets version="1.0" xmlns="http://www.rantcentralforums.com" contains="single">
<snippets_7>
	<title-7><![CDATA[Bold Text]]></title-7>
	<replacement-7><![CDATA[<b>$1</b>]]></replacement-7>
	<priority-7><![CDATA[10]]></priority-7>
	</snippets_7>
</snippets>"#;

	pub fn stored(id: u64) -> Self {
		Self {
			kind: "snippets".into(),
			id,
			active: true,
			title: "Bold Text".into(),
			replacement: "<b>$1</b>".into(),
			priority: 10,
		}
	}

	pub fn blank(id: u64) -> Self {
		Self {
			kind: "snippets".into(),
			id,
			..Self::default()
		}
	}
}

impl Storable for Snippet {
	fn kind(&self) -> Cow<'_, str> {
		Cow::Borrowed(&self.kind)
	}

	fn id(&self) -> u64 {
		self.id
	}

	fn set_id(&mut self, id: u64) {
		self.id = id;
	}
}

impl Portable for Snippet {
	const FIELDS: &'static [&'static str] = &["title", "active", "replacement", "priority"];

	fn field(&self, name: &str) -> Option<Cow<'_, str>> {
		match name {
			"title" => Some(Cow::Borrowed(&self.title)),
			"active" => Some(Cow::Owned(self.active.to_string())),
			"replacement" => Some(Cow::Borrowed(&self.replacement)),
			"priority" => Some(Cow::Owned(self.priority.to_string())),
			_ => None,
		}
	}

	fn assign_fields(&mut self, values: &[(&str, &str)]) -> Result<usize> {
		let mut title = None;
		let mut replacement = None;
		let mut priority = None;
		for &(key, text) in values {
			match key {
				"title" => title = Some(text.to_owned()),
				"replacement" => replacement = Some(text.to_owned()),
				"priority" => {
					priority = Some(text.parse::<u32>().map_err(|e| Error::invalid_value(key, e.into()))?)
				},
				_ => (),
			}
		}
		let mut assigned = 0;
		if let Some(v) = title {
			self.title = v;
			assigned += 1;
		}
		if let Some(v) = replacement {
			self.replacement = v;
			assigned += 1;
		}
		if let Some(v) = priority {
			self.priority = v;
			assigned += 1;
		}
		Ok(assigned)
	}
}
