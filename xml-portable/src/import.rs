use crate::{
	charset,
	export::CONTAINS_SINGLE,
	field::field_name_from_key,
	record::is_excluded,
	tree::{
		parse_document,
		Element,
	},
	Error,
	Portable,
	Result,
};

/// Find the single record element, making sure the document is a backup of one record of the
/// expected kind.
fn single_record<'e>(root: &'e Element, kind: &str) -> Result<&'e Element> {
	if root.name != kind {
		return Err(Error::KindMismatch {
			expected: kind.into(),
			found: root.name.clone(),
		});
	}
	match root.attribute("contains") {
		Some(CONTAINS_SINGLE) => (),
		Some(other) => return Err(Error::unsupported(format!("document contains {:?} records", other))),
		None => return Err(Error::unsupported("document doesn't declare its content")),
	}
	let mut records = root.elements();
	match (records.next(), records.next()) {
		(Some(record), None) => Ok(record),
		(None, _) => Err(Error::unsupported("document has no record")),
		(Some(_), Some(_)) => Err(Error::unsupported("document has more than one record")),
	}
}

/// Import field values from a single-record document into `record`.
///
/// Fields the record doesn't declare are ignored. On failure the record is left untouched;
/// otherwise returns the number of assigned fields. The record isn't saved.
pub fn import_document<R: Portable>(record: &mut R, document: &str) -> Result<usize> {
	if document.is_empty() {
		return Err(Error::EmptyInput);
	}
	let root = parse_document(document)?;
	let kind = record.kind().into_owned();
	let element = single_record(&root, &kind)?;

	let mut values = Vec::new();
	for field in element.elements() {
		let name = field_name_from_key(&field.name);
		if is_excluded(name) || !record.has_field(name) {
			log::debug!("ignoring unknown field {:?} for {} record", field.name, kind);
			continue;
		}
		values.push((name, field.text()));
	}

	let values: Vec<(&str, &str)> = values.iter().map(|(name, text)| (*name, text.as_str())).collect();
	let assigned = record.assign_fields(&values)?;
	log::debug!("imported {} fields into {} record {}", assigned, kind, record.id());
	Ok(assigned)
}

/// Same as [`import_document`] for raw file contents in any charset.
///
/// The charset is taken from a byte order mark or the XML declaration; defaults to UTF-8.
pub fn import_bytes<R: Portable>(record: &mut R, document: &[u8]) -> Result<usize> {
	if document.is_empty() {
		return Err(Error::EmptyInput);
	}
	let text = charset::decode(document)?;
	import_document(record, &text)
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::test_struct::*;

	#[test]
	fn import() {
		let mut s = Snippet::blank(99);
		assert_eq!(import_document(&mut s, Snippet::DOCUMENT_1).unwrap(), 3);
		assert_eq!(s.id, 99);
		assert_eq!(s.title, "Bold Text");
		assert_eq!(s.replacement, "<b>$1</b>");
		assert_eq!(s.priority, 10);
		assert!(!s.active, "bookkeeping fields are never imported");
	}

	#[test]
	fn rejected_documents_leave_record_alone() {
		let untouched = Snippet::blank(1);
		let multi = Snippet::DOCUMENT_1.replace("contains=\"single\"", "contains=\"multi\"");
		let missing = Snippet::DOCUMENT_1.replace(" contains=\"single\"", "");
		let other_kind = Snippet::DOCUMENT_1.replace("snippets", "themes");
		let bad_value = Snippet::DOCUMENT_1.replace("[10]", "[ten]");

		let cases: [(&str, fn(&Error) -> bool); 6] = [
			("", |e| matches!(e, Error::EmptyInput)),
			("<snippets", |e| matches!(e, Error::Parse(_) | Error::Xml(_))),
			(multi.as_str(), |e| matches!(e, Error::UnsupportedDocument(_))),
			(missing.as_str(), |e| matches!(e, Error::UnsupportedDocument(_))),
			(other_kind.as_str(), |e| matches!(e, Error::KindMismatch { .. })),
			(bad_value.as_str(), |e| matches!(e, Error::InvalidValue { .. })),
		];
		for (document, expected) in cases {
			let mut s = untouched.clone();
			let err = import_document(&mut s, document).unwrap_err();
			assert!(expected(&err), "unexpected error {:?}", err);
			assert_eq!(s, untouched);
		}
	}

	#[test]
	fn two_records() {
		let doc = "<snippets contains=\"single\"><snippets_1/><snippets_2/></snippets>";
		let mut s = Snippet::blank(1);
		assert!(matches!(import_document(&mut s, doc), Err(Error::UnsupportedDocument(_))));
	}

	#[test]
	fn unknown_fields_are_ignored() {
		let doc = Snippet::DOCUMENT_1.replace(
			"\t</snippets_7>",
			"\t<colour-7><![CDATA[red]]></colour-7>\n\t<active-7><![CDATA[true]]></active-7>\n\t</snippets_7>",
		);
		let mut s = Snippet::blank(1);
		assert_eq!(import_document(&mut s, &doc).unwrap(), 3);
		assert_eq!(s.title, "Bold Text");
		assert!(!s.active);
	}

	#[test]
	fn latin1_bytes() {
		let doc = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<snippets contains=\"single\"><snippets_7><title-7><![CDATA[Cr\xe8me]]></title-7></snippets_7></snippets>";
		let mut s = Snippet::blank(1);
		assert_eq!(import_bytes(&mut s, doc).unwrap(), 1);
		assert_eq!(s.title, "Crème");
		assert!(matches!(import_bytes(&mut s, b""), Err(Error::EmptyInput)));
	}
}
