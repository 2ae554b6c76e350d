//! Converting documents between text and bytes in their declared charset

use crate::{
	Error,
	Result,
};
use encoding_rs::{
	Encoding,
	UTF_8,
};
use quick_xml::{
	events::Event,
	Reader,
};
use std::borrow::Cow;

/// Look up an encoding by charset label (e.g. `UTF-8`, `ISO-8859-1`).
pub fn lookup(charset: &str) -> Option<&'static Encoding> {
	Encoding::for_label(charset.trim().as_bytes())
}

/// Encoding to write documents in for the given charset label.
///
/// Unknown labels and encodings `encoding_rs` can only decode (like UTF-16) give UTF-8.
pub fn output_encoding(charset: &str) -> &'static Encoding {
	match lookup(charset) {
		Some(encoding) => {
			let output = encoding.output_encoding();
			if output != encoding {
				log::warn!("can't write {}, writing {} instead", encoding.name(), output.name());
			}
			output
		},
		None => {
			log::warn!("unknown charset {:?}, writing UTF-8", charset);
			UTF_8
		},
	}
}

/// Encode document text; `None` if it contains characters `encoding` can't represent.
pub fn encode<'a>(text: &'a str, encoding: &'static Encoding) -> Option<Cow<'a, [u8]>> {
	let (bytes, _, unmappable) = encoding.output_encoding().encode(text);
	if unmappable {
		None
	} else {
		Some(bytes)
	}
}

/// Find the encoding declared in a document, if any.
fn declared_encoding(bytes: &[u8]) -> Result<Option<&'static Encoding>> {
	let mut reader = Reader::from_reader(bytes);
	let mut buf = Vec::new();
	loop {
		match reader.read_event_into(&mut buf)? {
			Event::Decl(decl) => {
				return Ok(match decl.encoding() {
					Some(label) => Encoding::for_label(&label.map_err(quick_xml::Error::from)?),
					None => None,
				})
			},
			// the declaration must come first
			Event::Text(t) if t.iter().all(u8::is_ascii_whitespace) => (),
			_ => return Ok(None),
		}
		buf.clear();
	}
}

/// Decode a document using its byte order mark or declared encoding (default UTF-8).
pub fn decode(bytes: &[u8]) -> Result<Cow<'_, str>> {
	let encoding = match Encoding::for_bom(bytes) {
		Some((encoding, _)) => encoding,
		None => declared_encoding(bytes)?.unwrap_or(UTF_8),
	};
	let (text, malformed) = encoding.decode_with_bom_removal(bytes);
	if malformed {
		return Err(Error::parse(format!("document is not valid {}", encoding.name())));
	}
	Ok(text)
}
