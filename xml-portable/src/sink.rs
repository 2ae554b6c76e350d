//! Delivering exported documents

use crate::{
	Error,
	Result,
};
use std::io;

/// Content type of exported documents
pub const CONTENT_TYPE: &str = "application/xml";

/// Make sure a file name can be put into a header line.
pub fn check_filename(filename: &str) -> Result<()> {
	if filename.chars().any(char::is_control) {
		return Err(Error::InvalidFilename(filename.into()));
	}
	Ok(())
}

/// An exported document ready to be offered for download
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Attachment {
	/// Suggested file name
	pub filename: String,
	/// Content type (always `application/xml`)
	pub content_type: &'static str,
	/// Encoded document
	pub body: Vec<u8>,
}

impl Attachment {
	/// Size of the body in bytes
	pub fn content_length(&self) -> usize {
		self.body.len()
	}

	/// Headers to send with the body: save dialog, type, length and no caching.
	pub fn headers(&self) -> Vec<(&'static str, String)> {
		vec![
			(
				"Content-Disposition",
				format!("attachment; filename=\"{}\"", self.filename.replace('\\', "\\\\").replace('"', "\\\"")),
			),
			("Content-Type", self.content_type.to_owned()),
			("Content-Length", self.content_length().to_string()),
			("Pragma", "no-cache".to_owned()),
			("Expires", "0".to_owned()),
		]
	}
}

/// Receives exported documents; implemented by whatever transports them to the user.
pub trait AttachmentSink {
	/// Take over a finished document
	fn deliver(&mut self, attachment: Attachment) -> Result<()>;
}

/// Simply collect the documents
impl AttachmentSink for Vec<Attachment> {
	fn deliver(&mut self, attachment: Attachment) -> Result<()> {
		self.push(attachment);
		Ok(())
	}
}

/// Writes header lines followed by an empty line and the body, like an HTTP response.
pub struct HttpWriter<W: io::Write> {
	inner: W,
}

impl<W: io::Write> HttpWriter<W> {
	/// Wrap a writer
	pub fn new(inner: W) -> Self {
		Self { inner }
	}

	/// Unwrap the writer
	pub fn into_inner(self) -> W {
		self.inner
	}
}

impl<W: io::Write> AttachmentSink for HttpWriter<W> {
	fn deliver(&mut self, attachment: Attachment) -> Result<()> {
		check_filename(&attachment.filename)?;
		for (name, value) in attachment.headers() {
			write!(self.inner, "{}: {}\r\n", name, value)?;
		}
		self.inner.write_all(b"\r\n")?;
		self.inner.write_all(&attachment.body)?;
		self.inner.flush()?;
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn attachment() -> Attachment {
		Attachment {
			filename: "snippets_bold-backup.xml".into(),
			content_type: CONTENT_TYPE,
			body: b"<x/>".to_vec(),
		}
	}

	#[test]
	fn http() {
		let mut sink = HttpWriter::new(Vec::new());
		sink.deliver(attachment()).unwrap();
		assert_eq!(
			String::from_utf8(sink.into_inner()).unwrap(),
			"Content-Disposition: attachment; filename=\"snippets_bold-backup.xml\"\r\n\
			 Content-Type: application/xml\r\n\
			 Content-Length: 4\r\n\
			 Pragma: no-cache\r\n\
			 Expires: 0\r\n\
			 \r\n\
			 <x/>",
		);
	}

	#[test]
	fn quoted_filename() {
		let attachment = Attachment {
			filename: "my \"best\" code.xml".into(),
			..attachment()
		};
		assert_eq!(
			attachment.headers()[0].1,
			"attachment; filename=\"my \\\"best\\\" code.xml\"",
		);
	}

	#[test]
	fn header_injection() {
		let mut sink = HttpWriter::new(Vec::new());
		let attachment = Attachment {
			filename: "a.xml\r\nSet-Cookie: session=evil".into(),
			..attachment()
		};
		assert!(matches!(sink.deliver(attachment), Err(Error::InvalidFilename(_))));
		assert!(sink.into_inner().is_empty());
	}
}
