use crate::{
	charset,
	identifier::clean_identifier,
	options::{
		ExportOptions,
		HostSettings,
		ResolvedOptions,
	},
	row::build_row,
	sink::{
		Attachment,
		AttachmentSink,
		check_filename,
		CONTENT_TYPE,
	},
	Error,
	Portable,
	Result,
};
use encoding_rs::UTF_8;
use quick_xml::{
	events::{
		BytesDecl,
		BytesEnd,
		BytesStart,
		BytesText,
		Event,
	},
	Writer,
};

/// Value of the `contains` attribute marking a single-record document
pub const CONTAINS_SINGLE: &str = "single";

/// Tag of the element wrapping the fields of a record
pub fn record_tag(kind: &str, id: u64) -> String {
	format!("{}_{}", kind, id)
}

/// Default file name: `{kind}_{clean identifier}-backup.xml`
pub fn default_filename<R: Portable>(record: &R) -> String {
	format!("{}_{}-backup.xml", record.kind(), clean_identifier(record))
}

/// Exports stored records as single-record XML documents.
#[derive(Clone, Debug, Default)]
pub struct Exporter {
	settings: HostSettings,
}

impl Exporter {
	/// Exporter for an installation with the given settings
	pub fn new(settings: HostSettings) -> Self {
		Self { settings }
	}

	/// Settings passed on creation
	pub fn settings(&self) -> &HostSettings {
		&self.settings
	}

	/// Apply defaults for the given record to the options.
	///
	/// The charset is replaced by the name of the encoding documents are actually written in.
	pub fn resolve_options<R: Portable>(&self, record: &R, options: Option<&ExportOptions>) -> ResolvedOptions {
		let mut resolved = ResolvedOptions::resolve(options, &self.settings, || default_filename(record));
		resolved.charset = charset::output_encoding(&resolved.charset).name().to_owned();
		resolved
	}

	/// Build the document text
	pub fn render_text<R: Portable>(&self, record: &R, options: &ResolvedOptions) -> Result<String> {
		let row = build_row(record)?;
		let kind = record.kind();
		if row.is_empty() {
			return Err(Error::EmptyRow { kind: kind.into_owned() });
		}
		let record_tag = record_tag(&kind, record.id());

		let mut writer = Writer::new(Vec::new());
		writer.write_event(Event::Decl(BytesDecl::new("1.0", Some(options.charset.as_str()), None)))?;
		writer.write_event(Event::Text(BytesText::new("\n")))?;
		let mut root = BytesStart::new(&*kind);
		root.push_attribute(("version", options.version.as_str()));
		root.push_attribute(("xmlns", options.website.as_str()));
		root.push_attribute(("contains", CONTAINS_SINGLE));
		writer.write_event(Event::Start(root))?;
		writer.write_event(Event::Text(BytesText::new("\n")))?;
		writer.write_event(Event::Start(BytesStart::new(record_tag.as_str())))?;
		writer.write_event(Event::Text(BytesText::new("\n")))?;
		// row is already markup
		writer.write_event(Event::Text(BytesText::from_escaped(row)))?;
		writer.write_event(Event::Text(BytesText::new("\t")))?;
		writer.write_event(Event::End(BytesEnd::new(record_tag.as_str())))?;
		writer.write_event(Event::Text(BytesText::new("\n")))?;
		writer.write_event(Event::End(BytesEnd::new(&*kind)))?;

		String::from_utf8(writer.into_inner()).map_err(|e| Error::parse(e.to_string()))
	}

	/// Build the document and its metadata.
	///
	/// Fails if the record isn't stored yet, has no fields to export or the file name contains
	/// control characters. Documents the resolved charset can't represent are written as UTF-8.
	pub fn render<R: Portable>(&self, record: &R, options: Option<&ExportOptions>) -> Result<Attachment> {
		let mut options = self.resolve_options(record, options);
		check_filename(&options.filename)?;
		let text = self.render_text(record, &options)?;
		let body = match charset::encode(&text, charset::output_encoding(&options.charset)) {
			Some(body) => body.into_owned(),
			None => {
				log::warn!(
					"{} record {} can't be written in {}, writing UTF-8",
					record.kind(),
					record.id(),
					options.charset,
				);
				options.charset = UTF_8.name().to_owned();
				self.render_text(record, &options)?.into_bytes()
			},
		};
		log::debug!(
			"exported {} record {} as {:?} ({} bytes)",
			record.kind(),
			record.id(),
			options.filename,
			body.len(),
		);
		Ok(Attachment {
			filename: options.filename,
			content_type: CONTENT_TYPE,
			body,
		})
	}

	/// Build the document and hand it to the sink; nothing is delivered on failure.
	pub fn export<R, S>(&self, record: &R, options: Option<&ExportOptions>, sink: &mut S) -> Result<()>
	where
		R: Portable,
		S: AttachmentSink + ?Sized,
	{
		let attachment = self.render(record, options)?;
		sink.deliver(attachment)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		import_bytes,
		test_struct::*,
	};

	#[test]
	fn document() {
		let exporter = Exporter::default();
		let attachment = exporter.render(&Snippet::stored(7), None).unwrap();
		assert_eq!(attachment.filename, "snippets_bold_text-backup.xml");
		assert_eq!(attachment.content_type, "application/xml");
		assert_eq!(String::from_utf8(attachment.body).unwrap(), Snippet::DOCUMENT_1);
	}

	#[test]
	fn options_and_host_charset() {
		let exporter = Exporter::new(HostSettings::default().with_charset("ISO-8859-1"));
		let mut record = Snippet::stored(7);
		record.title = "Crème".into();
		let options = ExportOptions::default().version("").website("https://example.org").filename("x.xml");
		let attachment = exporter.render(&record, Some(&options)).unwrap();
		assert_eq!(attachment.filename, "x.xml");
		let text = String::from_utf8_lossy(&attachment.body);
		assert!(text.starts_with(
			"<?xml version=\"1.0\" encoding=\"windows-1252\"?>\n<snippets version=\"1.0\" xmlns=\"https://example.org\" contains=\"single\">\n"
		));
		assert!(attachment.body.windows(5).any(|w| w == b"Cr\xe8me"));
	}

	#[test]
	fn nothing_delivered_on_failure() {
		let mut sink: Vec<Attachment> = Vec::new();
		let exporter = Exporter::default();
		assert!(matches!(
			exporter.export(&Snippet::stored(0), None, &mut sink),
			Err(Error::NotPersisted { .. })
		));
		assert!(sink.is_empty());

		exporter.export(&Snippet::stored(7), None, &mut sink).unwrap();
		assert_eq!(sink.len(), 1);
		assert_eq!(sink[0].content_length(), Snippet::DOCUMENT_1.len());
	}

	fn restored(attachment: &Attachment) -> Snippet {
		let mut record = Snippet::blank(7);
		import_bytes(&mut record, &attachment.body).unwrap();
		record
	}

	#[test]
	fn unrepresentable_text_is_written_as_utf8() {
		let exporter = Exporter::new(HostSettings::default().with_charset("ISO-8859-1"));
		let mut record = Snippet::stored(7);
		record.title = "日本 €".into();
		let attachment = exporter.render(&record, None).unwrap();
		assert!(attachment.body.starts_with(b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
		assert_eq!(restored(&attachment).title, "日本 €");

		// still fine in the host charset
		record.title = "Crème €".into();
		let attachment = exporter.render(&record, None).unwrap();
		assert!(attachment.body.starts_with(b"<?xml version=\"1.0\" encoding=\"windows-1252\"?>"));
		assert_eq!(restored(&attachment).title, "Crème €");
	}

	#[test]
	fn decode_only_charset_declares_utf8() {
		let exporter = Exporter::new(HostSettings::default().with_charset("UTF-16"));
		let attachment = exporter.render(&Snippet::stored(7), None).unwrap();
		assert_eq!(String::from_utf8(attachment.body.clone()).unwrap(), Snippet::DOCUMENT_1);
		assert_eq!(restored(&attachment).title, "Bold Text");
	}

	#[test]
	fn control_characters_in_filename() {
		let mut sink: Vec<Attachment> = Vec::new();
		let options = ExportOptions::default().filename("a.xml\r\nSet-Cookie: session=evil");
		let err = Exporter::default().export(&Snippet::stored(7), Some(&options), &mut sink).unwrap_err();
		assert!(matches!(err, Error::InvalidFilename(_)));
		assert!(sink.is_empty());
	}
}
