//! Single field elements: `<{name}-{id}><![CDATA[{value}]]></{name}-{id}>`

use crate::Result;
use quick_xml::{
	events::{
		BytesCData,
		BytesEnd,
		BytesStart,
		BytesText,
		Event,
	},
	Writer,
};
use std::io;

/// Tag of a field element; the record id keeps tags unique when rows get merged.
pub fn field_key(name: &str, id: u64) -> String {
	format!("{}-{}", name, id)
}

/// Field name from a field element tag (everything before the first `-`).
///
/// The id suffix is dropped; imports always use the id of the target record.
pub fn field_name_from_key(key: &str) -> &str {
	match key.find('-') {
		Some(pos) => &key[..pos],
		None => key,
	}
}

/// Write a single indented field line.
///
/// The value is written as CDATA section as is; values containing `]]>` result in broken
/// documents.
pub fn write_field<W: io::Write>(writer: &mut Writer<W>, name: &str, value: &str, id: u64) -> Result<()> {
	let key = field_key(name, id);
	writer.write_event(Event::Text(BytesText::new("\t")))?;
	writer.write_event(Event::Start(BytesStart::new(key.as_str())))?;
	writer.write_event(Event::CData(BytesCData::new(value)))?;
	writer.write_event(Event::End(BytesEnd::new(key.as_str())))?;
	writer.write_event(Event::Text(BytesText::new("\n")))?;
	Ok(())
}

/// Serialize a single field line into a string
pub fn serialize_field(name: &str, value: &str, id: u64) -> Result<String> {
	let mut writer = Writer::new(Vec::new());
	write_field(&mut writer, name, value, id)?;
	// names and values are `str`, there is no way to end up with non-utf8 data
	String::from_utf8(writer.into_inner()).map_err(|e| crate::Error::parse(e.to_string()))
}
