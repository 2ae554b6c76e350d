use crate::{
	field::write_field,
	record::serializable_fields,
	Error,
	Portable,
	Result,
};
use quick_xml::Writer;
use std::io;

fn check_persisted<R: Portable>(record: &R) -> Result<()> {
	if !record.is_persisted() {
		return Err(Error::NotPersisted {
			kind: record.kind().into_owned(),
			id: record.id(),
		});
	}
	Ok(())
}

/// Write one line per serializable field of a stored record.
///
/// Returns the number of fields written.
pub fn write_row<R: Portable, W: io::Write>(writer: &mut Writer<W>, record: &R) -> Result<usize> {
	check_persisted(record)?;
	let id = record.id();
	let mut count = 0;
	for (name, value) in serializable_fields(record) {
		write_field(writer, name, &value, id)?;
		count += 1;
	}
	Ok(count)
}

/// Build the markup of all fields of a stored record, to be embedded in a record element.
///
/// Fails if the record wasn't stored yet (missing kind or id).
pub fn build_row<R: Portable>(record: &R) -> Result<String> {
	let mut writer = Writer::new(Vec::new());
	write_row(&mut writer, record)?;
	String::from_utf8(writer.into_inner()).map_err(|e| Error::parse(e.to_string()))
}
