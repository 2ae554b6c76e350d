use crate::Result;
use std::borrow::Cow;

/// Bookkeeping fields of stored records; these are never written to or read from documents.
pub const EXCLUDED_FIELDS: &[&str] = &["id", "valid", "data", "table_name", "active"];

/// Whether `name` is one of the [`EXCLUDED_FIELDS`].
pub fn is_excluded(name: &str) -> bool {
	EXCLUDED_FIELDS.contains(&name)
}

/// A record kept in a backing store, identified by its kind and a numeric id.
pub trait Storable {
	/// Kind of the record (the table it is stored in); used as XML tag.
	fn kind(&self) -> Cow<'_, str>;

	/// Identifier in the store; `0` if the record wasn't stored yet.
	fn id(&self) -> u64;

	/// Set identifier; used by stores when saving a record for the first time.
	fn set_id(&mut self, id: u64);

	/// A record exists in the store only if it has a kind and an identifier.
	fn is_persisted(&self) -> bool {
		self.id() != 0 && !self.kind().is_empty()
	}
}

/// A record that can be exported to and imported from a single-record XML document.
///
/// Can be derived (if `derive` feature is active).
pub trait Portable: Storable {
	/// Names of all serializable fields in declaration order.
	const FIELDS: &'static [&'static str];

	/// Text of the field with the given name, or `None` if it isn't declared.
	fn field(&self, name: &str) -> Option<Cow<'_, str>>;

	/// Whether the record declares a field with the given name.
	fn has_field(&self, name: &str) -> bool {
		Self::FIELDS.contains(&name)
	}

	/// Assign field values parsed from a document.
	///
	/// Undeclared names must be ignored. Either all values are assigned or (on error) none;
	/// returns the number of fields that were assigned.
	fn assign_fields(&mut self, values: &[(&str, &str)]) -> Result<usize>;
}

/// Iterate over the fields of a record that end up in a document
pub fn serializable_fields<R: Portable>(record: &R) -> impl Iterator<Item = (&'static str, Cow<'_, str>)> {
	R::FIELDS
		.iter()
		.copied()
		.filter(|name| !is_excluded(name))
		.filter_map(move |name| record.field(name).map(|value| (name, value)))
}
