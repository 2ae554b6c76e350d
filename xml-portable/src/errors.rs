#![allow(missing_docs)] // variant fields are self-explanatory
//! Errors returned by export, import and storage operations

use thiserror::Error;

/// Boxed error produced by value conversions
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All the ways exporting, importing or storing a record can fail.
///
/// None of these are fatal for the host application; callers decide whether to show a message.
#[derive(Debug, Error)]
pub enum Error {
	/// Record has no kind or no identifier, so it doesn't exist in the store yet.
	#[error("record {kind:?} with id {id} is not persisted")]
	NotPersisted { kind: String, id: u64 },

	/// Record doesn't declare a single serializable field.
	#[error("record {kind:?} has no serializable fields")]
	EmptyRow { kind: String },

	/// Import was called without any input.
	#[error("empty import document")]
	EmptyInput,

	/// Input isn't a well-formed document with a single root element.
	#[error("invalid document: {0}")]
	Parse(String),

	/// Error reported by `quick-xml` while reading or writing.
	#[error("XML error: {0}")]
	Xml(#[from] quick_xml::Error),

	/// I/O error while writing a document.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// Document root is named after a different record kind.
	#[error("document contains {found:?} records, expected {expected:?}")]
	KindMismatch { expected: String, found: String },

	/// Document isn't a single-record backup.
	#[error("unsupported document: {0}")]
	UnsupportedDocument(String),

	/// Text of a field couldn't be converted to the field type.
	#[error("invalid value for field {field:?}: {source}")]
	InvalidValue {
		field: String,
		#[source]
		source: BoxError,
	},

	/// File name can't be sent in a header.
	#[error("invalid file name {0:?}")]
	InvalidFilename(String),

	/// Record can't be stored without a kind.
	#[error("record has no kind")]
	MissingKind,

	/// Host configuration couldn't be loaded.
	#[error("invalid configuration: {0}")]
	Config(#[from] toml::de::Error),
}

impl Error {
	pub(crate) fn parse(msg: impl Into<String>) -> Self {
		Self::Parse(msg.into())
	}

	pub(crate) fn unsupported(msg: impl Into<String>) -> Self {
		Self::UnsupportedDocument(msg.into())
	}

	/// Wrap a conversion failure for `field`
	pub fn invalid_value(field: &str, source: BoxError) -> Self {
		Self::InvalidValue {
			field: field.into(),
			source,
		}
	}
}

/// Result alias with our error type included
pub type Result<T> = std::result::Result<T, Error>;
