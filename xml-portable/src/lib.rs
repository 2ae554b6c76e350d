#![cfg_attr(doc_cfg, feature(doc_cfg))]
#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/xml-portable/0.1.0")]
//! This library exports stored records as small self-describing XML documents and imports such
//! documents back into records, e.g. to back up a record or move it to another installation.
//!
//! A document always contains exactly one record:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <snippets version="1.0" xmlns="http://www.rantcentralforums.com" contains="single">
//! <snippets_7>
//! 	<title-7><![CDATA[Bold Text]]></title-7>
//! 	<replacement-7><![CDATA[<b>$1</b>]]></replacement-7>
//! 	</snippets_7>
//! </snippets>
//! ```
//!
//! Records implement [`Storable`] (kind and id in the backing store) and [`Portable`] (the list
//! of fields that are written to documents). Bookkeeping fields ([`EXCLUDED_FIELDS`]) are never
//! exported or imported.
//!
//! If the `derive` feature is enabled both traits can be derived with `#[derive(Portable)]`:
//!
//! ```
//! use xml_portable::{import_document, Exporter, Portable};
//!
//! #[derive(Portable, Default)]
//! #[portable(kind = "widgets")]
//! struct Widget {
//! 	id: u64,
//! 	name: String,
//! 	count: u32,
//! }
//!
//! let widget = Widget { id: 3, name: "Foo Bar!".into(), count: 3 };
//! let attachment = Exporter::default().render(&widget, None).unwrap();
//! assert_eq!(attachment.filename, "widgets_foo_bar-backup.xml");
//!
//! let mut copy = Widget { id: 3, ..Widget::default() };
//! let text = String::from_utf8(attachment.body).unwrap();
//! import_document(&mut copy, &text).unwrap();
//! assert_eq!(copy.name, "Foo Bar!");
//! assert_eq!(copy.count, 3);
//! ```
//!
//! Exporting hands the finished document to an [`AttachmentSink`]; importing only assigns fields,
//! saving the record is up to the caller (see [`storage`]).

pub mod charset;
pub mod errors;
pub mod export;
pub mod field;
pub mod identifier;
pub mod import;
pub mod options;
mod record;
pub mod row;
pub mod sink;
pub mod storage;
pub mod tree;
mod value;

#[cfg(test)]
mod test_struct;

/// Re-export `quick-xml` crate
pub use quick_xml;

pub use self::{
	errors::{
		Error,
		Result,
	},
	export::Exporter,
	field::{
		field_name_from_key,
		serialize_field,
	},
	identifier::clean_identifier,
	import::{
		import_bytes,
		import_document,
	},
	options::{
		ExportOptions,
		HostSettings,
	},
	record::{
		is_excluded,
		serializable_fields,
		Portable,
		Storable,
		EXCLUDED_FIELDS,
	},
	row::build_row,
	sink::{
		Attachment,
		AttachmentSink,
	},
	value::{
		Value,
		ValueDefault,
		ValueString,
	},
};

#[cfg_attr(doc_cfg, doc(cfg(feature = "derive")))]
#[cfg(feature = "derive")]
pub use xml_portable_derive::Portable;
