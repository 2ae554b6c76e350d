//! Derive `xml-portable` trait implementations
//!
//! Deriving `Portable` implements both `Storable` and `Portable`, and supports the following
//! attributes on the struct:
//! - `#[portable(kind = "...")]`: Record kind (XML tag); defaults to the lowercased struct name
//! - `#[portable(crate = "...")]`: Name of `xml-portable` crate in local scope; defaults to
//!   `xml_portable`
//!
//! And the following attributes on struct fields:
//! - `#[portable(id)]`: Field holding the record id (must be `u64`); defaults to the field named
//!   `id`
//! - `#[portable(skip)]`: Don't export or import the field
//! - `#[portable(rename = "...")]`: Name of the field in documents
//! - `#[portable(string)]`: Take text over as is (using `ValueString` instead of `ValueDefault`);
//!   inferred for `String` and `Cow<str>`
//!
//! Fields named like the bookkeeping fields of stored records (`id`, `valid`, `data`,
//! `table_name`, `active`) are never exported or imported.
//!
#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/xml-portable-derive/0.1.0")]

extern crate proc_macro;

mod expand;
mod input;

use darling::FromDeriveInput;
use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

use crate::input::PortableInput;

/// Derive `xml-portable::{Storable,Portable}`
#[proc_macro_derive(Portable, attributes(portable))]
pub fn derive_portable(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);

	TokenStream::from(
		match PortableInput::from_derive_input(&input).and_then(|input| expand::derive_portable(&input)) {
			Ok(output) => output,
			Err(e) => e.write_errors(),
		},
	)
}
