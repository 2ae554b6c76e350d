use std::collections::HashSet;

use darling::{ast, FromDeriveInput, FromField};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{parse_quote, spanned::Spanned, Generics, Ident, Path, Type};

mod infer_type;

/// Bookkeeping fields of stored records; must match `xml_portable::EXCLUDED_FIELDS`.
const EXCLUDED_FIELDS: &[&str] = &["id", "valid", "data", "table_name", "active"];

/// A named field of the deriving struct.
pub struct Field {
	pub ident: Ident,
	pub ty: Type,
	/// Name in documents
	pub key: String,
	/// Marked with `#[portable(id)]`
	explicit_id: bool,
	skip: bool,
	is_text: bool,
	span: Span,
}

impl Field {
	/// Get the "value type" used to convert the field from and to text.
	pub fn value_type(&self, portable_crate: &Path) -> TokenStream {
		if self.is_text {
			quote!(#portable_crate::ValueString)
		} else {
			quote!(#portable_crate::ValueDefault)
		}
	}
}

impl Spanned for Field {
	fn span(&self) -> Span {
		self.span
	}
}

impl FromField for Field {
	fn from_field(field: &syn::Field) -> darling::Result<Self> {
		#[derive(FromField)]
		#[darling(attributes(portable))]
		struct RawField {
			ident: Option<Ident>,
			ty: Type,
			#[darling(default)]
			id: bool,
			#[darling(default)]
			skip: bool,
			#[darling(default)]
			string: bool,
			#[darling(default)]
			rename: Option<String>,
		}

		let RawField {
			ident,
			ty,
			id,
			skip,
			string,
			rename,
		} = RawField::from_field(field)?;

		let ident = ident.ok_or_else(|| darling::Error::custom("Only named fields supported").with_span(field))?;

		if id && (skip || string || rename.is_some()) {
			return Err(darling::Error::custom("`id` can't be combined with other options").with_span(field));
		}

		Ok(Self {
			key: rename.unwrap_or_else(|| ident.to_string()),
			is_text: string || infer_type::is_text(&ty),
			explicit_id: id,
			skip,
			ident,
			ty,
			span: field.span(),
		})
	}
}

fn default_crate_path() -> Path {
	parse_quote!(xml_portable)
}

#[derive(FromDeriveInput)]
#[darling(attributes(portable), supports(struct_named))]
pub struct PortableInput {
	pub ident: Ident,
	pub generics: Generics,
	pub data: ast::Data<(), Field>,
	/// If set, the record kind to use instead of the lowercased struct ident.
	#[darling(default)]
	kind: Option<String>,
	#[darling(rename = "crate", default = "default_crate_path")]
	pub portable_crate: Path,
}

impl PortableInput {
	/// Record kind, used as XML tag.
	pub fn kind(&self) -> String {
		match &self.kind {
			Some(kind) => kind.clone(),
			None => self.ident.to_string().to_lowercase(),
		}
	}

	fn fields(&self) -> impl Iterator<Item = &Field> {
		self.data.as_ref().take_struct().into_iter().flat_map(|fields| fields.fields)
	}

	/// The field holding the record id: marked with `#[portable(id)]` or named `id`.
	pub fn id_field(&self) -> darling::Result<&Field> {
		let mut marked = self.fields().filter(|f| f.explicit_id);
		let field = match (marked.next(), marked.next()) {
			(Some(field), None) => field,
			(Some(_), Some(second)) => {
				return Err(darling::Error::custom("only one field can be marked as `id`").with_span(second));
			},
			(None, _) => match self.fields().find(|f| f.ident == "id") {
				Some(field) => field,
				None => {
					return Err(darling::Error::custom(
						"missing id field; add a field `id: u64` or mark one with #[portable(id)]",
					)
					.with_span(&self.ident));
				},
			},
		};
		if !infer_type::is_u64(&field.ty) {
			return Err(darling::Error::custom("id field must be `u64`").with_span(&field.ty));
		}
		Ok(field)
	}

	/// Fields written to documents, in declaration order.
	pub fn data_fields(&self, id_field: &Field) -> darling::Result<Vec<&Field>> {
		let mut seen = HashSet::new();
		let mut fields = Vec::new();
		for field in self.fields() {
			if field.skip || field.ident == id_field.ident || EXCLUDED_FIELDS.contains(&field.key.as_str()) {
				continue;
			}
			if field.key.is_empty() || field.key.contains('-') {
				return Err(darling::Error::custom("field name must be non-empty and can't contain `-`").with_span(field));
			}
			if !seen.insert(field.key.as_str()) {
				return Err(darling::Error::custom(format!("duplicate field name {:?}", field.key)).with_span(field));
			}
			fields.push(field);
		}
		Ok(fields)
	}
}
