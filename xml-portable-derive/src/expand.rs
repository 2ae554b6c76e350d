use proc_macro2::TokenStream;
use quote::{format_ident, quote, quote_spanned, ToTokens, TokenStreamExt};
use syn::{spanned::Spanned, Ident, Path};

use crate::input::{Field, PortableInput};

/// Match arm returning the text of a field
struct FieldGetter<'a> {
	data: &'a Field,
	portable_crate: &'a Path,
}

impl ToTokens for FieldGetter<'_> {
	fn to_tokens(&self, tokens: &mut TokenStream) {
		let Self { data, portable_crate } = self;
		let Field { ident, ty, key, .. } = data;
		let value_t = data.value_type(portable_crate);

		tokens.append_all(quote_spanned! {data.span()=>
			#key => ::std::option::Option::Some(<#value_t as #portable_crate::Value<#ty>>::to_text(&self.#ident)),
		});
	}
}

/// Match arm parsing text into the staging variable of a field
struct FieldParser<'a> {
	data: &'a Field,
	staged: Ident,
	portable_crate: &'a Path,
}

impl ToTokens for FieldParser<'_> {
	fn to_tokens(&self, tokens: &mut TokenStream) {
		let Self {
			data,
			staged,
			portable_crate,
		} = self;
		let Field { ty, key, .. } = data;
		let value_t = data.value_type(portable_crate);

		tokens.append_all(quote_spanned! {data.span()=>
			#key => {
				#staged = ::std::option::Option::Some(
					<#value_t as #portable_crate::Value<#ty>>::from_text(text)
						.map_err(|source| #portable_crate::Error::invalid_value(#key, source))?,
				);
			},
		});
	}
}

pub fn derive_portable(input: &PortableInput) -> darling::Result<TokenStream> {
	let id_field = input.id_field()?;
	let fields = input.data_fields(id_field)?;

	let PortableInput {
		ident,
		generics,
		portable_crate,
		..
	} = input;
	let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
	let kind = input.kind();
	let id = &id_field.ident;
	let id_ty = &id_field.ty;

	let keys = fields.iter().map(|f| &f.key);
	let staged = (0..fields.len()).map(|i| format_ident!("staged_{}", i)).collect::<Vec<_>>();
	let getters = fields
		.iter()
		.map(|&data| FieldGetter { data, portable_crate })
		.collect::<Vec<_>>();
	let parsers = fields
		.iter()
		.zip(&staged)
		.map(|(&data, staged)| FieldParser {
			data,
			staged: staged.clone(),
			portable_crate,
		})
		.collect::<Vec<_>>();
	let staged_decls = fields.iter().zip(&staged).map(|(field, staged)| {
		let ty = &field.ty;
		quote_spanned! {field.span()=>
			let mut #staged: ::std::option::Option<#ty> = ::std::option::Option::None;
		}
	});
	let assigns = fields.iter().zip(&staged).map(|(field, staged)| {
		let ident = &field.ident;
		quote! {
			if let ::std::option::Option::Some(value) = #staged {
				self.#ident = value;
				assigned += 1;
			}
		}
	});
	let id_getter = quote_spanned! {id_ty.span()=>
		fn id(&self) -> u64 {
			self.#id
		}

		fn set_id(&mut self, id: u64) {
			self.#id = id;
		}
	};

	Ok(quote! {
		impl #impl_generics #portable_crate::Storable for #ident #ty_generics #where_clause {
			fn kind(&self) -> ::std::borrow::Cow<'_, str> {
				::std::borrow::Cow::Borrowed(#kind)
			}

			#id_getter
		}

		impl #impl_generics #portable_crate::Portable for #ident #ty_generics #where_clause {
			const FIELDS: &'static [&'static str] = &[#(#keys),*];

			fn field(&self, name: &str) -> ::std::option::Option<::std::borrow::Cow<'_, str>> {
				match name {
					#(#getters)*
					_ => ::std::option::Option::None,
				}
			}

			#[allow(unused_mut, unused_variables)]
			fn assign_fields(&mut self, values: &[(&str, &str)]) -> #portable_crate::Result<usize> {
				#(#staged_decls)*
				for &(key, text) in values {
					match key {
						#(#parsers)*
						_ => (),
					}
				}
				let mut assigned = 0;
				#(#assigns)*
				::std::result::Result::Ok(assigned)
			}
		}
	})
}
