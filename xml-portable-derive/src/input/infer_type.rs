use syn::{GenericArgument, PathArguments, PathSegment, Type};

/// Infer whether a type is text that can be taken over as is (`String`, `Cow<str>`).
pub fn is_text(ty: &Type) -> bool {
	if let Some(last) = selfless_last(ty) {
		if last.ident == "String" {
			return true;
		}

		if last.ident == "Cow" {
			if let PathArguments::AngleBracketed(args) = &last.arguments {
				if args.args.len() != 2 {
					return false;
				}

				return match args.args.iter().nth(1) {
					Some(GenericArgument::Type(gat)) => is_str(gat) || is_text(gat),
					Some(_) | None => false,
				};
			}
		}
	}

	false
}

fn is_str(ty: &Type) -> bool {
	match selfless_last(ty) {
		Some(last) => last.ident == "str",
		None => false,
	}
}

/// Infer whether a type appears to be `u64`.
pub fn is_u64(ty: &Type) -> bool {
	match selfless_last(ty) {
		Some(last) => last.ident == "u64" && last.arguments.is_empty(),
		None => false,
	}
}

fn selfless_last(ty: &Type) -> Option<&PathSegment> {
	if let Type::Path(ty) = ty {
		if ty.qself.is_none() {
			return ty.path.segments.last();
		}
	}

	None
}
