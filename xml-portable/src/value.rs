use crate::errors::BoxError;
use std::borrow::Cow;

/// Trait to convert field values to and from element text
///
/// This is implemented by "marker" types to decide how to convert a type (the same type can be
/// converted differently depending on the marker type)
pub trait Value<T> {
	/// Convert value to text
	fn to_text(data: &T) -> Cow<'_, str>;

	/// Parse value from text
	fn from_text(text: &str) -> Result<T, BoxError>;
}

/// Implements `Value` for all types implementing `Display` and `FromStr`; this is a good default.
pub struct ValueDefault;

impl<T> Value<T> for ValueDefault
where
	T: std::fmt::Display + std::str::FromStr,
	T::Err: std::error::Error + Send + Sync + 'static,
{
	fn to_text(data: &T) -> Cow<'_, str> {
		Cow::Owned(data.to_string())
	}

	fn from_text(text: &str) -> Result<T, BoxError> {
		Ok(text.parse::<T>()?)
	}
}

/// Implements `Value` for `String` and `Cow<str>`; text is taken over as is.
pub struct ValueString;

impl Value<String> for ValueString {
	fn to_text(data: &String) -> Cow<'_, str> {
		Cow::Borrowed(data.as_str())
	}

	fn from_text(text: &str) -> Result<String, BoxError> {
		Ok(text.to_owned())
	}
}

impl<'a> Value<Cow<'a, str>> for ValueString {
	fn to_text<'b>(data: &'b Cow<'a, str>) -> Cow<'b, str> {
		Cow::Borrowed(data.as_ref())
	}

	fn from_text(text: &str) -> Result<Cow<'a, str>, BoxError> {
		Ok(Cow::Owned(text.to_owned()))
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn default_uses_display_and_from_str() {
		assert_eq!(<ValueDefault as Value<u32>>::to_text(&42), "42");
		assert_eq!(<ValueDefault as Value<u32>>::from_text("7").unwrap(), 7);
		assert!(<ValueDefault as Value<u32>>::from_text("seven").is_err());
		assert_eq!(<ValueDefault as Value<bool>>::from_text("true").unwrap(), true);
	}

	#[test]
	fn string_is_raw() {
		let s = String::from("  <b>bold</b> & more ");
		assert_eq!(<ValueString as Value<String>>::to_text(&s), s.as_str());
		assert_eq!(<ValueString as Value<String>>::from_text(&s).unwrap(), s);
	}

	#[test]
	fn borrowed_cow_is_raw() {
		let s: Cow<'static, str> = Cow::Borrowed(" a & b ");
		let text = <ValueString as Value<Cow<'static, str>>>::to_text(&s);
		assert!(matches!(text, Cow::Borrowed(" a & b ")));
		assert_eq!(<ValueString as Value<Cow<'static, str>>>::from_text("x").unwrap(), "x");
	}
}
