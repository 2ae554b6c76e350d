//! Export options and host configuration

use crate::Result;
use serde::Deserialize;

/// Charset used when neither the caller nor the host configuration picks one
pub const DEFAULT_CHARSET: &str = "UTF-8";
/// Document format version
pub const DEFAULT_VERSION: &str = "1.0";
/// Namespace of exported documents
pub const DEFAULT_WEBSITE: &str = "http://www.rantcentralforums.com";

/// Settings of the installation running the export.
///
/// Passed to the exporter explicitly; can be loaded from TOML (other keys are ignored):
///
/// ```toml
/// charset = "ISO-8859-1"
/// website = "https://forum.example.org"
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(default)]
pub struct HostSettings {
	/// Preferred charset of the installation; replaces the built-in default.
	pub charset: Option<String>,
	/// Namespace to use instead of the built-in default.
	pub website: Option<String>,
}

impl HostSettings {
	/// Load settings from TOML text
	pub fn from_toml_str(text: &str) -> Result<Self> {
		Ok(toml::from_str(text)?)
	}

	/// Set preferred charset
	pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
		self.charset = Some(charset.into());
		self
	}
}

/// Options of a single export.
///
/// Options which are missing or empty fall back to their defaults.
#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
	/// Encoding of the document
	pub charset: Option<String>,
	/// Version attribute of the root element
	pub version: Option<String>,
	/// Namespace of the root element
	pub website: Option<String>,
	/// Suggested file name
	pub filename: Option<String>,
}

impl ExportOptions {
	/// Build options from a key/value mapping; unknown keys are ignored.
	pub fn from_pairs<'a, I>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (&'a str, &'a str)>,
	{
		let mut options = Self::default();
		for (key, value) in pairs {
			let slot = match key {
				"charset" => &mut options.charset,
				"version" => &mut options.version,
				"website" => &mut options.website,
				"filename" => &mut options.filename,
				_ => {
					log::debug!("ignoring unknown export option {:?}", key);
					continue;
				},
			};
			*slot = Some(value.to_owned());
		}
		options
	}

	/// Set charset
	pub fn charset(mut self, charset: impl Into<String>) -> Self {
		self.charset = Some(charset.into());
		self
	}

	/// Set version
	pub fn version(mut self, version: impl Into<String>) -> Self {
		self.version = Some(version.into());
		self
	}

	/// Set website (namespace)
	pub fn website(mut self, website: impl Into<String>) -> Self {
		self.website = Some(website.into());
		self
	}

	/// Set file name
	pub fn filename(mut self, filename: impl Into<String>) -> Self {
		self.filename = Some(filename.into());
		self
	}
}

/// Options with all defaults applied
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ResolvedOptions {
	/// Encoding of the document
	pub charset: String,
	/// Version attribute of the root element
	pub version: String,
	/// Namespace of the root element
	pub website: String,
	/// Suggested file name
	pub filename: String,
}

fn given(value: &Option<String>) -> Option<&str> {
	value.as_deref().filter(|v| !v.is_empty())
}

impl ResolvedOptions {
	/// Apply defaults to missing or empty options.
	///
	/// The default file name is only computed when needed.
	pub fn resolve(
		options: Option<&ExportOptions>,
		settings: &HostSettings,
		default_filename: impl FnOnce() -> String,
	) -> Self {
		let empty = ExportOptions::default();
		let options = options.unwrap_or(&empty);
		let pick = |option: &Option<String>, host: &Option<String>, default: &str| {
			given(option)
				.or_else(|| given(host))
				.unwrap_or(default)
				.to_owned()
		};
		Self {
			charset: pick(&options.charset, &settings.charset, DEFAULT_CHARSET),
			version: pick(&options.version, &None, DEFAULT_VERSION),
			website: pick(&options.website, &settings.website, DEFAULT_WEBSITE),
			filename: match given(&options.filename) {
				Some(filename) => filename.to_owned(),
				None => default_filename(),
			},
		}
	}
}
