//! Minimal element tree built from `quick-xml` events
//!
//! Only what backup documents need: elements with attributes, nested elements and text. Text and
//! CDATA are not distinguished; whitespace between elements is dropped.

use crate::{
	Error,
	Result,
};
use quick_xml::{
	events::{
		BytesStart,
		Event,
	},
	Reader,
};

/// Content of an element
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Node {
	/// Nested element
	Element(Element),
	/// Text or CDATA
	Text(String),
}

/// An element with its attributes and content in document order
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Element {
	/// Tag
	pub name: String,
	/// Attributes in document order
	pub attributes: Vec<(String, String)>,
	/// Content in document order
	pub children: Vec<Node>,
}

impl Element {
	/// Value of the first attribute with the given key
	pub fn attribute(&self, key: &str) -> Option<&str> {
		self.attributes.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
	}

	/// Nested elements
	pub fn elements(&self) -> impl Iterator<Item = &Element> {
		self.children.iter().filter_map(|node| match node {
			Node::Element(e) => Some(e),
			Node::Text(_) => None,
		})
	}

	/// All direct text content concatenated
	pub fn text(&self) -> String {
		self.children
			.iter()
			.filter_map(|node| match node {
				Node::Text(t) => Some(t.as_str()),
				Node::Element(_) => None,
			})
			.collect()
	}
}

/// Parser adaptor for `quick_xml::Reader` on in-memory documents
pub struct Parser<'a> {
	inner: Reader<&'a [u8]>,
	pending: Option<Event<'a>>,
}

impl<'a> Parser<'a> {
	/// Create a parser for the given document
	pub fn new(document: &'a str) -> Self {
		let mut inner = Reader::from_str(document);
		inner.config_mut().trim_text(true);
		Self { inner, pending: None }
	}

	fn peek(&mut self) -> Result<Event<'a>> {
		if self.pending.is_none() {
			self.pending = Some(self.inner.read_event()?);
		}
		match &self.pending {
			Some(event) => Ok(event.clone()),
			None => Err(Error::parse("no pending event")),
		}
	}

	fn clear(&mut self) {
		self.pending = None;
	}

	/// Parse the single root element of the document
	pub fn parse_document(&mut self) -> Result<Element> {
		let mut output = None;
		loop {
			match self.peek()? {
				Event::Eof => {
					return output.ok_or_else(|| Error::parse("empty document"));
				},
				Event::End(_) => return Err(Error::parse("unexpected end tag")),
				Event::Start(s) | Event::Empty(s) => {
					if output.is_some() {
						return Err(Error::parse("multiple root elements"));
					}
					output = Some(self.parse_element(&s)?);
					continue;
				},
				Event::Text(t) => {
					if !t.unescape()?.trim().is_empty() {
						return Err(Error::parse("text outside of root element"));
					}
				},
				Event::CData(_) => return Err(Error::parse("CDATA outside of root element")),
				// declaration, doctype, comments and processing instructions carry no data
				Event::Decl(_) | Event::DocType(_) | Event::Comment(_) | Event::PI(_) => (),
			}
			self.clear();
		}
	}

	/// Parse an element starting with the pending start (or empty) event
	fn parse_element(&mut self, start: &BytesStart<'_>) -> Result<Element> {
		let closed = matches!(self.pending, Some(Event::Empty(_)));
		let mut element = Element {
			name: decode(start.name().as_ref())?,
			..Element::default()
		};
		for attr in start.attributes() {
			let attr = attr.map_err(quick_xml::Error::from)?;
			let key = decode(attr.key.as_ref())?;
			let value = attr.decode_and_unescape_value(self.inner.decoder())?.into_owned();
			element.attributes.push((key, value));
		}
		self.clear(); // consume start tag

		if closed {
			return Ok(element);
		}

		loop {
			match self.peek()? {
				Event::Eof => return Err(Error::parse(format!("unclosed element {:?}", element.name))),
				Event::End(_) => {
					// quick-xml already made sure the end tag matches
					self.clear();
					return Ok(element);
				},
				Event::Start(s) | Event::Empty(s) => {
					let child = self.parse_element(&s)?;
					element.children.push(Node::Element(child));
					continue;
				},
				Event::Text(t) => {
					let text = t.unescape()?.into_owned();
					element.children.push(Node::Text(text));
				},
				Event::CData(c) => {
					let text = decode(&c.into_inner())?;
					element.children.push(Node::Text(text));
				},
				Event::Decl(_) => return Err(Error::parse("unexpected declaration")),
				Event::DocType(_) => return Err(Error::parse("unexpected doctype")),
				Event::Comment(_) | Event::PI(_) => (),
			}
			self.clear();
		}
	}
}

fn decode(bytes: &[u8]) -> Result<String> {
	std::str::from_utf8(bytes)
		.map(str::to_owned)
		.map_err(|e| Error::parse(e.to_string()))
}

/// Parse a document into its root element
pub fn parse_document(document: &str) -> Result<Element> {
	Parser::new(document).parse_document()
}
