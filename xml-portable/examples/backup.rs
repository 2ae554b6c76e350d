// use `cargo run -p xml-portable --example backup` to run from git repository base directory

use xml_portable::{
	import_document,
	sink::HttpWriter,
	storage::{
		MemoryStore,
		Store,
	},
	ExportOptions,
	Exporter,
	HostSettings,
	Portable,
};

/// a bbcode replacement as stored by a forum plugin
#[derive(Portable, Clone, Debug, Default)]
#[portable(kind = "yourcode")]
pub struct Code {
	pub id: u64,
	pub title: String,
	pub regex: String,
	pub replacement: String,
	pub parse_order: u32,
	pub active: bool,
}

fn main() -> xml_portable::Result<()> {
	let mut store = MemoryStore::new();
	let mut code = Code {
		title: "Bold Text".into(),
		regex: r"\[b\](.*?)\[/b\]".into(),
		replacement: "<strong>$1</strong>".into(),
		parse_order: 10,
		active: true,
		..Code::default()
	};
	store.save(&mut code)?;

	let settings = HostSettings::from_toml_str("charset = \"UTF-8\"\n")?;
	let exporter = Exporter::new(settings);

	eprintln!("Generating XML output...");

	// print headers and document
	let mut sink = HttpWriter::new(std::io::stdout());
	exporter.export(&code, Some(&ExportOptions::default().version("1.1")), &mut sink)?;
	println!();

	// restore into a fresh instance
	let attachment = exporter.render(&code, None)?;
	let text = String::from_utf8_lossy(&attachment.body);
	let mut restored = Code { id: code.id, ..Code::default() };
	import_document(&mut restored, &text)?;
	store.save(&mut restored)?;
	eprintln!("restored: {:?}", store.load(code.id)?);
	Ok(())
}
