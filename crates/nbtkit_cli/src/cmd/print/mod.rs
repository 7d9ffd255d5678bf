use std::fmt;
use std::path::PathBuf;

use nbtkit::nbt::{NbtFile, Result, Tag, Value};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	#[arg(long = "max-items")]
	pub max_items: Option<usize>,
	/// Start from the one-screen preset; explicit limits still apply.
	#[arg(long)]
	pub compact: bool,
}

/// Print a tag tree, truncating long containers and deep nesting.
pub fn run(args: Args) -> Result<()> {
	let options = options_for(&args);
	let file = NbtFile::open(&args.path)?;
	print!("{}", render_tag(&file.root, options));
	Ok(())
}

fn options_for(args: &Args) -> PrintOptions {
	let base = if args.compact { PrintOptions::compact() } else { PrintOptions::default() };
	PrintOptions {
		max_depth: args.max_depth.unwrap_or(base.max_depth),
		max_items: args.max_items.unwrap_or(base.max_items),
		..base
	}
}

/// Output truncation limits for printed tag trees.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum children printed for a single list or compound.
	pub max_items: usize,
	/// Maximum container depth expanded below the root.
	pub max_depth: u32,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum array elements previewed inline.
	pub max_array_preview: usize,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_items: 32,
			max_depth: 16,
			max_string_len: 200,
			max_array_preview: 8,
		}
	}
}

impl PrintOptions {
	/// Preset for a one-screen overview.
	pub fn compact() -> Self {
		Self {
			max_items: 8,
			max_depth: 3,
			max_string_len: 60,
			max_array_preview: 4,
		}
	}
}

/// Render one tag tree as indented `TAG_*` lines.
pub fn render_tag(tag: &Tag, options: PrintOptions) -> String {
	TreeView { tag, options }.to_string()
}

struct TreeView<'a> {
	tag: &'a Tag,
	options: PrintOptions,
}

impl fmt::Display for TreeView<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write_tag(f, self.tag, 0, self.options)
	}
}

fn write_tag<W: fmt::Write>(out: &mut W, tag: &Tag, depth: u32, options: PrintOptions) -> fmt::Result {
	let pad = "  ".repeat(depth as usize);
	let label = match &tag.name {
		Some(name) => format!("{}('{}')", tag.kind(), truncate(&name.to_string_lossy(), options.max_string_len)),
		None => format!("{}(None)", tag.kind()),
	};

	match &tag.value {
		Value::Byte(v) => writeln!(out, "{pad}{label}: {v}"),
		Value::Short(v) => writeln!(out, "{pad}{label}: {v}"),
		Value::Int(v) => writeln!(out, "{pad}{label}: {v}"),
		Value::Long(v) => writeln!(out, "{pad}{label}: {v}"),
		Value::Float(v) => writeln!(out, "{pad}{label}: {v}"),
		Value::Double(v) => writeln!(out, "{pad}{label}: {v}"),
		Value::String(v) => writeln!(out, "{pad}{label}: '{}'", truncate(&v.to_string_lossy(), options.max_string_len)),
		Value::ByteArray(v) => writeln!(out, "{pad}{label}: [{} bytes]{}", v.len(), preview(v, options.max_array_preview)),
		Value::IntArray(v) => writeln!(out, "{pad}{label}: [{} ints]{}", v.len(), preview(v, options.max_array_preview)),
		Value::LongArray(v) => writeln!(out, "{pad}{label}: [{} longs]{}", v.len(), preview(v, options.max_array_preview)),
		Value::List(list) => {
			let header = format!("{pad}{label}: {} entries of {}", list.len(), list.kind());
			write_children(out, &header, list.iter(), list.len(), depth, options)
		}
		Value::Compound(compound) => {
			let header = format!("{pad}{label}: {} entries", compound.len());
			write_children(out, &header, compound.iter(), compound.len(), depth, options)
		}
	}
}

fn write_children<'a, W: fmt::Write>(out: &mut W, header: &str, children: impl Iterator<Item = &'a Tag>, len: usize, depth: u32, options: PrintOptions) -> fmt::Result {
	if len == 0 {
		return writeln!(out, "{header}");
	}
	if depth >= options.max_depth {
		return writeln!(out, "{header} {{ ... }}");
	}

	let pad = "  ".repeat(depth as usize);
	writeln!(out, "{header}")?;
	writeln!(out, "{pad}{{")?;
	for child in children.take(options.max_items) {
		write_tag(out, child, depth + 1, options)?;
	}
	if len > options.max_items {
		writeln!(out, "{pad}  ... {} more", len - options.max_items)?;
	}
	writeln!(out, "{pad}}}")
}

fn preview<T: fmt::Display>(items: &[T], limit: usize) -> String {
	if items.is_empty() || limit == 0 {
		return String::new();
	}

	let shown: Vec<String> = items.iter().take(limit).map(ToString::to_string).collect();
	let more = if items.len() > limit { ", ..." } else { "" };
	format!(" {}{more}", shown.join(", "))
}

fn truncate(text: &str, max_chars: usize) -> String {
	match text.char_indices().nth(max_chars) {
		Some((idx, _)) => format!("{}...", &text[..idx]),
		None => text.to_owned(),
	}
}

#[cfg(test)]
mod tests;
