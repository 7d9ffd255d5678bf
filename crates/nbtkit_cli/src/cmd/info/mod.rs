use std::collections::BTreeMap;
use std::path::PathBuf;

use nbtkit::nbt::{NbtFile, Result, Tag, TagKind, Value};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print compression, root, and per-kind tag statistics.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let file = NbtFile::open(&path)?;
	let stats = TagStats::collect(&file.root);

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			compression: file.compression.as_str(),
			root_name: file.root.name().to_string_lossy().into_owned(),
			root_type: file.root.kind().as_str(),
			tag_count: stats.tag_count,
			max_depth: stats.max_depth,
			kinds: stats.kinds.iter().map(|(kind, count)| (kind.as_str(), *count)).collect(),
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("compression: {}", file.compression.as_str());
	println!("root_name: {}", file.root.name());
	println!("root_type: {}", file.root.kind());
	println!("tag_count: {}", stats.tag_count);
	println!("max_depth: {}", stats.max_depth);
	println!("kinds:");
	for (kind, count) in &stats.kinds {
		println!("  {kind}: {count}");
	}

	Ok(())
}

/// Aggregate counts from one walk over a tag tree.
#[derive(Debug, Default)]
pub struct TagStats {
	/// Number of tags, root and list elements included.
	pub tag_count: usize,
	/// Deepest nesting level, root at 1.
	pub max_depth: usize,
	/// Frequency table by tag kind.
	pub kinds: BTreeMap<TagKind, usize>,
}

impl TagStats {
	/// Walk `root` and every descendant.
	pub fn collect(root: &Tag) -> Self {
		let mut stats = Self::default();
		stats.visit(root, 1);
		stats
	}

	fn visit(&mut self, tag: &Tag, depth: usize) {
		self.tag_count += 1;
		self.max_depth = self.max_depth.max(depth);
		*self.kinds.entry(tag.kind()).or_insert(0) += 1;

		match &tag.value {
			Value::List(list) => list.iter().for_each(|item| self.visit(item, depth + 1)),
			Value::Compound(compound) => compound.iter().for_each(|child| self.visit(child, depth + 1)),
			_ => {}
		}
	}
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	compression: &'static str,
	root_name: String,
	root_type: &'static str,
	tag_count: usize,
	max_depth: usize,
	kinds: BTreeMap<&'static str, usize>,
}
