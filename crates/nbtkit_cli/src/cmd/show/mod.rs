use std::borrow::Cow;
use std::path::PathBuf;

use nbtkit::nbt::{NbtFile, Result, Tag, TagPath};

use crate::cmd::util::{emit_json, tag_to_json};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long = "path")]
	pub path_expr: Option<String>,
	#[arg(long)]
	pub json: bool,
}

/// Print the root or a path-selected subtree.
pub fn run(args: Args) -> Result<()> {
	let Args { file: path, path_expr, json } = args;

	let file = NbtFile::open(&path)?;
	let selected = select(&file.root, path_expr.as_deref())?;

	if json {
		let payload = ShowJson {
			path: path.display().to_string(),
			tag_path: path_expr,
			name: selected.name.as_ref().map(|name| name.to_string_lossy().into_owned()),
			kind: selected.kind().as_str(),
			value: tag_to_json(&selected),
		};
		return emit_json(&payload);
	}

	print!("{selected}");
	Ok(())
}

/// Resolve an optional path expression against `root`.
pub(crate) fn select<'a>(root: &'a Tag, path_expr: Option<&str>) -> Result<Cow<'a, Tag>> {
	match path_expr {
		Some(expr) => root.get_path(&TagPath::parse(expr)?),
		None => Ok(Cow::Borrowed(root)),
	}
}

#[derive(serde::Serialize)]
struct ShowJson {
	path: String,
	tag_path: Option<String>,
	name: Option<String>,
	kind: &'static str,
	value: serde_json::Value,
}

#[cfg(test)]
mod tests;
