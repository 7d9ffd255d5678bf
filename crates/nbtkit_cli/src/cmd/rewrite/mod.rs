use std::fs;
use std::path::{Path, PathBuf};

use nbtkit::nbt::{Compression, NbtError, NbtFile, Result, decode, decode_bytes, encode_to_vec};

use crate::cmd::util::{emit_json, parse_compression};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub out: Option<PathBuf>,
	#[arg(long, value_parser = parse_compression)]
	pub compression: Option<Compression>,
	#[arg(long)]
	pub json: bool,
}

/// Decode, re-encode, and verify a document, optionally saving the result.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		out,
		compression,
		json,
	} = args;

	let report = rewrite(fs::read(&path)?, out.as_deref().map(|out| (out, compression)))?;

	if json {
		return emit_json(&report);
	}

	println!("path: {}", path.display());
	println!("compression: {}", report.compression);
	println!("decoded_bytes: {}", report.decoded_bytes);
	println!("encoded_bytes: {}", report.encoded_bytes);
	println!("identical_bytes: {}", report.identical_bytes);
	println!("tree_equal: {}", report.tree_equal);
	if let Some(written) = &report.written {
		println!("written: {} ({})", written.path, written.compression);
	}
	Ok(())
}

/// Outcome of one decode and re-encode pass.
#[derive(Debug, serde::Serialize)]
pub(crate) struct RewriteReport {
	pub compression: &'static str,
	pub decoded_bytes: usize,
	pub encoded_bytes: usize,
	pub identical_bytes: bool,
	pub tree_equal: bool,
	pub written: Option<WrittenJson>,
}

#[derive(Debug, serde::Serialize)]
pub(crate) struct WrittenJson {
	pub path: String,
	pub compression: &'static str,
}

/// Re-encode `raw`, and save it to `target` when given, keeping the source
/// compression unless one is specified.
pub(crate) fn rewrite(raw: Vec<u8>, target: Option<(&Path, Option<Compression>)>) -> Result<RewriteReport> {
	let (source_compression, bytes) = decode_bytes(raw)?;
	let root = decode(&bytes)?.ok_or(NbtError::EmptyDocument)?;
	let encoded = encode_to_vec(&root)?;
	let tree_equal = decode(&encoded)?.as_ref() == Some(&root);
	if encoded != bytes {
		log::warn!("re-encoded document differs from source ({} -> {} bytes)", bytes.len(), encoded.len());
	}

	let mut report = RewriteReport {
		compression: source_compression.as_str(),
		decoded_bytes: bytes.len(),
		encoded_bytes: encoded.len(),
		identical_bytes: encoded == bytes,
		tree_equal,
		written: None,
	};

	if let Some((out, compression)) = target {
		let compression = compression.unwrap_or(source_compression);
		NbtFile::new(root, compression).save(out)?;
		report.written = Some(WrittenJson {
			path: out.display().to_string(),
			compression: compression.as_str(),
		});
	}

	Ok(report)
}
