use std::fs;
use std::path::Path;

use crate::nbt::compression::{compress_bytes, decode_bytes};
use crate::nbt::{Compression, DecodeOptions, NbtError, Result, Tag, decode_with, encode_to_vec};

/// NBT document loaded from disk together with its compression wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct NbtFile {
	/// Compression mode detected on open, reused on save.
	pub compression: Compression,
	/// Document root.
	pub root: Tag,
}

impl NbtFile {
	/// Wrap a root tag for saving.
	pub fn new(root: Tag, compression: Compression) -> Self {
		Self { compression, root }
	}

	/// Read, decompress, and decode a file with default limits.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Self::open_with(path, &DecodeOptions::default())
	}

	/// Read, decompress, and decode a file.
	pub fn open_with(path: impl AsRef<Path>, opt: &DecodeOptions) -> Result<Self> {
		let path = path.as_ref();
		let raw = fs::read(path)?;
		log::debug!("opened {} ({} bytes)", path.display(), raw.len());
		Self::from_raw(raw, opt)
	}

	/// Decompress and decode an in-memory file image.
	pub fn from_raw(raw: Vec<u8>, opt: &DecodeOptions) -> Result<Self> {
		let (compression, bytes) = decode_bytes(raw)?;
		let root = decode_with(&bytes, opt)?.ok_or(NbtError::EmptyDocument)?;
		Ok(Self { compression, root })
	}

	/// Encode and compress into an in-memory file image.
	pub fn to_raw(&self) -> Result<Vec<u8>> {
		compress_bytes(&encode_to_vec(&self.root)?, self.compression)
	}

	/// Encode, compress, and write the file.
	pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
		let path = path.as_ref();
		let raw = self.to_raw()?;
		fs::write(path, &raw)?;
		log::debug!("saved {} ({} compression, {} bytes)", path.display(), self.compression.as_str(), raw.len());
		Ok(())
	}
}
