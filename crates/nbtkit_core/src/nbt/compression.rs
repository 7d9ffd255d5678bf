use std::io::{Read, Write};

use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};

use crate::nbt::{NbtError, Result};

const MAX_DECOMPRESSED_BYTES: usize = 512 * 1024 * 1024;
/// gzip member magic.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];
/// zstd frame magic.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Whole-file compression wrapped around an NBT document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Raw uncompressed stream.
	None,
	/// gzip stream (the usual level and player file wrapping).
	Gzip,
	/// zlib stream (region file chunk wrapping).
	Zlib,
	/// zstd-compressed stream.
	Zstd,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Gzip => "gzip",
			Self::Zlib => "zlib",
			Self::Zstd => "zstd",
		}
	}

	/// Parse a label produced by [`Compression::as_str`].
	pub fn from_label(label: &str) -> Option<Self> {
		match label {
			"none" => Some(Self::None),
			"gzip" => Some(Self::Gzip),
			"zlib" => Some(Self::Zlib),
			"zstd" => Some(Self::Zstd),
			_ => None,
		}
	}

	/// Guess the mode from leading magic bytes; unrecognized input is raw.
	pub fn detect(raw: &[u8]) -> Self {
		if raw.starts_with(&GZIP_MAGIC) {
			Self::Gzip
		} else if raw.starts_with(&ZSTD_MAGIC) {
			Self::Zstd
		} else if is_zlib_header(raw) {
			Self::Zlib
		} else {
			Self::None
		}
	}
}

/// Detect and decode compression, returning `(mode, decoded_bytes)`.
pub fn decode_bytes(raw: Vec<u8>) -> Result<(Compression, Vec<u8>)> {
	let compression = Compression::detect(&raw);
	let out = match compression {
		Compression::None => raw,
		Compression::Gzip => read_capped(GzDecoder::new(raw.as_slice()))?,
		Compression::Zlib => read_capped(ZlibDecoder::new(raw.as_slice()))?,
		Compression::Zstd => read_capped(zstd::stream::read::Decoder::new(raw.as_slice())?)?,
	};

	log::debug!("detected {} compression, {} decoded bytes", compression.as_str(), out.len());
	Ok((compression, out))
}

/// Wrap `bytes` in the given compression mode.
pub fn compress_bytes(bytes: &[u8], compression: Compression) -> Result<Vec<u8>> {
	Ok(match compression {
		Compression::None => bytes.to_vec(),
		Compression::Gzip => {
			let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
			encoder.write_all(bytes)?;
			encoder.finish()?
		}
		Compression::Zlib => {
			let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
			encoder.write_all(bytes)?;
			encoder.finish()?
		}
		Compression::Zstd => zstd::stream::encode_all(bytes, 0)?,
	})
}

fn read_capped<R: Read>(mut decoder: R) -> Result<Vec<u8>> {
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > MAX_DECOMPRESSED_BYTES {
			return Err(NbtError::DecompressedTooLarge { limit: MAX_DECOMPRESSED_BYTES });
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}

// Deflate method, 32K window, and a header checksum divisible by 31.
fn is_zlib_header(raw: &[u8]) -> bool {
	match raw {
		[cmf @ 0x78, flg, ..] => ((u16::from(*cmf) << 8) | u16::from(*flg)) % 31 == 0,
		_ => false,
	}
}
