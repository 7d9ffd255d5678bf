use std::io::{ErrorKind, Read};

use crate::nbt::{NbtError, NbtString, Result};

/// Sequential big-endian reader over any byte source, tracking the offset.
///
/// Reads pull exactly the bytes requested; no read-ahead is performed.
pub struct Reader<R> {
	inner: R,
	pos: usize,
}

impl<R: Read> Reader<R> {
	/// Wrap a source positioned at offset 0.
	pub fn new(inner: R) -> Self {
		Self { inner, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Read one byte, or `None` if the source is exhausted.
	pub fn next_byte(&mut self) -> Result<Option<u8>> {
		let mut buf = [0_u8; 1];
		loop {
			match self.inner.read(&mut buf) {
				Ok(0) => return Ok(None),
				Ok(_) => {
					self.pos += 1;
					return Ok(Some(buf[0]));
				}
				Err(err) if err.kind() == ErrorKind::Interrupted => continue,
				Err(err) => return Err(err.into()),
			}
		}
	}

	/// Fill `buf` completely, failing with `TruncatedInput` on early end.
	pub fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
		let mut filled = 0;
		while filled < buf.len() {
			match self.inner.read(&mut buf[filled..]) {
				Ok(0) => {
					self.pos += filled;
					return Err(NbtError::TruncatedInput {
						at: self.pos,
						need: buf.len() - filled,
					});
				}
				Ok(read) => filled += read,
				Err(err) if err.kind() == ErrorKind::Interrupted => continue,
				Err(err) => return Err(err.into()),
			}
		}
		self.pos += filled;
		Ok(())
	}

	/// Read exactly `n` bytes into a fresh buffer.
	///
	/// The buffer grows in bounded chunks so a bogus length cannot force a huge
	/// allocation before the bytes exist.
	pub fn read_vec(&mut self, n: usize) -> Result<Vec<u8>> {
		const CHUNK: usize = 64 * 1024;

		let mut out = Vec::with_capacity(n.min(CHUNK));
		while out.len() < n {
			let start = out.len();
			let take = (n - start).min(CHUNK);
			out.resize(start + take, 0);
			self.read_into(&mut out[start..])?;
		}
		Ok(out)
	}

	/// Read a fixed-size array.
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let mut buf = [0_u8; N];
		self.read_into(&mut buf)?;
		Ok(buf)
	}

	/// Read one unsigned byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_array::<1>()?[0])
	}

	/// Read a big-endian `i8`.
	pub fn read_i8(&mut self) -> Result<i8> {
		Ok(i8::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `u16`.
	pub fn read_u16(&mut self) -> Result<u16> {
		Ok(u16::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `i16`.
	pub fn read_i16(&mut self) -> Result<i16> {
		Ok(i16::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `i32`.
	pub fn read_i32(&mut self) -> Result<i32> {
		Ok(i32::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `i64`.
	pub fn read_i64(&mut self) -> Result<i64> {
		Ok(i64::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `f32` by bit pattern.
	pub fn read_f32(&mut self) -> Result<f32> {
		Ok(f32::from_bits(u32::from_be_bytes(self.read_array()?)))
	}

	/// Read a big-endian `f64` by bit pattern.
	pub fn read_f64(&mut self) -> Result<f64> {
		Ok(f64::from_bits(u64::from_be_bytes(self.read_array()?)))
	}

	/// Read a `u16`-length-prefixed string, bytes taken as-is.
	pub fn read_string(&mut self) -> Result<NbtString> {
		let len = usize::from(self.read_u16()?);
		Ok(NbtString::from_bytes(self.read_vec(len)?))
	}
}
