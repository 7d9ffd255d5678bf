use std::io::Read;

use crate::nbt::bytes::Reader;
use crate::nbt::{Compound, List, NbtError, Result, Tag, TagKind, Value};

/// Upper bound on elements reserved ahead of reading them.
const PREALLOC_ELEMS: usize = 4096;

/// Default nesting limit; fits a 2 MiB thread stack in unoptimized builds.
pub const DEFAULT_MAX_DEPTH: u32 = 256;

/// Runtime limits for decoding untrusted input.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum nesting depth of lists and compounds.
	pub max_depth: u32,
	/// Maximum element count of a single array or list.
	pub max_array_len: usize,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
			max_array_len: 16 * 1024 * 1024,
		}
	}
}

impl DecodeOptions {
	/// Preset that only stops at what the wire format itself can express.
	pub fn unbounded() -> Self {
		Self {
			max_depth: u32::MAX,
			max_array_len: i32::MAX as usize,
		}
	}
}

/// Decode one document from a byte slice with default limits.
///
/// Returns `Ok(None)` when the input is empty.
pub fn decode(bytes: &[u8]) -> Result<Option<Tag>> {
	decode_with(bytes, &DecodeOptions::default())
}

/// Decode one document from a byte slice.
pub fn decode_with(bytes: &[u8], opt: &DecodeOptions) -> Result<Option<Tag>> {
	decode_reader(bytes, opt)
}

/// Decode one document from a reader.
///
/// The reader is consumed byte-exactly up to the end of the document; wrap
/// unbuffered sources in `BufReader`.
pub fn decode_reader<R: Read>(reader: R, opt: &DecodeOptions) -> Result<Option<Tag>> {
	Decoder::new(reader, opt.clone()).decode()
}

/// Recursive-descent decoder over one byte source.
pub struct Decoder<R> {
	reader: Reader<R>,
	opt: DecodeOptions,
}

impl<R: Read> Decoder<R> {
	/// Create a decoder positioned at the start of `reader`.
	pub fn new(reader: R, opt: DecodeOptions) -> Self {
		Self {
			reader: Reader::new(reader),
			opt,
		}
	}

	/// Bytes consumed so far.
	pub fn position(&self) -> usize {
		self.reader.pos()
	}

	/// Decode the next named root tag.
	///
	/// An exhausted source, or a lone `End` byte, yields `Ok(None)`.
	pub fn decode(&mut self) -> Result<Option<Tag>> {
		let at = self.reader.pos();
		let Some(id) = self.reader.next_byte()? else {
			return Ok(None);
		};

		let kind = kind_from_id(id, at)?;
		if kind == TagKind::End {
			return Ok(None);
		}

		let name = self.reader.read_string()?;
		let value = self.read_payload(kind, 0)?;
		log::trace!("decoded root {name:?} ({kind}), {} bytes", self.reader.pos() - at);
		Ok(Some(Tag { name: Some(name), value }))
	}

	fn read_named(&mut self, depth: u32) -> Result<Option<Tag>> {
		let at = self.reader.pos();
		let kind = kind_from_id(self.reader.read_u8()?, at)?;
		if kind == TagKind::End {
			return Ok(None);
		}

		let name = self.reader.read_string()?;
		let value = self.read_payload(kind, depth)?;
		Ok(Some(Tag { name: Some(name), value }))
	}

	// Only containers recurse; leaf payloads are read in a separate frame so
	// the per-level stack cost stays small.
	fn read_payload(&mut self, kind: TagKind, depth: u32) -> Result<Value> {
		match kind {
			TagKind::List => self.read_list(depth).map(Value::List),
			TagKind::Compound => self.read_compound(depth).map(Value::Compound),
			_ => self.read_leaf(kind),
		}
	}

	fn read_leaf(&mut self, kind: TagKind) -> Result<Value> {
		Ok(match kind {
			TagKind::Byte => Value::Byte(self.reader.read_i8()?),
			TagKind::Short => Value::Short(self.reader.read_i16()?),
			TagKind::Int => Value::Int(self.reader.read_i32()?),
			TagKind::Long => Value::Long(self.reader.read_i64()?),
			TagKind::Float => Value::Float(self.reader.read_f32()?),
			TagKind::Double => Value::Double(self.reader.read_f64()?),
			TagKind::ByteArray => {
				let count = self.read_count(kind)?;
				Value::ByteArray(self.reader.read_vec(count)?)
			}
			TagKind::String => Value::String(self.reader.read_string()?),
			TagKind::IntArray => Value::IntArray(self.read_array(kind, Reader::read_i32)?),
			TagKind::LongArray => Value::LongArray(self.read_array(kind, Reader::read_i64)?),
			TagKind::List | TagKind::Compound | TagKind::End => unreachable!("containers and End are handled by callers"),
		})
	}

	fn read_array<T>(&mut self, kind: TagKind, read: fn(&mut Reader<R>) -> Result<T>) -> Result<Vec<T>> {
		let count = self.read_count(kind)?;
		let mut out = Vec::with_capacity(count.min(PREALLOC_ELEMS));
		for _ in 0..count {
			out.push(read(&mut self.reader)?);
		}
		Ok(out)
	}

	fn read_list(&mut self, depth: u32) -> Result<List> {
		self.check_depth(depth)?;

		let at = self.reader.pos();
		let item_kind = kind_from_id(self.reader.read_u8()?, at)?;
		let count = self.read_count(TagKind::List)?;
		if item_kind == TagKind::End && count > 0 {
			return Err(NbtError::InvalidListItemType { kind: item_kind, count });
		}

		let mut list = List::with_kind_and_capacity(item_kind, count.min(PREALLOC_ELEMS));
		for _ in 0..count {
			let value = self.read_payload(item_kind, depth + 1)?;
			list.push_tag(Tag::unnamed(value))?;
		}
		Ok(list)
	}

	fn read_compound(&mut self, depth: u32) -> Result<Compound> {
		self.check_depth(depth)?;

		let mut compound = Compound::new();
		while let Some(child) = self.read_named(depth + 1)? {
			if let Some(previous) = compound.insert(child) {
				log::warn!("duplicate compound key {:?} overwritten at offset {}", previous.name(), self.reader.pos());
			}
		}
		Ok(compound)
	}

	fn read_count(&mut self, kind: TagKind) -> Result<usize> {
		let at = self.reader.pos();
		let len = self.reader.read_i32()?;
		let count = usize::try_from(len).map_err(|_| NbtError::NegativeLength { kind, len, at })?;
		if count > self.opt.max_array_len {
			return Err(NbtError::DecodeArrayTooLarge {
				count,
				max: self.opt.max_array_len,
			});
		}
		Ok(count)
	}

	fn check_depth(&self, depth: u32) -> Result<()> {
		if depth >= self.opt.max_depth {
			return Err(NbtError::DecodeDepthExceeded { max_depth: self.opt.max_depth });
		}
		Ok(())
	}
}

fn kind_from_id(id: u8, at: usize) -> Result<TagKind> {
	TagKind::from_id(id).ok_or(NbtError::UnknownTagType { id, at })
}
