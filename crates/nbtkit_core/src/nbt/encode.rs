use std::io::Write;

use crate::nbt::{List, NbtError, NbtString, Result, Tag, TagKind, Value};

/// Encode a tag tree with its named root header.
pub fn encode<W: Write>(tag: &Tag, writer: W) -> Result<()> {
	Encoder::new(writer).write_tag(tag)
}

/// Encode a tag tree into a fresh buffer.
pub fn encode_to_vec(tag: &Tag) -> Result<Vec<u8>> {
	let mut out = Vec::new();
	encode(tag, &mut out)?;
	log::trace!("encoded root {:?} ({}), {} bytes", tag.name(), tag.kind(), out.len());
	Ok(out)
}

/// Writes the canonical byte encoding of tags to a sink.
pub struct Encoder<W> {
	writer: W,
}

impl<W: Write> Encoder<W> {
	/// Wrap a sink.
	pub fn new(writer: W) -> Self {
		Self { writer }
	}

	/// Return the wrapped sink.
	pub fn into_inner(self) -> W {
		self.writer
	}

	/// Write a full named tag: type id, name, payload.
	///
	/// An absent name is written as the empty name.
	pub fn write_tag(&mut self, tag: &Tag) -> Result<()> {
		self.write_named(tag.name(), &tag.value)
	}

	fn write_named(&mut self, name: &NbtString, value: &Value) -> Result<()> {
		self.writer.write_all(&[value.kind().id()])?;
		self.write_str(name, "name")?;
		self.write_payload(value)
	}

	fn write_payload(&mut self, value: &Value) -> Result<()> {
		match value {
			Value::List(list) => self.write_list(list),
			Value::Compound(compound) => {
				for child in compound {
					self.write_named(child.name(), &child.value)?;
				}
				self.writer.write_all(&[TagKind::End.id()])?;
				Ok(())
			}
			_ => self.write_leaf(value),
		}
	}

	fn write_leaf(&mut self, value: &Value) -> Result<()> {
		match value {
			Value::Byte(v) => self.writer.write_all(&v.to_be_bytes())?,
			Value::Short(v) => self.writer.write_all(&v.to_be_bytes())?,
			Value::Int(v) => self.writer.write_all(&v.to_be_bytes())?,
			Value::Long(v) => self.writer.write_all(&v.to_be_bytes())?,
			Value::Float(v) => self.writer.write_all(&v.to_bits().to_be_bytes())?,
			Value::Double(v) => self.writer.write_all(&v.to_bits().to_be_bytes())?,
			Value::ByteArray(items) => {
				self.write_count(items.len(), "byte array")?;
				self.writer.write_all(items)?;
			}
			Value::String(v) => self.write_str(v, "string")?,
			Value::IntArray(items) => {
				self.write_count(items.len(), "int array")?;
				let buf: Vec<u8> = items.iter().flat_map(|item| item.to_be_bytes()).collect();
				self.writer.write_all(&buf)?;
			}
			Value::LongArray(items) => {
				self.write_count(items.len(), "long array")?;
				let buf: Vec<u8> = items.iter().flat_map(|item| item.to_be_bytes()).collect();
				self.writer.write_all(&buf)?;
			}
			Value::List(_) | Value::Compound(_) => unreachable!("containers are handled by write_payload"),
		}
		Ok(())
	}

	fn write_list(&mut self, list: &List) -> Result<()> {
		let first = list.get(0).ok_or(NbtError::EmptyList)?;
		let item_kind = first.kind();

		self.writer.write_all(&[item_kind.id()])?;
		self.write_count(list.len(), "list")?;
		for item in list {
			if item.kind() != item_kind {
				return Err(NbtError::HeterogeneousList {
					expected: item_kind,
					found: item.kind(),
				});
			}
			self.write_payload(&item.value)?;
		}
		Ok(())
	}

	fn write_str(&mut self, text: &NbtString, what: &'static str) -> Result<()> {
		let len = u16::try_from(text.len()).map_err(|_| NbtError::LengthOverflow {
			what,
			len: text.len(),
			max: usize::from(u16::MAX),
		})?;
		self.writer.write_all(&len.to_be_bytes())?;
		self.writer.write_all(text.as_bytes())?;
		Ok(())
	}

	fn write_count(&mut self, len: usize, what: &'static str) -> Result<()> {
		let count = i32::try_from(len).map_err(|_| NbtError::LengthOverflow {
			what,
			len,
			max: i32::MAX as usize,
		})?;
		self.writer.write_all(&count.to_be_bytes())?;
		Ok(())
	}
}
