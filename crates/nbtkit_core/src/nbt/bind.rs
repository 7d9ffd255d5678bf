//! Mapping between tag trees and Rust values.
//!
//! Records implement both traits through `#[derive(NbtBind)]`; only fields
//! carrying `#[nbt(name = "...")]` take part, in either direction.

use std::collections::{BTreeMap, HashMap};
use std::io::{Read, Write};

use crate::nbt::{Compound, DecodeOptions, List, NbtError, NbtString, Result, Tag, Value, decode_reader, encode, encode_to_vec};

/// Build a value from a tag.
pub trait FromTag: Sized {
	/// Convert `tag` into a fresh value.
	fn from_tag(tag: &Tag) -> Result<Self>;

	/// Assign from `tag` in place.
	///
	/// Records override this to touch only the fields present in `tag`.
	fn merge_from(&mut self, tag: &Tag) -> Result<()> {
		*self = Self::from_tag(tag)?;
		Ok(())
	}

	/// Build a sequence of `Self` from a tag.
	///
	/// Element types with a raw array encoding override this to accept it.
	fn vec_from_tag(tag: &Tag) -> Result<Vec<Self>> {
		match &tag.value {
			Value::List(list) => list.iter().map(Self::from_tag).collect(),
			other => Err(mismatch("List", other)),
		}
	}
}

/// Turn a value into a tag payload.
pub trait ToTag {
	/// Convert into a payload.
	fn to_value(&self) -> Result<Value>;

	/// Convert into a payload for a record field; `None` omits the field.
	fn to_field_value(&self) -> Result<Option<Value>> {
		self.to_value().map(Some)
	}

	/// Convert a sequence of `Self` into a payload.
	///
	/// The default builds a `List` typed by the first element, so an empty
	/// sequence fails with `EmptyList`.
	fn slice_to_value(items: &[Self]) -> Result<Value>
	where
		Self: Sized,
	{
		if items.is_empty() {
			return Err(NbtError::EmptyList);
		}

		let mut list = List::new();
		for item in items {
			list.push(item.to_value()?)?;
		}
		Ok(Value::List(list))
	}
}

/// Bind a decoded document to `out`.
///
/// The root is presented as the sole child of an unnamed compound, so a
/// record binds the document root through a field named after it.
pub fn unmarshal<T: FromTag>(root: &Tag, out: &mut T) -> Result<()> {
	let mut wrapper = Compound::new();
	wrapper.insert(root.clone());
	out.merge_from(&Tag::unnamed(wrapper))
}

/// Convert a value into a document root.
///
/// A root compound with exactly one child is replaced by that child.
pub fn marshal<T: ToTag + ?Sized>(value: &T) -> Result<Tag> {
	match value.to_value()? {
		Value::Compound(compound) => match compound.into_single() {
			Ok(only) => Ok(only),
			Err(compound) => Ok(Tag::named("", compound)),
		},
		other => Ok(Tag::named("", other)),
	}
}

/// Decode bytes and bind them to a default-initialized `T`.
///
/// Empty input yields `T::default()`.
pub fn from_bytes<T: FromTag + Default>(bytes: &[u8]) -> Result<T> {
	from_reader(bytes, &DecodeOptions::default())
}

/// Decode from a reader and bind to a default-initialized `T`.
pub fn from_reader<T: FromTag + Default, R: Read>(reader: R, opt: &DecodeOptions) -> Result<T> {
	let mut out = T::default();
	if let Some(root) = decode_reader(reader, opt)? {
		unmarshal(&root, &mut out)?;
	}
	Ok(out)
}

/// Marshal and encode a value.
pub fn to_bytes<T: ToTag + ?Sized>(value: &T) -> Result<Vec<u8>> {
	encode_to_vec(&marshal(value)?)
}

/// Marshal a value and encode it to a writer.
pub fn to_writer<T: ToTag + ?Sized, W: Write>(value: &T, writer: W) -> Result<()> {
	encode(&marshal(value)?, writer)
}

fn mismatch(expected: &'static str, found: &Value) -> NbtError {
	NbtError::TypeMismatch {
		expected,
		found: found.kind().to_string(),
	}
}

fn integer_from(tag: &Tag, expected: &'static str) -> Result<i64> {
	tag.value.as_i64().ok_or_else(|| mismatch(expected, &tag.value))
}

fn narrow<T: TryFrom<i64>>(value: i64, expected: &'static str) -> Result<T> {
	T::try_from(value).map_err(|_| NbtError::TypeMismatch {
		expected,
		found: format!("out-of-range integer {value}"),
	})
}

macro_rules! impl_integer_bind {
	($($ty:ty => $variant:ident, $array:ident;)*) => {
		$(impl FromTag for $ty {
			fn from_tag(tag: &Tag) -> Result<Self> {
				narrow(integer_from(tag, stringify!($ty))?, stringify!($ty))
			}

			fn vec_from_tag(tag: &Tag) -> Result<Vec<Self>> {
				match &tag.value {
					Value::$array(items) => Ok(items.clone()),
					Value::List(list) => list.iter().map(Self::from_tag).collect(),
					other => Err(mismatch("List", other)),
				}
			}
		}

		impl ToTag for $ty {
			fn to_value(&self) -> Result<Value> {
				Ok(Value::$variant(*self))
			}
		})*
	};
}

impl_integer_bind! {
	i32 => Int, IntArray;
	i64 => Long, LongArray;
}

impl FromTag for i16 {
	fn from_tag(tag: &Tag) -> Result<Self> {
		narrow(integer_from(tag, "i16")?, "i16")
	}
}

impl ToTag for i16 {
	fn to_value(&self) -> Result<Value> {
		Ok(Value::Short(*self))
	}
}

impl FromTag for i8 {
	fn from_tag(tag: &Tag) -> Result<Self> {
		narrow(integer_from(tag, "i8")?, "i8")
	}

	fn vec_from_tag(tag: &Tag) -> Result<Vec<Self>> {
		match &tag.value {
			Value::ByteArray(items) => Ok(items.iter().map(|item| *item as i8).collect()),
			Value::List(list) => list.iter().map(Self::from_tag).collect(),
			other => Err(mismatch("ByteArray", other)),
		}
	}
}

impl ToTag for i8 {
	fn to_value(&self) -> Result<Value> {
		Ok(Value::Byte(*self))
	}

	fn slice_to_value(items: &[Self]) -> Result<Value> {
		Ok(Value::ByteArray(items.iter().map(|item| *item as u8).collect()))
	}
}

// `u8` shares the `Byte` wire type, reinterpreting the bit pattern.
impl FromTag for u8 {
	fn from_tag(tag: &Tag) -> Result<Self> {
		match tag.value {
			Value::Byte(v) => Ok(v as u8),
			_ => narrow(integer_from(tag, "u8")?, "u8"),
		}
	}

	fn vec_from_tag(tag: &Tag) -> Result<Vec<Self>> {
		match &tag.value {
			Value::ByteArray(items) => Ok(items.clone()),
			Value::List(list) => list.iter().map(Self::from_tag).collect(),
			other => Err(mismatch("ByteArray", other)),
		}
	}
}

impl ToTag for u8 {
	fn to_value(&self) -> Result<Value> {
		Ok(Value::Byte(*self as i8))
	}

	fn slice_to_value(items: &[Self]) -> Result<Value> {
		Ok(Value::ByteArray(items.to_vec()))
	}
}

impl FromTag for f32 {
	fn from_tag(tag: &Tag) -> Result<Self> {
		tag.value.as_f32().ok_or_else(|| mismatch("f32", &tag.value))
	}
}

impl ToTag for f32 {
	fn to_value(&self) -> Result<Value> {
		Ok(Value::Float(*self))
	}
}

impl FromTag for f64 {
	fn from_tag(tag: &Tag) -> Result<Self> {
		tag.value.as_f64().ok_or_else(|| mismatch("f64", &tag.value))
	}
}

impl ToTag for f64 {
	fn to_value(&self) -> Result<Value> {
		Ok(Value::Double(*self))
	}
}

impl FromTag for bool {
	fn from_tag(tag: &Tag) -> Result<Self> {
		match tag.value {
			Value::Byte(0) => Ok(false),
			Value::Byte(1) => Ok(true),
			Value::Byte(v) => Err(NbtError::TypeMismatch {
				expected: "bool",
				found: format!("byte {v}"),
			}),
			ref other => Err(mismatch("bool", other)),
		}
	}
}

impl ToTag for bool {
	fn to_value(&self) -> Result<Value> {
		Ok(Value::Byte(i8::from(*self)))
	}
}

impl FromTag for String {
	fn from_tag(tag: &Tag) -> Result<Self> {
		match &tag.value {
			Value::String(v) => v.to_str().map(str::to_owned).ok_or_else(|| NbtError::TypeMismatch {
				expected: "String",
				found: format!("non-UTF-8 string {v:?}"),
			}),
			other => Err(mismatch("String", other)),
		}
	}
}

impl ToTag for String {
	fn to_value(&self) -> Result<Value> {
		Ok(Value::from(self.as_str()))
	}
}

impl ToTag for str {
	fn to_value(&self) -> Result<Value> {
		Ok(Value::from(self))
	}
}

// Binds the payload bytes verbatim, for text that is not valid UTF-8.
impl FromTag for NbtString {
	fn from_tag(tag: &Tag) -> Result<Self> {
		match &tag.value {
			Value::String(v) => Ok(v.clone()),
			other => Err(mismatch("String", other)),
		}
	}
}

impl ToTag for NbtString {
	fn to_value(&self) -> Result<Value> {
		Ok(Value::String(self.clone()))
	}
}

// The raw node escape hatch: the whole tag, name included.
impl FromTag for Tag {
	fn from_tag(tag: &Tag) -> Result<Self> {
		Ok(tag.clone())
	}
}

impl ToTag for Tag {
	fn to_value(&self) -> Result<Value> {
		Ok(self.value.clone())
	}
}

impl FromTag for Compound {
	fn from_tag(tag: &Tag) -> Result<Self> {
		match &tag.value {
			Value::Compound(v) => Ok(v.clone()),
			other => Err(mismatch("Compound", other)),
		}
	}
}

impl ToTag for Compound {
	fn to_value(&self) -> Result<Value> {
		Ok(Value::Compound(self.clone()))
	}
}

impl<T: FromTag> FromTag for Vec<T> {
	fn from_tag(tag: &Tag) -> Result<Self> {
		T::vec_from_tag(tag)
	}
}

impl<T: ToTag> ToTag for Vec<T> {
	fn to_value(&self) -> Result<Value> {
		T::slice_to_value(self)
	}
}

impl<T: ToTag> ToTag for [T] {
	fn to_value(&self) -> Result<Value> {
		T::slice_to_value(self)
	}
}

impl<T: FromTag> FromTag for Option<T> {
	fn from_tag(tag: &Tag) -> Result<Self> {
		T::from_tag(tag).map(Some)
	}
}

impl<T: ToTag> ToTag for Option<T> {
	fn to_value(&self) -> Result<Value> {
		match self {
			Some(inner) => inner.to_value(),
			None => Err(NbtError::UnsupportedType { type_name: "Option::None" }),
		}
	}

	fn to_field_value(&self) -> Result<Option<Value>> {
		self.as_ref().map(ToTag::to_value).transpose()
	}
}

impl<T: ToTag + ?Sized> ToTag for Box<T> {
	fn to_value(&self) -> Result<Value> {
		(**self).to_value()
	}
}

impl<T: FromTag> FromTag for Box<T> {
	fn from_tag(tag: &Tag) -> Result<Self> {
		T::from_tag(tag).map(Box::new)
	}
}

macro_rules! impl_unsupported {
	($($ty:ty => $label:expr,)*) => {
		$(impl FromTag for $ty {
			fn from_tag(_tag: &Tag) -> Result<Self> {
				Err(NbtError::UnsupportedType { type_name: $label })
			}
		}

		impl ToTag for $ty {
			fn to_value(&self) -> Result<Value> {
				Err(NbtError::UnsupportedType { type_name: $label })
			}
		})*
	};
}

impl_unsupported! {
	u16 => "u16",
	u32 => "u32",
	u64 => "u64",
	u128 => "u128",
	i128 => "i128",
	usize => "usize",
	isize => "isize",
	char => "char",
}

macro_rules! impl_unsupported_map {
	($($ty:ident<$($param:ident),*> => $label:expr,)*) => {
		$(impl<$($param),*> FromTag for $ty<$($param),*> {
			fn from_tag(_tag: &Tag) -> Result<Self> {
				Err(NbtError::UnsupportedType { type_name: $label })
			}
		}

		impl<$($param),*> ToTag for $ty<$($param),*> {
			fn to_value(&self) -> Result<Value> {
				Err(NbtError::UnsupportedType { type_name: $label })
			}
		})*
	};
}

impl_unsupported_map! {
	HashMap<K, V, S> => "HashMap",
	BTreeMap<K, V> => "BTreeMap",
}

#[cfg(test)]
mod tests;
