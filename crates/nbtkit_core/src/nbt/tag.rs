use std::fmt;

use indexmap::IndexMap;

use crate::nbt::{NbtError, NbtString, Result, TagKind};

static EMPTY_NAME: NbtString = NbtString::new();

/// One node of a tag tree: an optional name and a typed value.
///
/// Names are present on the document root and on compound members; list
/// elements are always unnamed.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
	/// Name from the enclosing named context, if any.
	pub name: Option<NbtString>,
	/// Typed payload.
	pub value: Value,
}

impl Tag {
	/// Build a tag from parts.
	pub fn new(name: Option<NbtString>, value: impl Into<Value>) -> Self {
		Self { name, value: value.into() }
	}

	/// Build a named tag.
	pub fn named(name: impl Into<NbtString>, value: impl Into<Value>) -> Self {
		Self {
			name: Some(name.into()),
			value: value.into(),
		}
	}

	/// Build an unnamed tag, as found in list positions.
	pub fn unnamed(value: impl Into<Value>) -> Self {
		Self { name: None, value: value.into() }
	}

	/// Wire kind of the payload.
	pub fn kind(&self) -> TagKind {
		self.value.kind()
	}

	/// Name, with an absent name reading as empty.
	pub fn name(&self) -> &NbtString {
		self.name.as_ref().unwrap_or(&EMPTY_NAME)
	}

	/// Look up `name` among direct compound children, or match this tag's own name
	/// for every other kind.
	pub fn find<K: AsRef<[u8]> + ?Sized>(&self, name: &K) -> Option<&Tag> {
		match &self.value {
			Value::Compound(compound) => compound.get(name),
			_ if self.name().as_bytes() == name.as_ref() => Some(self),
			_ => None,
		}
	}

	/// Borrow the compound payload.
	pub fn as_compound(&self) -> Option<&Compound> {
		self.value.as_compound()
	}

	/// Borrow the list payload.
	pub fn as_list(&self) -> Option<&List> {
		self.value.as_list()
	}

	/// Count this tag and every descendant.
	pub fn count_tags(&self) -> usize {
		1 + match &self.value {
			Value::List(list) => list.iter().map(Tag::count_tags).sum(),
			Value::Compound(compound) => compound.iter().map(Tag::count_tags).sum(),
			_ => 0,
		}
	}

	/// Nesting depth, counting this tag as depth 1.
	pub fn depth(&self) -> usize {
		1 + match &self.value {
			Value::List(list) => list.iter().map(Tag::depth).max().unwrap_or(0),
			Value::Compound(compound) => compound.iter().map(Tag::depth).max().unwrap_or(0),
			_ => 0,
		}
	}
}

/// Typed tag payload, one variant per non-`End` wire type.
#[derive(Debug, Clone)]
pub enum Value {
	/// Signed 8-bit integer.
	Byte(i8),
	/// Signed 16-bit integer.
	Short(i16),
	/// Signed 32-bit integer.
	Int(i32),
	/// Signed 64-bit integer.
	Long(i64),
	/// Single precision float, bit pattern preserved.
	Float(f32),
	/// Double precision float, bit pattern preserved.
	Double(f64),
	/// Raw byte payload.
	ByteArray(Vec<u8>),
	/// Length-prefixed text, bytes kept verbatim.
	String(NbtString),
	/// Homogeneous unnamed sequence.
	List(List),
	/// Named children.
	Compound(Compound),
	/// `i32` payload.
	IntArray(Vec<i32>),
	/// `i64` payload.
	LongArray(Vec<i64>),
}

impl Value {
	/// Wire kind of this payload.
	pub fn kind(&self) -> TagKind {
		match self {
			Self::Byte(_) => TagKind::Byte,
			Self::Short(_) => TagKind::Short,
			Self::Int(_) => TagKind::Int,
			Self::Long(_) => TagKind::Long,
			Self::Float(_) => TagKind::Float,
			Self::Double(_) => TagKind::Double,
			Self::ByteArray(_) => TagKind::ByteArray,
			Self::String(_) => TagKind::String,
			Self::List(_) => TagKind::List,
			Self::Compound(_) => TagKind::Compound,
			Self::IntArray(_) => TagKind::IntArray,
			Self::LongArray(_) => TagKind::LongArray,
		}
	}

	/// `Byte` payload.
	pub fn as_i8(&self) -> Option<i8> {
		match *self {
			Self::Byte(v) => Some(v),
			_ => None,
		}
	}

	/// `Short` payload.
	pub fn as_i16(&self) -> Option<i16> {
		match *self {
			Self::Short(v) => Some(v),
			_ => None,
		}
	}

	/// `Int` payload.
	pub fn as_i32(&self) -> Option<i32> {
		match *self {
			Self::Int(v) => Some(v),
			_ => None,
		}
	}

	/// Integer payload widened to `i64`.
	pub fn as_i64(&self) -> Option<i64> {
		match *self {
			Self::Byte(v) => Some(i64::from(v)),
			Self::Short(v) => Some(i64::from(v)),
			Self::Int(v) => Some(i64::from(v)),
			Self::Long(v) => Some(v),
			_ => None,
		}
	}

	/// `Float` payload.
	pub fn as_f32(&self) -> Option<f32> {
		match *self {
			Self::Float(v) => Some(v),
			_ => None,
		}
	}

	/// `Double` payload, or a widened `Float`.
	pub fn as_f64(&self) -> Option<f64> {
		match *self {
			Self::Float(v) => Some(f64::from(v)),
			Self::Double(v) => Some(v),
			_ => None,
		}
	}

	/// Borrow the text payload when it is valid UTF-8.
	pub fn as_str(&self) -> Option<&str> {
		self.as_nbt_string().and_then(NbtString::to_str)
	}

	/// Borrow the string payload as raw bytes.
	pub fn as_nbt_string(&self) -> Option<&NbtString> {
		match self {
			Self::String(v) => Some(v),
			_ => None,
		}
	}

	/// Borrow the raw byte payload.
	pub fn as_bytes(&self) -> Option<&[u8]> {
		match self {
			Self::ByteArray(v) => Some(v),
			_ => None,
		}
	}

	/// Borrow the list payload.
	pub fn as_list(&self) -> Option<&List> {
		match self {
			Self::List(v) => Some(v),
			_ => None,
		}
	}

	/// Borrow the compound payload.
	pub fn as_compound(&self) -> Option<&Compound> {
		match self {
			Self::Compound(v) => Some(v),
			_ => None,
		}
	}
}

// Floats compare by bit pattern so NaN payloads round-trip as equal.
impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Byte(a), Self::Byte(b)) => a == b,
			(Self::Short(a), Self::Short(b)) => a == b,
			(Self::Int(a), Self::Int(b)) => a == b,
			(Self::Long(a), Self::Long(b)) => a == b,
			(Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
			(Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
			(Self::ByteArray(a), Self::ByteArray(b)) => a == b,
			(Self::String(a), Self::String(b)) => a == b,
			(Self::List(a), Self::List(b)) => a == b,
			(Self::Compound(a), Self::Compound(b)) => a == b,
			(Self::IntArray(a), Self::IntArray(b)) => a == b,
			(Self::LongArray(a), Self::LongArray(b)) => a == b,
			_ => false,
		}
	}
}

macro_rules! impl_value_from {
	($($ty:ty => $variant:ident,)*) => {
		$(impl From<$ty> for Value {
			fn from(value: $ty) -> Self {
				Self::$variant(value)
			}
		})*
	};
}

impl_value_from! {
	i8 => Byte,
	i16 => Short,
	i32 => Int,
	i64 => Long,
	f32 => Float,
	f64 => Double,
	Vec<u8> => ByteArray,
	NbtString => String,
	List => List,
	Compound => Compound,
	Vec<i32> => IntArray,
	Vec<i64> => LongArray,
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.into())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value.into())
	}
}

/// Homogeneous sequence of unnamed tags sharing one item kind.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
	kind: TagKind,
	items: Vec<Tag>,
}

impl Default for List {
	fn default() -> Self {
		Self::new()
	}
}

impl List {
	/// Empty list whose item kind is set by the first push.
	pub fn new() -> Self {
		Self::with_kind(TagKind::End)
	}

	/// Empty list with a fixed item kind.
	pub fn with_kind(kind: TagKind) -> Self {
		Self { kind, items: Vec::new() }
	}

	pub(crate) fn with_kind_and_capacity(kind: TagKind, capacity: usize) -> Self {
		Self {
			kind,
			items: Vec::with_capacity(capacity),
		}
	}

	/// Build a list from payloads, fixing the item kind from the first one.
	pub fn from_values<I, V>(values: I) -> Result<Self>
	where
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		let mut list = Self::new();
		for value in values {
			list.push(value)?;
		}
		Ok(list)
	}

	/// Declared item kind (`End` for an untyped empty list).
	pub fn kind(&self) -> TagKind {
		self.kind
	}

	/// Append a payload, enforcing homogeneity.
	pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
		self.push_tag(Tag::unnamed(value))
	}

	/// Append a tag, dropping its name, enforcing homogeneity.
	pub fn push_tag(&mut self, mut tag: Tag) -> Result<()> {
		let found = tag.kind();
		if self.items.is_empty() && self.kind == TagKind::End {
			self.kind = found;
		} else if found != self.kind {
			return Err(NbtError::HeterogeneousList { expected: self.kind, found });
		}

		tag.name = None;
		self.items.push(tag);
		Ok(())
	}

	/// Number of elements.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether the list has no elements.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Element by position.
	pub fn get(&self, index: usize) -> Option<&Tag> {
		self.items.get(index)
	}

	/// Iterate elements in order.
	pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
		self.items.iter()
	}

	/// Borrow elements as a slice.
	pub fn as_slice(&self) -> &[Tag] {
		&self.items
	}
}

impl<'a> IntoIterator for &'a List {
	type Item = &'a Tag;
	type IntoIter = std::slice::Iter<'a, Tag>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.iter()
	}
}

/// Mapping of unique names to child tags.
///
/// Iteration follows insertion order, so a decoded compound re-encodes to the
/// same bytes; equality ignores order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
	entries: IndexMap<NbtString, Tag>,
}

impl Compound {
	/// Empty compound.
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert a child under its own name (absent reads as empty), returning the
	/// child it replaced.
	pub fn insert(&mut self, mut tag: Tag) -> Option<Tag> {
		let key = tag.name.take().unwrap_or_default();
		tag.name = Some(key.clone());
		self.entries.insert(key, tag)
	}

	/// Insert a payload under `name`.
	pub fn insert_value(&mut self, name: impl Into<NbtString>, value: impl Into<Value>) -> Option<Tag> {
		self.insert(Tag::named(name, value))
	}

	/// Child by name.
	pub fn get<K: AsRef<[u8]> + ?Sized>(&self, name: &K) -> Option<&Tag> {
		self.entries.get(name.as_ref())
	}

	/// Mutable child by name.
	pub fn get_mut<K: AsRef<[u8]> + ?Sized>(&mut self, name: &K) -> Option<&mut Tag> {
		self.entries.get_mut(name.as_ref())
	}

	/// Remove a child, keeping the order of the rest.
	pub fn remove<K: AsRef<[u8]> + ?Sized>(&mut self, name: &K) -> Option<Tag> {
		self.entries.shift_remove(name.as_ref())
	}

	/// Whether a child exists under `name`.
	pub fn contains<K: AsRef<[u8]> + ?Sized>(&self, name: &K) -> bool {
		self.entries.contains_key(name.as_ref())
	}

	/// Number of children.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether there are no children.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterate child names in insertion order.
	pub fn keys(&self) -> indexmap::map::Keys<'_, NbtString, Tag> {
		self.entries.keys()
	}

	/// Iterate children in insertion order.
	pub fn iter(&self) -> indexmap::map::Values<'_, NbtString, Tag> {
		self.entries.values()
	}

	/// Take the only child, or hand the compound back when it has zero or
	/// several children.
	pub fn into_single(mut self) -> std::result::Result<Tag, Self> {
		if self.entries.len() != 1 {
			return Err(self);
		}
		match self.entries.pop() {
			Some((_, tag)) => Ok(tag),
			None => Err(self),
		}
	}
}

impl<'a> IntoIterator for &'a Compound {
	type Item = &'a Tag;
	type IntoIter = indexmap::map::Values<'a, NbtString, Tag>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.values()
	}
}

impl FromIterator<Tag> for Compound {
	fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
		let mut compound = Self::new();
		for tag in iter {
			compound.insert(tag);
		}
		compound
	}
}

impl fmt::Display for Tag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write_tag(f, self, self.name.as_ref(), 0)
	}
}

fn write_tag(f: &mut fmt::Formatter<'_>, tag: &Tag, name: Option<&NbtString>, depth: usize) -> fmt::Result {
	let pad = "  ".repeat(depth);
	match name {
		Some(name) => write!(f, "{pad}{}('{name}'): ", tag.kind())?,
		None => write!(f, "{pad}{}(None): ", tag.kind())?,
	}

	match &tag.value {
		Value::Byte(v) => writeln!(f, "{v}"),
		Value::Short(v) => writeln!(f, "{v}"),
		Value::Int(v) => writeln!(f, "{v}"),
		Value::Long(v) => writeln!(f, "{v}"),
		Value::Float(v) => writeln!(f, "{v}"),
		Value::Double(v) => writeln!(f, "{v}"),
		Value::ByteArray(v) => writeln!(f, "[{} bytes]", v.len()),
		Value::IntArray(v) => writeln!(f, "[{} ints]", v.len()),
		Value::LongArray(v) => writeln!(f, "[{} longs]", v.len()),
		Value::String(v) => writeln!(f, "'{v}'"),
		Value::List(list) => {
			writeln!(f, "{} entries of {}", list.len(), list.kind())?;
			writeln!(f, "{pad}{{")?;
			for item in list {
				write_tag(f, item, None, depth + 1)?;
			}
			writeln!(f, "{pad}}}")
		}
		Value::Compound(compound) => {
			writeln!(f, "{} entries", compound.len())?;
			writeln!(f, "{pad}{{")?;
			for child in compound {
				write_tag(f, child, Some(child.name()), depth + 1)?;
			}
			writeln!(f, "{pad}}}")
		}
	}
}
