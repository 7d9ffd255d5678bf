use std::fmt;

/// Wire type id of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TagKind {
	/// Compound terminator and empty-list item marker.
	End = 0,
	/// Signed 8-bit integer.
	Byte = 1,
	/// Signed 16-bit integer.
	Short = 2,
	/// Signed 32-bit integer.
	Int = 3,
	/// Signed 64-bit integer.
	Long = 4,
	/// IEEE-754 single precision float.
	Float = 5,
	/// IEEE-754 double precision float.
	Double = 6,
	/// Length-prefixed raw bytes.
	ByteArray = 7,
	/// Length-prefixed UTF-8 text.
	String = 8,
	/// Homogeneous sequence of unnamed payloads.
	List = 9,
	/// Named children terminated by `End`.
	Compound = 10,
	/// Length-prefixed `i32` elements.
	IntArray = 11,
	/// Length-prefixed `i64` elements.
	LongArray = 12,
}

impl TagKind {
	/// Map a wire type id to its kind.
	pub fn from_id(id: u8) -> Option<Self> {
		Some(match id {
			0 => Self::End,
			1 => Self::Byte,
			2 => Self::Short,
			3 => Self::Int,
			4 => Self::Long,
			5 => Self::Float,
			6 => Self::Double,
			7 => Self::ByteArray,
			8 => Self::String,
			9 => Self::List,
			10 => Self::Compound,
			11 => Self::IntArray,
			12 => Self::LongArray,
			_ => return None,
		})
	}

	/// Wire type id.
	pub fn id(self) -> u8 {
		self as u8
	}

	/// Stable label, matching the conventional `TAG_*` naming.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::End => "TAG_End",
			Self::Byte => "TAG_Byte",
			Self::Short => "TAG_Short",
			Self::Int => "TAG_Int",
			Self::Long => "TAG_Long",
			Self::Float => "TAG_Float",
			Self::Double => "TAG_Double",
			Self::ByteArray => "TAG_Byte_Array",
			Self::String => "TAG_String",
			Self::List => "TAG_List",
			Self::Compound => "TAG_Compound",
			Self::IntArray => "TAG_Int_Array",
			Self::LongArray => "TAG_Long_Array",
		}
	}

	/// Every kind in wire-id order.
	pub const ALL: [TagKind; 13] = [
		Self::End,
		Self::Byte,
		Self::Short,
		Self::Int,
		Self::Long,
		Self::Float,
		Self::Double,
		Self::ByteArray,
		Self::String,
		Self::List,
		Self::Compound,
		Self::IntArray,
		Self::LongArray,
	];
}

impl fmt::Display for TagKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
