use thiserror::Error;

use crate::nbt::TagKind;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, NbtError>;

/// Errors produced while decoding, encoding, and binding NBT data.
#[derive(Debug, Error)]
pub enum NbtError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Source ran out of bytes in the middle of a structure.
	#[error("truncated input at offset {at}, need {need} more bytes")]
	TruncatedInput {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
	},
	/// Type id outside the fixed tag enumeration.
	#[error("unknown tag type {id} at offset {at}")]
	UnknownTagType {
		/// Offending type id.
		id: u8,
		/// Byte offset of the type id.
		at: usize,
	},
	/// Array or list count was negative.
	#[error("negative {kind} length {len} at offset {at}")]
	NegativeLength {
		/// Tag kind carrying the count.
		kind: TagKind,
		/// Parsed signed count.
		len: i32,
		/// Byte offset of the count.
		at: usize,
	},
	/// List declared `End` items with a non-zero count.
	#[error("list of {kind} cannot hold {count} items")]
	InvalidListItemType {
		/// Declared item kind.
		kind: TagKind,
		/// Declared item count.
		count: usize,
	},
	/// Decoder recursion depth exceeded configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DecodeDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Requested array or list length exceeded configured limit.
	#[error("decode array too large: count={count}, max={max}")]
	DecodeArrayTooLarge {
		/// Requested element count.
		count: usize,
		/// Maximum permitted element count.
		max: usize,
	},
	/// A list with no elements cannot carry an item type.
	#[error("cannot encode an empty list")]
	EmptyList,
	/// List element does not share the list item type.
	#[error("heterogeneous list: expected {expected}, got {found}")]
	HeterogeneousList {
		/// List item kind.
		expected: TagKind,
		/// Kind of the rejected element.
		found: TagKind,
	},
	/// Length does not fit its wire-format prefix.
	#[error("{what} length {len} exceeds maximum {max}")]
	LengthOverflow {
		/// Which length field overflowed.
		what: &'static str,
		/// Actual length.
		len: usize,
		/// Largest encodable length.
		max: usize,
	},
	/// Bound field type cannot hold the source tag value.
	#[error("type mismatch: expected {expected}, got {found}")]
	TypeMismatch {
		/// Logical type the field accepts.
		expected: &'static str,
		/// Description of the source value.
		found: String,
	},
	/// Value kind has no tag representation.
	#[error("unsupported type: {type_name}")]
	UnsupportedType {
		/// Rust type description.
		type_name: &'static str,
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// File contained no root tag.
	#[error("document is empty")]
	EmptyDocument,
	/// Tag path expression syntax is invalid.
	#[error("invalid tag path: {path}")]
	InvalidTagPath {
		/// Original user-provided path string.
		path: String,
	},
	/// Tag path did not resolve to a node.
	#[error("tag path not found: {path}")]
	TagPathNotFound {
		/// Path prefix that failed to resolve.
		path: String,
	},
}
