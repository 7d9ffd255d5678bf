use std::borrow::{Borrow, Cow};
use std::fmt;
use std::ops::Deref;

/// Tag name or string payload, kept as the exact bytes found on the wire.
///
/// Writers commonly emit Java's modified UTF-8 (NUL as `C0 80`, astral
/// characters as surrogate pairs), which is not valid UTF-8. The bytes are
/// never validated or transcoded, so such documents re-encode unchanged.
/// Text views are available through [`NbtString::to_str`] and
/// [`NbtString::to_string_lossy`].
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NbtString(Vec<u8>);

impl NbtString {
	/// Empty string.
	pub const fn new() -> Self {
		Self(Vec::new())
	}

	/// Wrap raw bytes without inspecting them.
	pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
		Self(bytes.into())
	}

	/// Raw bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	/// Give up the raw bytes.
	pub fn into_bytes(self) -> Vec<u8> {
		self.0
	}

	/// Borrow as `&str` when the bytes are valid UTF-8.
	pub fn to_str(&self) -> Option<&str> {
		std::str::from_utf8(&self.0).ok()
	}

	/// Text with invalid sequences replaced by U+FFFD.
	pub fn to_string_lossy(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.0)
	}

	/// Convert into `String`, handing the bytes back when they are not UTF-8.
	pub fn into_string(self) -> std::result::Result<String, Self> {
		String::from_utf8(self.0).map_err(|err| Self(err.into_bytes()))
	}
}

impl Deref for NbtString {
	type Target = [u8];

	fn deref(&self) -> &[u8] {
		&self.0
	}
}

impl AsRef<[u8]> for NbtString {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

// Compound lookups hash `[u8]` keys; `Vec<u8>` hashes identically.
impl Borrow<[u8]> for NbtString {
	fn borrow(&self) -> &[u8] {
		&self.0
	}
}

impl From<&str> for NbtString {
	fn from(value: &str) -> Self {
		Self(value.as_bytes().to_vec())
	}
}

impl From<String> for NbtString {
	fn from(value: String) -> Self {
		Self(value.into_bytes())
	}
}

impl From<&String> for NbtString {
	fn from(value: &String) -> Self {
		Self::from(value.as_str())
	}
}

impl From<Vec<u8>> for NbtString {
	fn from(value: Vec<u8>) -> Self {
		Self(value)
	}
}

impl From<&[u8]> for NbtString {
	fn from(value: &[u8]) -> Self {
		Self(value.to_vec())
	}
}

impl PartialEq<str> for NbtString {
	fn eq(&self, other: &str) -> bool {
		self.0 == other.as_bytes()
	}
}

impl PartialEq<&str> for NbtString {
	fn eq(&self, other: &&str) -> bool {
		self.0 == other.as_bytes()
	}
}

impl PartialEq<String> for NbtString {
	fn eq(&self, other: &String) -> bool {
		self.0 == other.as_bytes()
	}
}

impl PartialEq<[u8]> for NbtString {
	fn eq(&self, other: &[u8]) -> bool {
		self.0 == other
	}
}

impl fmt::Debug for NbtString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.to_str() {
			Some(text) => fmt::Debug::fmt(text, f),
			None => write!(f, "b\"{}\"", self.0.escape_ascii()),
		}
	}
}

impl fmt::Display for NbtString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_string_lossy())
	}
}
