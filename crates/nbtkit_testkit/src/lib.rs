//! Shared test helpers for workspace crates.
//!
//! Fixture streams are assembled byte by byte here, without going through the
//! library encoder, so codec tests compare against an independent source.

use std::path::{Path, PathBuf};

/// Root name of the hello world fixture.
pub const HELLO_WORLD_ROOT: &str = "hello world";
/// Root name of the big test fixture.
pub const BIGTEST_ROOT: &str = "Level";
/// Name of the big test byte array child.
pub const BIGTEST_BYTE_ARRAY_NAME: &str = "byteArrayTest (the first 1000 values of (n*n*255+n*7)%100, starting with n=0 (0, 62, 34, 16, 8, ...))";
/// `stringTest` payload of the big test fixture.
pub const BIGTEST_STRING: &str = "HELLO WORLD THIS IS A TEST STRING \u{c5}\u{c4}\u{d6}!";
/// `created-on` payload of the big test compound list entries.
pub const BIGTEST_CREATED_ON: i64 = 1_264_099_775_885;

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Append-only big-endian writer for hand-built streams.
#[derive(Debug, Default, Clone)]
pub struct ByteBuilder {
	bytes: Vec<u8>,
}

impl ByteBuilder {
	/// Empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Named header: type id, u16 name length, name bytes.
	pub fn header(mut self, id: u8, name: &str) -> Self {
		self.bytes.push(id);
		self.str(name)
	}

	/// Single raw byte.
	pub fn u8(mut self, value: u8) -> Self {
		self.bytes.push(value);
		self
	}

	/// Raw byte run.
	pub fn raw(mut self, bytes: &[u8]) -> Self {
		self.bytes.extend_from_slice(bytes);
		self
	}

	/// Big-endian `i16`.
	pub fn i16(self, value: i16) -> Self {
		self.raw(&value.to_be_bytes())
	}

	/// Big-endian `i32`.
	pub fn i32(self, value: i32) -> Self {
		self.raw(&value.to_be_bytes())
	}

	/// Big-endian `i64`.
	pub fn i64(self, value: i64) -> Self {
		self.raw(&value.to_be_bytes())
	}

	/// Big-endian `f32` bit pattern.
	pub fn f32(self, value: f32) -> Self {
		self.raw(&value.to_bits().to_be_bytes())
	}

	/// Big-endian `f64` bit pattern.
	pub fn f64(self, value: f64) -> Self {
		self.raw(&value.to_bits().to_be_bytes())
	}

	/// u16 length-prefixed text.
	pub fn str(self, value: &str) -> Self {
		let len = u16::try_from(value.len()).unwrap_or(u16::MAX);
		self.raw(&len.to_be_bytes()).raw(value.as_bytes())
	}

	/// Compound terminator.
	pub fn end(self) -> Self {
		self.u8(0)
	}

	/// Finish and return the bytes.
	pub fn build(self) -> Vec<u8> {
		self.bytes
	}
}

/// Uncompressed hello world document: `hello world { name: "Bananrama" }`.
pub fn hello_world_bytes() -> Vec<u8> {
	ByteBuilder::new()
		.header(10, HELLO_WORLD_ROOT)
		.header(8, "name")
		.str("Bananrama")
		.end()
		.build()
}

/// First 1000 values of `(n*n*255 + n*7) % 100`.
pub fn bigtest_byte_array() -> Vec<u8> {
	(0_u32..1000).map(|n| ((n * n * 255 + n * 7) % 100) as u8).collect()
}

/// Uncompressed big test document.
pub fn bigtest_bytes() -> Vec<u8> {
	let food = |b: ByteBuilder, key: &str, name: &str, value: f32| b.header(10, key).header(8, "name").str(name).header(5, "value").f32(value).end();
	let entry = |b: ByteBuilder, name: &str| b.header(4, "created-on").i64(BIGTEST_CREATED_ON).header(8, "name").str(name).end();

	let mut b = ByteBuilder::new()
		.header(10, BIGTEST_ROOT)
		.header(4, "longTest")
		.i64(i64::MAX)
		.header(2, "shortTest")
		.i16(i16::MAX)
		.header(8, "stringTest")
		.str(BIGTEST_STRING)
		.header(5, "floatTest")
		.f32(0.498_231_47)
		.header(3, "intTest")
		.i32(i32::MAX)
		.header(10, "nested compound test");
	b = food(b, "ham", "Hampus", 0.75);
	b = food(b, "egg", "Eggbert", 0.5);
	b = b.end().header(9, "listTest (long)").u8(4).i32(5);
	for value in 11..=15 {
		b = b.i64(value);
	}
	b = b.header(1, "byteTest").u8(127).header(9, "listTest (compound)").u8(10).i32(2);
	b = entry(b, "Compound tag #0");
	b = entry(b, "Compound tag #1");

	let array = bigtest_byte_array();
	b.header(7, BIGTEST_BYTE_ARRAY_NAME)
		.i32(array.len() as i32)
		.raw(&array)
		.header(6, "doubleTest")
		.f64(0.493_128_713_218_231_5)
		.end()
		.build()
}
