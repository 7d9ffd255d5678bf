use nbtkit::nbt::{Compression, Result, Tag, Value};
use serde_json::{Map, Value as JsonValue};

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	let text = serde_json::to_string_pretty(payload).map_err(std::io::Error::from)?;
	println!("{text}");
	Ok(())
}

/// Parse a `--compression` label.
pub(crate) fn parse_compression(label: &str) -> std::result::Result<Compression, String> {
	Compression::from_label(label).ok_or_else(|| format!("unknown compression '{label}', expected none, gzip, zlib, or zstd"))
}

/// Convert a tag payload to JSON.
///
/// Compounds become objects, lists and arrays become arrays, and non-finite
/// floats become `null`.
pub(crate) fn tag_to_json(tag: &Tag) -> JsonValue {
	value_to_json(&tag.value)
}

fn value_to_json(value: &Value) -> JsonValue {
	match value {
		Value::Byte(v) => serde_json::json!(v),
		Value::Short(v) => serde_json::json!(v),
		Value::Int(v) => serde_json::json!(v),
		Value::Long(v) => serde_json::json!(v),
		Value::Float(v) => serde_json::json!(v),
		Value::Double(v) => serde_json::json!(v),
		Value::ByteArray(v) => serde_json::json!(v),
		Value::String(v) => serde_json::json!(v.to_string_lossy()),
		Value::IntArray(v) => serde_json::json!(v),
		Value::LongArray(v) => serde_json::json!(v),
		Value::List(list) => JsonValue::Array(list.iter().map(tag_to_json).collect()),
		Value::Compound(compound) => {
			let fields: Map<String, JsonValue> = compound.iter().map(|child| (child.name().to_string_lossy().into_owned(), tag_to_json(child))).collect();
			JsonValue::Object(fields)
		}
	}
}
