use nbtkit::nbt::{NbtError, Tag, Value};

use super::select;
use crate::cmd::test_support::fixture_root;
use crate::cmd::util::tag_to_json;

#[test]
fn select_without_path_is_root() {
	let root = fixture_root("hello_world.nbt");
	assert_eq!(select(&root, None).expect("select succeeds").name(), "hello world");
}

#[test]
fn select_by_path() {
	let root = fixture_root("bigtest.nbt");
	let tag = select(&root, Some("listTest (compound)[0]/name")).expect("select succeeds");
	assert_eq!(tag.value.as_str(), Some("Compound tag #0"));
}

#[test]
fn select_reports_bad_paths() {
	let root = fixture_root("bigtest.nbt");
	assert!(matches!(select(&root, Some("a//b")), Err(NbtError::InvalidTagPath { .. })));
	assert!(matches!(select(&root, Some("nope")), Err(NbtError::TagPathNotFound { .. })));
}

#[test]
fn json_mirrors_tree_shape() {
	let root = fixture_root("bigtest.nbt");
	let json = tag_to_json(&root);

	assert_eq!(json["shortTest"], 32767);
	assert_eq!(json["longTest"], i64::MAX);
	assert_eq!(json["nested compound test"]["egg"]["name"], "Eggbert");
	assert_eq!(json["listTest (long)"], serde_json::json!([11, 12, 13, 14, 15]));
	assert_eq!(json["listTest (compound)"][1]["created-on"], 1_264_099_775_885_i64);
	assert!(json["doubleTest"].is_f64());
}

#[test]
fn json_nan_is_null() {
	let json = tag_to_json(&Tag::unnamed(Value::Double(f64::NAN)));
	assert!(json.is_null());
}
