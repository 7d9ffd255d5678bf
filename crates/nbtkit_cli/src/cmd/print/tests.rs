use std::fmt;
use std::path::PathBuf;

use nbtkit::nbt::{Compound, List, NbtString, Tag};

use super::{Args, PrintOptions, options_for, render_tag, write_tag};
use crate::cmd::test_support::fixture_root;

#[test]
fn hello_world_matches_display() {
	let root = fixture_root("hello_world.nbt");
	assert_eq!(render_tag(&root, PrintOptions::default()), root.to_string());
}

#[test]
fn long_lists_are_truncated() {
	let list = List::from_values(0_i32..10).expect("list");
	let options = PrintOptions {
		max_items: 3,
		..PrintOptions::default()
	};
	let text = render_tag(&Tag::named("l", list), options);

	assert!(text.starts_with("TAG_List('l'): 10 entries of TAG_Int\n{\n"));
	assert!(text.contains("  TAG_Int(None): 2\n"));
	assert!(!text.contains("TAG_Int(None): 3\n"));
	assert!(text.contains("  ... 7 more\n"));
}

#[test]
fn depth_limit_collapses_containers() {
	let mut inner = Compound::new();
	inner.insert_value("x", 1_i8);
	let mut root = Compound::new();
	root.insert_value("inner", inner);

	let options = PrintOptions {
		max_depth: 1,
		..PrintOptions::default()
	};
	let text = render_tag(&Tag::named("root", root), options);

	assert_eq!(text, "TAG_Compound('root'): 1 entries\n{\n  TAG_Compound('inner'): 1 entries { ... }\n}\n");
}

#[test]
fn arrays_and_strings_are_previewed() {
	let mut root = Compound::new();
	root.insert_value("bytes", vec![1_u8, 2, 3, 4, 5]);
	root.insert_value("text", "abcdefghij");
	let options = PrintOptions {
		max_array_preview: 2,
		max_string_len: 4,
		..PrintOptions::default()
	};
	let text = render_tag(&Tag::named("", root), options);

	assert!(text.contains("TAG_Byte_Array('bytes'): [5 bytes] 1, 2, ...\n"), "{text}");
	assert!(text.contains("TAG_String('text'): 'abcd...'\n"), "{text}");
}

#[test]
fn compact_flag_selects_preset() {
	let args = Args {
		path: PathBuf::from("level.dat"),
		max_depth: None,
		max_items: Some(20),
		compact: true,
	};
	let options = options_for(&args);
	let compact = PrintOptions::compact();

	assert_eq!(options.max_depth, compact.max_depth);
	assert_eq!(options.max_string_len, compact.max_string_len);
	assert_eq!(options.max_items, 20);
}

#[test]
fn limits_without_compact_use_defaults() {
	let args = Args {
		path: PathBuf::from("level.dat"),
		max_depth: Some(2),
		max_items: None,
		compact: false,
	};
	let options = options_for(&args);

	assert_eq!(options.max_depth, 2);
	assert_eq!(options.max_items, PrintOptions::default().max_items);
}

struct RejectingWriter;

impl fmt::Write for RejectingWriter {
	fn write_str(&mut self, _: &str) -> fmt::Result {
		Err(fmt::Error)
	}
}

#[test]
fn writer_errors_propagate_from_scalars() {
	let tag = Tag::named("b", 1_i8);
	assert!(write_tag(&mut RejectingWriter, &tag, 0, PrintOptions::default()).is_err());
}

#[test]
fn non_utf8_names_render_lossily() {
	let tag = Tag::named(NbtString::from_bytes(vec![b'a', 0xFF]), "x");
	assert_eq!(render_tag(&tag, PrintOptions::default()), "TAG_String('a\u{fffd}'): 'x'\n");
}
