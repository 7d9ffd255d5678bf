use crate::NbtBind;

#[derive(Debug, Default, Clone, PartialEq, NbtBind)]
struct Hello {
	#[nbt(name = "name")]
	name: String,
}

#[derive(Debug, Default, Clone, PartialEq, NbtBind)]
struct HelloDoc {
	#[nbt(name = "hello world")]
	root: Hello,
}

#[derive(Debug, Default, Clone, PartialEq, NbtBind)]
struct Food {
	#[nbt]
	name: String,
	#[nbt]
	value: f32,
}

#[derive(Debug, Default, Clone, PartialEq, NbtBind)]
struct Pantry {
	#[nbt]
	ham: Food,
	#[nbt]
	egg: Food,
}

#[derive(Debug, Default, Clone, PartialEq, NbtBind)]
struct Entry {
	#[nbt(name = "created-on")]
	created_on: i64,
	#[nbt]
	name: String,
}

#[derive(Debug, Default, Clone, PartialEq, NbtBind)]
struct Level {
	#[nbt(name = "longTest")]
	long_test: i64,
	#[nbt(name = "shortTest")]
	short_test: i16,
	#[nbt(name = "stringTest")]
	string_test: String,
	#[nbt(name = "floatTest")]
	float_test: f32,
	#[nbt(name = "intTest")]
	int_test: i32,
	#[nbt(name = "nested compound test")]
	nested: Pantry,
	#[nbt(name = "listTest (long)")]
	longs: Vec<i64>,
	#[nbt(name = "byteTest")]
	byte_test: i8,
	#[nbt(name = "listTest (compound)")]
	entries: Vec<Entry>,
	#[nbt(name = "byteArrayTest (the first 1000 values of (n*n*255+n*7)%100, starting with n=0 (0, 62, 34, 16, 8, ...))")]
	bytes: Vec<u8>,
	#[nbt(name = "doubleTest")]
	double_test: f64,
}

#[derive(Debug, Default, Clone, PartialEq, NbtBind)]
struct BigTest {
	#[nbt(name = "Level")]
	level: Level,
}

mod fixtures {

	use nbtkit_testkit::{BIGTEST_CREATED_ON, BIGTEST_STRING, bigtest_byte_array, bigtest_bytes, hello_world_bytes};

	use super::{BigTest, Hello, HelloDoc};
	use crate::nbt::{DecodeOptions, from_bytes, from_reader, to_bytes};

	#[test]
	fn hello_world_binds_by_root_name() {
		let doc: HelloDoc = from_bytes(&hello_world_bytes()).expect("bind succeeds");
		assert_eq!(doc.root.name, "Bananrama");
	}

	#[test]
	fn hello_world_marshals_to_fixture() {
		let doc = HelloDoc {
			root: Hello { name: "Bananrama".to_owned() },
		};
		assert_eq!(to_bytes(&doc).expect("marshal succeeds"), hello_world_bytes());
	}

	#[test]
	fn bigtest_binds_every_field() {
		let doc: BigTest = from_reader(bigtest_bytes().as_slice(), &DecodeOptions::default()).expect("bind succeeds");
		let level = &doc.level;

		assert_eq!(level.short_test, 32767);
		assert_eq!(level.long_test, 9_223_372_036_854_775_807);
		assert_eq!(level.byte_test, 127);
		assert_eq!(level.int_test, i32::MAX);
		assert_eq!(level.string_test, BIGTEST_STRING);
		assert_eq!(level.float_test, 0.498_231_47);
		assert_eq!(level.double_test, 0.493_128_713_218_231_5);
		assert_eq!(level.longs, vec![11, 12, 13, 14, 15]);
		assert_eq!(level.bytes, bigtest_byte_array());
		assert_eq!(level.nested.ham.name, "Hampus");
		assert_eq!(level.nested.egg.value, 0.5);
		assert_eq!(level.entries.len(), 2);
		assert_eq!(level.entries[0].name, "Compound tag #0");
		assert!(level.entries.iter().all(|entry| entry.created_on == BIGTEST_CREATED_ON));
	}

	#[test]
	fn bigtest_marshals_to_identical_bytes() {
		let bytes = bigtest_bytes();
		let doc: BigTest = from_bytes(&bytes).expect("bind succeeds");
		assert_eq!(to_bytes(&doc).expect("marshal succeeds"), bytes);
	}

	#[test]
	fn empty_input_yields_default() {
		let doc: BigTest = from_bytes(&[]).expect("bind succeeds");
		assert_eq!(doc, BigTest::default());
	}
}

mod unmarshal_rules {

	use super::{Food, Hello, Pantry};
	use crate::NbtBind;
	use crate::nbt::{Compound, FromTag, List, NbtError, NbtString, Tag, Value, marshal, unmarshal};

	#[derive(Debug, Default, PartialEq, NbtBind)]
	struct Pair {
		#[nbt]
		a: i32,
		#[nbt]
		b: i32,
		untouched: i32,
	}

	#[derive(Debug, Default, PartialEq, NbtBind)]
	struct Scalars {
		#[nbt]
		byte: u8,
		#[nbt]
		small: i8,
		#[nbt]
		wide: f64,
		#[nbt]
		flag: bool,
		#[nbt]
		maybe: Option<String>,
		#[nbt]
		ints: Vec<i32>,
		#[nbt]
		raw: Option<Tag>,
	}

	#[derive(Debug, Default, PartialEq, NbtBind)]
	struct Wrapper<T> {
		#[nbt]
		value: T,
	}

	// A compound whose children bind directly, without the root wrapping.
	fn doc(children: Vec<Tag>) -> Tag {
		Tag::named("", children.into_iter().collect::<Compound>())
	}

	#[test]
	fn absent_fields_are_left_alone() {
		let mut out = Pair { a: 5, b: 6, untouched: 7 };
		unmarshal(&Tag::named("a", 1_i32), &mut out).expect("bind succeeds");
		assert_eq!(out, Pair { a: 1, b: 6, untouched: 7 });
	}

	#[test]
	fn nested_records_merge() {
		let mut out = Pantry {
			ham: Food {
				name: "kept".to_owned(),
				value: 1.0,
			},
			egg: Food::default(),
		};
		let mut ham = Compound::new();
		ham.insert_value("value", 2.5_f32);
		unmarshal(&Tag::named("ham", ham), &mut out).expect("bind succeeds");

		assert_eq!(out.ham.name, "kept");
		assert_eq!(out.ham.value, 2.5);
	}

	#[test]
	fn record_from_non_compound() {
		let mut out = Pantry::default();
		let err = unmarshal(&Tag::named("ham", 1_i32), &mut out).expect_err("ham is not a compound");
		assert!(matches!(err, NbtError::TypeMismatch { expected: "Food", .. }));
	}

	#[test]
	fn checked_scalar_conversions() {
		let tree = doc(vec![
			Tag::named("byte", -1_i8),
			Tag::named("small", 5_i32),
			Tag::named("wide", 0.25_f32),
			Tag::named("flag", 1_i8),
			Tag::named("maybe", "here"),
			Tag::named("ints", vec![1_i32, 2, 3]),
			Tag::named("raw", 9_i16),
		]);
		let mut out = Scalars::default();
		out.merge_from(&tree).expect("bind succeeds");

		assert_eq!(out.byte, 255);
		assert_eq!(out.small, 5);
		assert_eq!(out.wide, 0.25);
		assert!(out.flag);
		assert_eq!(out.maybe.as_deref(), Some("here"));
		assert_eq!(out.ints, vec![1, 2, 3]);
		assert_eq!(out.raw, Some(Tag::named("raw", 9_i16)));
	}

	#[test]
	fn int_list_binds_like_int_array() {
		let tree = doc(vec![Tag::named("ints", List::from_values([4_i32, 5]).expect("list"))]);
		let mut out = Scalars::default();
		out.merge_from(&tree).expect("bind succeeds");
		assert_eq!(out.ints, vec![4, 5]);
	}

	#[test]
	fn out_of_range_integer() {
		let mut out = Scalars::default();
		let err = out.merge_from(&doc(vec![Tag::named("small", 300_i32)])).expect_err("300 does not fit i8");
		assert!(matches!(err, NbtError::TypeMismatch { expected: "i8", .. }));
	}

	#[test]
	fn mismatched_kinds() {
		let cases = [
			Tag::named("flag", 2_i8),
			Tag::named("maybe", 1_i32),
			Tag::named("wide", "text"),
			Tag::named("ints", "text"),
		];
		for case in cases {
			let mut out = Scalars::default();
			let err = out.merge_from(&doc(vec![case.clone()])).expect_err("kind mismatch");
			assert!(matches!(err, NbtError::TypeMismatch { .. }), "{}", case.name());
		}
	}

	#[test]
	fn f32_rejects_double() {
		let mut out = Food::default();
		let err = unmarshal(&Tag::named("value", Value::Double(0.5)), &mut out).expect_err("double into f32");
		assert!(matches!(err, NbtError::TypeMismatch { expected: "f32", .. }));
	}

	#[test]
	fn generic_record() {
		let mut out = Wrapper::<i64>::default();
		unmarshal(&Tag::named("value", 3_i8), &mut out).expect("bind succeeds");
		assert_eq!(out.value, 3);
	}

	#[test]
	fn root_with_other_name_is_ignored() {
		let mut out = Hello::default();
		unmarshal(&Tag::named("other", "x"), &mut out).expect("bind succeeds");
		assert_eq!(out, Hello::default());
	}

	#[derive(Debug, Default, NbtBind)]
	struct Label {
		#[nbt]
		text: String,
	}

	#[derive(Debug, Default, NbtBind)]
	struct RawLabel {
		#[nbt]
		text: NbtString,
	}

	#[test]
	fn modified_utf8_binds_only_to_raw_strings() {
		let raw = NbtString::from_bytes(vec![b'x', 0xC0, 0x80]);
		let tree = doc(vec![Tag::named("text", raw.clone())]);

		let mut text = Label::default();
		let err = text.merge_from(&tree).expect_err("not UTF-8");
		assert!(matches!(err, NbtError::TypeMismatch { expected: "String", .. }));

		let mut bytes = RawLabel::default();
		bytes.merge_from(&tree).expect("bind succeeds");
		assert_eq!(bytes.text, raw);

		let back = marshal(&bytes).expect("marshal succeeds");
		assert_eq!(back.find("text").map(|t| &t.value), Some(&Value::String(raw)));
	}
}

mod marshal_rules {

	use std::collections::HashMap;

	use super::{Food, Hello};
	use crate::NbtBind;
	use crate::nbt::{List, NbtError, Tag, TagKind, Value, marshal, to_bytes};

	#[derive(Debug, Default, NbtBind)]
	struct Optional {
		#[nbt]
		present: Option<i16>,
		#[nbt]
		missing: Option<i16>,
		skipped: u64,
	}

	#[derive(Debug, Default, NbtBind)]
	struct Arrays {
		#[nbt]
		bytes: Vec<u8>,
		#[nbt]
		signed: Vec<i8>,
		#[nbt]
		flags: Vec<bool>,
	}

	#[derive(Debug, Default, NbtBind)]
	struct Unsupported {
		#[nbt]
		count: u32,
	}

	#[derive(Debug, Default, NbtBind)]
	struct Items {
		#[nbt]
		items: Vec<Food>,
	}

	#[derive(Debug, Default, NbtBind)]
	struct Table {
		#[nbt]
		table: HashMap<String, i32>,
	}

	#[test]
	fn scalar_root_is_unnamed() {
		let tag = marshal(&5_i32).expect("marshal succeeds");
		assert_eq!(tag, Tag::named("", 5_i32));
		assert_eq!(marshal("text").expect("marshal succeeds").value, Value::from("text"));
		assert_eq!(marshal(&true).expect("marshal succeeds").value, Value::Byte(1));
	}

	#[test]
	fn single_field_root_unwraps() {
		let tag = marshal(&Hello { name: "x".to_owned() }).expect("marshal succeeds");
		assert_eq!(tag, Tag::named("name", "x"));
	}

	#[test]
	fn multi_field_root_stays_wrapped() {
		let tag = marshal(&Food {
			name: "Hampus".to_owned(),
			value: 0.75,
		})
		.expect("marshal succeeds");

		assert_eq!(tag.name(), "");
		assert_eq!(tag.as_compound().map(|c| c.len()), Some(2));
	}

	#[test]
	fn none_options_and_unbound_fields_are_omitted() {
		let value = Optional {
			present: Some(3),
			missing: None,
			skipped: u64::MAX,
		};
		let tag = marshal(&value).expect("marshal succeeds");
		assert_eq!(tag, Tag::named("present", 3_i16));
	}

	#[test]
	fn empty_record_marshals_to_empty_compound() {
		let tag = marshal(&Optional::default()).expect("marshal succeeds");
		assert_eq!(tag.as_compound().map(|c| c.is_empty()), Some(true));
	}

	#[test]
	fn byte_vectors_become_byte_arrays() {
		let value = Arrays {
			bytes: vec![],
			signed: vec![-1, 2],
			flags: vec![true, false],
		};
		let tag = marshal(&value).expect("marshal succeeds");

		assert_eq!(tag.find("bytes").map(|t| &t.value), Some(&Value::ByteArray(Vec::new())));
		assert_eq!(tag.find("signed").map(|t| &t.value), Some(&Value::ByteArray(vec![0xFF, 2])));
		let flags = tag.find("flags").and_then(|t| t.as_list()).expect("flags list");
		assert_eq!(flags.kind(), TagKind::Byte);
		assert_eq!(flags.len(), 2);
	}

	#[test]
	fn record_vectors_become_compound_lists() {
		let value = Items {
			items: vec![Food::default(), Food::default()],
		};
		let tag = marshal(&value).expect("marshal succeeds");
		let list = tag.as_list().expect("root unwraps to the list");

		assert_eq!(tag.name(), "items");
		assert_eq!(list.kind(), TagKind::Compound);
		assert_eq!(list.len(), 2);
	}

	#[test]
	fn empty_sequences_are_rejected() {
		let err = marshal(&Items::default()).expect_err("empty list");
		assert!(matches!(err, NbtError::EmptyList));

		let err = to_bytes(&Vec::<String>::new()).expect_err("empty list");
		assert!(matches!(err, NbtError::EmptyList));
	}

	#[test]
	fn unsupported_types() {
		let err = marshal(&Unsupported { count: 1 }).expect_err("u32 has no tag");
		assert!(matches!(err, NbtError::UnsupportedType { type_name: "u32" }));

		let err = marshal(&Table::default()).expect_err("maps have no tag");
		assert!(matches!(err, NbtError::UnsupportedType { type_name: "HashMap" }));

		assert!(matches!(marshal(&'c'), Err(NbtError::UnsupportedType { type_name: "char" })));
	}

	#[test]
	fn tag_values_marshal_verbatim() {
		let list = List::from_values([1_i64, 2]).expect("list");
		let tag = marshal(&Tag::named("ignored", list.clone())).expect("marshal succeeds");
		assert_eq!(tag, Tag::named("", list));
	}
}
