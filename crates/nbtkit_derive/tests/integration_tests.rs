#![allow(missing_docs)]

use nbtkit::NbtBind;
use nbtkit::nbt::{FromTag, NbtError, Tag, ToTag, Value, from_bytes, to_bytes};

#[test]
fn test_named_and_bare_attributes() {
	#[derive(Debug, Default, PartialEq, NbtBind)]
	struct Player {
		#[nbt(name = "Name")]
		name: String,
		#[nbt]
		health: i16,
		#[nbt(name = "r#type")]
		r#type: i8,
		#[nbt]
		r#ref: i32,
		cache: Vec<u8>,
	}

	let player = Player {
		name: "Steve".to_owned(),
		health: 20,
		r#type: 3,
		r#ref: 9,
		cache: vec![1, 2],
	};
	let value = player.to_value().expect("to_value succeeds");
	let Value::Compound(compound) = &value else {
		panic!("records marshal to compounds");
	};

	assert_eq!(compound.keys().collect::<Vec<_>>(), vec!["Name", "health", "r#type", "ref"]);

	let back = Player::from_tag(&Tag::unnamed(value.clone())).expect("from_tag succeeds");
	assert_eq!(back, Player { cache: Vec::new(), ..player });
}

#[test]
fn test_nested_and_sequence_fields() {
	#[derive(Debug, Default, Clone, PartialEq, NbtBind)]
	struct Slot {
		#[nbt]
		id: String,
		#[nbt]
		count: i8,
	}

	#[derive(Debug, Default, PartialEq, NbtBind)]
	struct Inventory {
		#[nbt(name = "Items")]
		items: Vec<Slot>,
		#[nbt(name = "Pos")]
		pos: Vec<f64>,
		#[nbt(name = "Selected")]
		selected: Option<Slot>,
	}

	#[derive(Debug, Default, PartialEq, NbtBind)]
	struct Doc {
		#[nbt(name = "")]
		inventory: Inventory,
	}

	let slot = Slot {
		id: "minecraft:stone".to_owned(),
		count: 64,
	};
	let doc = Doc {
		inventory: Inventory {
			items: vec![slot.clone(), slot.clone()],
			pos: vec![0.5, 64.0, -3.25],
			selected: Some(slot),
		},
	};

	let bytes = to_bytes(&doc).expect("marshal succeeds");
	let back: Doc = from_bytes(&bytes).expect("unmarshal succeeds");
	assert_eq!(back, doc);
}

#[test]
fn test_generic_record() {
	#[derive(Debug, Default, PartialEq, NbtBind)]
	struct Pair<A, B> {
		#[nbt]
		left: A,
		#[nbt]
		right: B,
	}

	let pair = Pair { left: 1_i64, right: "two".to_owned() };
	let value = pair.to_value().expect("to_value succeeds");
	let back = Pair::<i64, String>::from_tag(&Tag::unnamed(value)).expect("from_tag succeeds");
	assert_eq!(back, pair);
}

#[test]
fn test_type_errors_name_the_record() {
	#[derive(Debug, Default, NbtBind)]
	struct Inner {
		#[nbt]
		x: i32,
	}

	let err = Inner::from_tag(&Tag::unnamed(5_i32)).expect_err("not a compound");
	assert!(matches!(err, NbtError::TypeMismatch { expected: "Inner", .. }));
}
