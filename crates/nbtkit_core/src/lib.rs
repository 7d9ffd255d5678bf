//! Public library API for reading, writing, and binding NBT tag trees.

extern crate self as nbtkit;

/// Tag model, codec, struct binding, and file helpers.
pub mod nbt;

/// Derive `FromTag` and `ToTag` for structs with `#[nbt(name = "...")]` fields.
pub use nbtkit_derive::NbtBind;
