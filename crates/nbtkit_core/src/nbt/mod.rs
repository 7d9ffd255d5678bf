mod bind;
mod bytes;
mod compression;
mod decode;
mod encode;
mod error;
mod file;
mod kind;
mod path;
mod string;
mod tag;

/// Struct binding traits and entry points.
pub use bind::{FromTag, ToTag, from_bytes, from_reader, marshal, to_bytes, to_writer, unmarshal};
/// Whole-file compression detection and wrapping.
pub use compression::{Compression, GZIP_MAGIC, ZSTD_MAGIC, compress_bytes, decode_bytes};
/// Decoder entry points and options.
pub use decode::{DEFAULT_MAX_DEPTH, DecodeOptions, Decoder, decode, decode_reader, decode_with};
/// Encoder entry points.
pub use encode::{Encoder, encode, encode_to_vec};
/// Error and result aliases.
pub use error::{NbtError, Result};
/// File abstraction.
pub use file::NbtFile;
/// Wire type ids.
pub use kind::TagKind;
/// Tag path parser types.
pub use path::{PathStep, TagPath};
/// Opaque name and string bytes.
pub use string::NbtString;
/// Tag tree model.
pub use tag::{Compound, List, Tag, Value};
