use std::path::PathBuf;

use nbtkit::nbt::{NbtFile, Tag};
use nbtkit_testkit::fixture_path as shared_fixture_path;

pub(crate) fn fixture_path(name: &str) -> PathBuf {
	shared_fixture_path(name)
}

pub(crate) fn fixture_root(name: &str) -> Tag {
	NbtFile::open(fixture_path(name)).expect("fixture opens").root
}

pub(crate) fn scratch_path(name: &str) -> PathBuf {
	std::env::temp_dir().join(format!("nbtkit-cli-{}-{name}", std::process::id()))
}
