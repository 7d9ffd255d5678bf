use std::borrow::Cow;
use std::fmt;

use crate::nbt::{NbtError, Result, Tag, Value};

/// One parsed operation in a tag path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// Select a compound child by name.
	Key(String),
	/// Select a list or array element by zero-based index.
	Index(usize),
}

/// Parsed tag path expression, relative to the tag it is applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPath {
	/// Ordered sequence of path steps.
	pub steps: Vec<PathStep>,
}

impl TagPath {
	/// Parse `/`-separated compound keys with optional `[index]` selectors.
	///
	/// Keys may contain any character except `/` and `[`, since tag names
	/// routinely carry spaces and punctuation.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = || NbtError::InvalidTagPath { path: input.to_owned() };
		if input.is_empty() {
			return Err(invalid());
		}

		let mut steps = Vec::new();
		for segment in input.split('/') {
			let (key, mut rest) = match segment.find('[') {
				Some(idx) => segment.split_at(idx),
				None => (segment, ""),
			};

			if key.is_empty() && rest.is_empty() {
				return Err(invalid());
			}
			if !key.is_empty() {
				steps.push(PathStep::Key(key.to_owned()));
			}

			while !rest.is_empty() {
				let inner = rest.strip_prefix('[').ok_or_else(invalid)?;
				let close = inner.find(']').ok_or_else(invalid)?;
				let digits = &inner[..close];
				if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
					return Err(invalid());
				}

				let number = digits.parse::<usize>().map_err(|_| invalid())?;
				steps.push(PathStep::Index(number));
				rest = &inner[close + 1..];
			}
		}

		Ok(Self { steps })
	}
}

impl fmt::Display for TagPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (idx, step) in self.steps.iter().enumerate() {
			match step {
				PathStep::Key(key) => {
					if idx > 0 {
						f.write_str("/")?;
					}
					f.write_str(key)?;
				}
				PathStep::Index(index) => write!(f, "[{index}]")?,
			}
		}
		Ok(())
	}
}

impl Tag {
	/// Resolve `path` starting at this tag.
	///
	/// Array elements resolve to owned unnamed scalar tags; everything else is
	/// borrowed from the tree.
	pub fn get_path(&self, path: &TagPath) -> Result<Cow<'_, Tag>> {
		let mut current = Cow::Borrowed(self);
		for (idx, step) in path.steps.iter().enumerate() {
			let not_found = || NbtError::TagPathNotFound {
				path: TagPath {
					steps: path.steps[..=idx].to_vec(),
				}
				.to_string(),
			};

			let Cow::Borrowed(tag) = current else {
				return Err(not_found());
			};
			current = step_into(tag, step).ok_or_else(not_found)?;
		}
		Ok(current)
	}
}

fn step_into<'a>(tag: &'a Tag, step: &PathStep) -> Option<Cow<'a, Tag>> {
	match (step, &tag.value) {
		(PathStep::Key(key), Value::Compound(compound)) => compound.get(key).map(Cow::Borrowed),
		(PathStep::Index(index), Value::List(list)) => list.get(*index).map(Cow::Borrowed),
		(PathStep::Index(index), Value::ByteArray(items)) => items.get(*index).map(|v| Cow::Owned(Tag::unnamed(*v as i8))),
		(PathStep::Index(index), Value::IntArray(items)) => items.get(*index).map(|v| Cow::Owned(Tag::unnamed(*v))),
		(PathStep::Index(index), Value::LongArray(items)) => items.get(*index).map(|v| Cow::Owned(Tag::unnamed(*v))),
		_ => None,
	}
}
