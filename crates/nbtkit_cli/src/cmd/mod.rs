/// Document summary command.
pub mod info;
/// Truncated tree printer.
pub mod print;
/// Decode, re-encode, and verify command.
pub mod rewrite;
/// Path-selected subtree command.
pub mod show;
/// Shared CLI helpers.
pub(crate) mod util;

#[cfg(test)]
pub(crate) mod test_support;
