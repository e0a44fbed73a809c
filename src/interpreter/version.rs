//! Version string parsing.

use regex::Regex;
use std::sync::LazyLock;

/// Leading integer of a version component (`"3"`, `"11rc1"`).
static LEADING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)").expect("LEADING_DIGITS must compile"));

/// Extract the major version from `<name> <major>.<minor>.<patch>` output.
///
/// The output is split on spaces, the second field is split on periods, and
/// the leading digits of the first component are parsed. Returns `None` when
/// any of those steps finds nothing.
pub fn parse_major_version(output: &str) -> Option<u32> {
    let field = output.split(' ').nth(1)?;
    let major = field.split('.').next()?;
    LEADING_DIGITS
        .captures(major)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
