//! Line-based lenient parser.

use crate::document::Mapping;

use super::scalar::infer_scalar;

/// Number of leading whitespace characters per nesting level.
pub const INDENT_WIDTH: usize = 2;

/// Parse `key: value` markup into a generic document.
///
/// Never fails. Blank lines, `#` comments and lines without a colon are
/// skipped. Nesting depth is the leading whitespace count divided by two,
/// so files indented with a different width nest incorrectly.
pub fn parse(source: &str) -> Mapping {
    let mut root = Mapping::new();
    let mut path: Vec<String> = Vec::new();

    for line in source.lines() {
        let content = line.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }

        let Some((key, value)) = split_pair(content) else {
            continue;
        };

        let indent = line.chars().count() - line.trim_start().chars().count();
        let depth = indent / INDENT_WIDTH;

        path.truncate(depth);

        let mut current = &mut root;
        for ancestor in &path {
            current = current.child_mut(ancestor);
        }
        current.insert(key, infer_scalar(value));

        path.push(key.to_string());
    }

    root
}

/// Split a trimmed line at its first colon.
///
/// Colons inside the value are kept, so `url: http://x` keeps `http://x`.
fn split_pair(content: &str) -> Option<(&str, &str)> {
    let (key, value) = content.split_once(':')?;
    Some((key.trim(), value.trim()))
}
