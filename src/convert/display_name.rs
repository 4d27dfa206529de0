//! Display name cleanup for legacy `&`-style formatting codes.

use std::sync::OnceLock;

use regex::Regex;

/// Name Citizens gives an NPC that was created without one.
pub const UNNAMED_PLACEHOLDER: &str = "(&7Rechtsklick&)";

/// Display name written for NPCs that carried the placeholder name.
pub const EMPTY_DISPLAY_NAME: &str = "<empty>";

fn format_code() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"&[0-9a-fk-or]").expect("format code pattern is valid"))
}

/// Remove every colour and format code (`&0`-`&9`, `&a`-`&f`, `&k`-`&o`,
/// `&r`). Codes are case-sensitive; everything else is kept.
pub fn strip_format_codes(name: &str) -> String {
    format_code().replace_all(name, "").into_owned()
}

/// Clean a raw NPC name for use as a FancyNPCs display name.
///
/// The placeholder name is compared after cleaning, so both the raw
/// placeholder and its cleaned form map to [`EMPTY_DISPLAY_NAME`].
pub fn sanitize_display_name(raw: &str) -> String {
    let cleaned = strip_format_codes(raw);
    if cleaned == strip_format_codes(UNNAMED_PLACEHOLDER) {
        EMPTY_DISPLAY_NAME.to_string()
    } else {
        cleaned
    }
}
