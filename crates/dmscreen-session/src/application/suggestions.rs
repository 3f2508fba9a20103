//! Suggestion text clean-up.

/// Strips a leading enumeration marker such as `"1. "` from a suggestion.
///
/// Only a run of ASCII digits followed by a dot is removed, together with
/// any whitespace after it. Anything else is returned unchanged.
#[must_use]
pub fn strip_enumeration(suggestion: &str) -> &str {
    let digits = suggestion
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return suggestion;
    }
    match suggestion[digits..].strip_prefix('.') {
        Some(rest) => rest.trim_start(),
        None => suggestion,
    }
}

/// Blank context is the same as no context.
pub(crate) fn normalize_context(context: Option<String>) -> Option<String> {
    context.filter(|text| !text.trim().is_empty())
}
