//! Character escaping for the two output contexts.
//!
//! Attribute values are always double-quoted, so only `"`, `&` and `<` need
//! replacing there. Text content escapes `>` and `'` as well.

use std::borrow::Cow;

const fn attr_value_entity(c: char) -> Option<&'static str> {
    match c {
        '"' => Some("&quot;"),
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        _ => None,
    }
}

const fn text_entity(c: char) -> Option<&'static str> {
    match c {
        '"' => Some("&quot;"),
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '\'' => Some("&apos;"),
        _ => None,
    }
}

fn escape_with(input: &str, entity: fn(char) -> Option<&'static str>) -> Cow<'_, str> {
    let Some(first) = input.find(|c: char| entity(c).is_some()) else {
        return Cow::Borrowed(input);
    };

    let mut out = String::with_capacity(input.len() + 8);
    out.push_str(&input[..first]);
    for c in input[first..].chars() {
        match entity(c) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Escape a string for use inside a double-quoted attribute value.
#[must_use]
pub fn escape_attr_value(value: &str) -> Cow<'_, str> {
    escape_with(value, attr_value_entity)
}

/// Escape a string for use as element text content.
#[must_use]
pub fn escape_text(text: &str) -> Cow<'_, str> {
    escape_with(text, text_entity)
}
