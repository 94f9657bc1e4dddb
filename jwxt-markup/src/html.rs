//! Minimal HTML text helpers
//!
//! The portal's markup is regular enough that tag-level regexes are
//! sufficient; nothing here builds a DOM.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("static regex must compile"));

static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});")
        .expect("static regex must compile")
});

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z0-9:_-]+)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
        .expect("static regex must compile")
});

/// Decode the named entities the portal emits plus numeric references.
/// Unknown entities are left untouched.
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            let decoded = match body.to_ascii_lowercase().as_str() {
                "nbsp" => Some(' '),
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => numeric_reference(body),
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn numeric_reference(body: &str) -> Option<char> {
    let digits = body.strip_prefix('#')?;
    let code = match digits.strip_prefix(|c| c == 'x' || c == 'X') {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}

/// Collapse whitespace runs to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove tags, decode entities and collapse whitespace.
pub fn strip_html(html: &str) -> String {
    let without_tags = TAG.replace_all(html, " ");
    collapse_whitespace(&decode_entities(&without_tags))
}

/// Coerce loosely formatted numeric text (`"4 人"`, `"共12"`) to an integer.
///
/// Everything but digits and `-` is dropped; the result is the leading
/// optionally-negative digit run. `None` when no digits remain.
pub fn parse_int_loose(text: &str) -> Option<i64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    let (negative, rest) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let value: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Attributes of one start tag, in source order. Names are lowercased;
/// the first occurrence of a name wins.
pub fn parse_attributes(tag: &str) -> Vec<(String, String)> {
    let mut attrs: Vec<(String, String)> = Vec::new();
    for caps in ATTRIBUTE.captures_iter(tag) {
        let name = caps[1].to_ascii_lowercase();
        if attrs.iter().any(|(n, _)| *n == name) {
            continue;
        }
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str())
            .or_else(|| caps.get(4).map(|m| m.as_str().trim_end_matches('/')))
            .unwrap_or_default();
        attrs.push((name, value.to_string()));
    }
    attrs
}

/// Value of attribute `name` (lowercase) in a parsed attribute list.
pub fn attribute<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

/// Whether the `class` attribute lists `class_name`.
pub fn has_class(attrs: &[(String, String)], class_name: &str) -> bool {
    attribute(attrs, "class")
        .is_some_and(|classes| classes.split_whitespace().any(|c| c.eq_ignore_ascii_case(class_name)))
}
