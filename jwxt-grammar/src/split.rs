//! Meeting-pattern splitting

/// Split a delimiter-joined meeting pattern into trimmed, non-blank tokens.
///
/// Delimiters: `;`, `；`, line breaks and `<br>` tags (`<br>`, `<br/>`,
/// `<br />`, any case).
pub fn split_time_tokens(pattern: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut segment_start = 0;
    let mut i = 0;

    while let Some(c) = pattern[i..].chars().next() {
        let delimiter_len = match c {
            ';' | '；' | '\n' | '\r' => Some(c.len_utf8()),
            '<' => br_tag_len(&pattern[i..]),
            _ => None,
        };

        match delimiter_len {
            Some(len) => {
                push_segment(&mut tokens, &pattern[segment_start..i]);
                i += len;
                segment_start = i;
            }
            None => i += c.len_utf8(),
        }
    }
    push_segment(&mut tokens, &pattern[segment_start..]);

    tokens
}

fn push_segment<'a>(tokens: &mut Vec<&'a str>, segment: &'a str) {
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        tokens.push(trimmed);
    }
}

/// Byte length of a `<br>` / `<br/>` / `<br />` tag at the start of `rest`.
fn br_tag_len(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    if bytes.len() < 4 || !bytes[1..3].eq_ignore_ascii_case(b"br") {
        return None;
    }
    let mut i = 3;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'/' {
        i += 1;
    }
    (i < bytes.len() && bytes[i] == b'>').then_some(i + 1)
}
