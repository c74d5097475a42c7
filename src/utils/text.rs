/// Keep at most `max_chars` Unicode scalar values of `s`.
///
/// Never splits a multi-byte character; no marker is appended.
#[must_use]
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Line boundaries: `\n`, `\r`, vertical tab, form feed, the ASCII file, group
/// and record separators, NEL, and the Unicode line and paragraph separators.
/// `\r\n` yields an empty piece between the two, which callers skip as blank.
fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// First line of `text` that is non-blank after trimming, trimmed.
pub fn first_non_blank_line(text: &str) -> Option<&str> {
    text.split(is_line_boundary)
        .map(str::trim)
        .find(|line| !line.is_empty())
}
