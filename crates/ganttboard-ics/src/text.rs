//! Free-text handling: escape sequences and HTML fallback descriptions.

/// Decode iCalendar TEXT escapes: `\n` (and `\N`), `\,`, `\;`, `\\`.
/// Unknown escape sequences pass through verbatim.
pub fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(',') => out.push(','),
            Some(';') => out.push(';'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Reduce an HTML-flavoured description (X-ALT-DESC) to plain text.
///
/// Line-break tags become `\n`, every other tag is removed. An
/// unterminated tag is kept verbatim rather than swallowing the rest of
/// the field.
pub fn strip_markup(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) => {
                if is_line_break_tag(&after[..close]) {
                    out.push('\n');
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn is_line_break_tag(tag: &str) -> bool {
    tag.trim()
        .trim_end_matches('/')
        .trim_end()
        .eq_ignore_ascii_case("br")
}
