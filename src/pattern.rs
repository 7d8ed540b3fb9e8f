//! The fixed display-token vocabulary. Tokens are translated once into
//! chrono strftime directives; generated documents depend on the rendered
//! wording byte-for-byte, so the table is the single place the mapping
//! lives.

/// Pattern used when a caller formats without one.
pub const DEFAULT_FORMAT: &str = "dd/LL/yyyy HH:mm";

// Ordered longest-first within each letter family so the scan below can
// take the first prefix match.
const TOKENS: &[(&str, &str)] = &[
    ("yyyy", "%Y"),
    ("yy", "%y"),
    ("LLLL", "%B"),
    ("LLL", "%b"),
    ("LL", "%m"),
    ("L", "%-m"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("M", "%-m"),
    ("dd", "%d"),
    ("d", "%-d"),
    ("cccc", "%A"),
    ("ccc", "%a"),
    ("EEEE", "%A"),
    ("EEE", "%a"),
    ("HH", "%H"),
    ("H", "%-H"),
    ("mm", "%M"),
    ("m", "%-M"),
    ("ss", "%S"),
    ("s", "%-S"),
    ("SSS", "%3f"),
];

/// Translate a token pattern into a chrono format string. Single-quoted
/// runs are literals (`'T'`); unrecognized characters pass through
/// verbatim.
pub fn to_chrono_format(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;
    'scan: while !rest.is_empty() {
        if let Some(quoted) = rest.strip_prefix('\'') {
            match quoted.find('\'') {
                Some(end) => {
                    push_literal(&mut out, &quoted[..end]);
                    rest = &quoted[end + 1..];
                }
                None => {
                    push_literal(&mut out, quoted);
                    rest = "";
                }
            }
            continue;
        }
        for (token, directive) in TOKENS {
            if let Some(after) = rest.strip_prefix(token) {
                out.push_str(directive);
                rest = after;
                continue 'scan;
            }
        }
        let ch = rest.chars().next().expect("non-empty remainder");
        push_literal_char(&mut out, ch);
        rest = &rest[ch.len_utf8()..];
    }
    out
}

fn push_literal(out: &mut String, text: &str) {
    for ch in text.chars() {
        push_literal_char(out, ch);
    }
}

fn push_literal_char(out: &mut String, ch: char) {
    if ch == '%' {
        out.push_str("%%");
    } else {
        out.push(ch);
    }
}
