//! Escape decoding for string and character literals.

use crate::chars::{hex_digit_to_value, octal_digit_to_value};

/// Decodes the raw text of a `String` token into an owned string.
///
/// Thin wrapper over [`decode_literal_bytes`]; byte sequences that are
/// not valid UTF-8 are replaced with U+FFFD.
///
/// # Examples
///
/// ```
/// use cfl_lex::decode_literal;
///
/// assert_eq!(decode_literal(r#""a\tb""#), "a\tb");
/// assert_eq!(decode_literal(r#""\x41\102""#), "AB");
/// assert_eq!(decode_literal(r#""\xc3\xa9""#), "é");
/// assert_eq!(decode_literal("'\\''"), "'");
/// ```
pub fn decode_literal(raw: &str) -> String {
    match String::from_utf8(decode_literal_bytes(raw)) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

/// Decodes the raw text of a `String` token into the bytes it denotes.
///
/// The surrounding quotes are removed (a missing closing quote is
/// tolerated) and escape sequences are resolved:
///
/// - `\n \t \r \a \b \f \v \0 \\ \" \' \?`
/// - octal: `\` followed by one to three octal digits
/// - hex: `\x` followed by hex digits
///
/// A numeric escape yields exactly one byte; values above 255 keep their
/// low byte. Any other escaped character decodes to itself.
///
/// # Examples
///
/// ```
/// use cfl_lex::decode_literal_bytes;
///
/// assert_eq!(decode_literal_bytes(r#""\xff\0""#), vec![0xff, 0]);
/// ```
pub fn decode_literal_bytes(raw: &str) -> Vec<u8> {
    let body = strip_quotes(raw);
    let bytes = body.as_bytes();
    let mut out = Vec::with_capacity(body.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        i += 1;
        let Some(c) = body[i..].chars().next() else {
            // trailing lone backslash
            out.push(b'\\');
            break;
        };

        match c {
            'n' => out.push(b'\n'),
            't' => out.push(b'\t'),
            'r' => out.push(b'\r'),
            'a' => out.push(0x07),
            'b' => out.push(0x08),
            'f' => out.push(0x0C),
            'v' => out.push(0x0B),
            '0'..='7' => {
                let mut value: u32 = 0;
                let mut len = 0;
                while len < 3 {
                    match bytes.get(i + len).copied().and_then(octal_digit_to_value) {
                        Some(d) => value = value * 8 + u32::from(d),
                        None => break,
                    }
                    len += 1;
                }
                out.push(value as u8);
                i += len;
                continue;
            },
            'x' => {
                let mut value: u32 = 0;
                let mut len = 0;
                while let Some(d) = bytes.get(i + 1 + len).copied().and_then(hex_digit_to_value) {
                    value = (value << 4 | u32::from(d)) & 0xFF;
                    len += 1;
                }
                if len == 0 {
                    out.push(b'x');
                } else {
                    out.push(value as u8);
                }
                i += 1 + len;
                continue;
            },
            other => {
                let mut buf = [0; 4];
                out.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
            },
        }
        i += c.len_utf8();
    }

    out
}

/// Removes the opening quote and, if present, the matching closing quote.
fn strip_quotes(raw: &str) -> &str {
    let Some(quote) = raw.chars().next().filter(|c| *c == '"' || *c == '\'') else {
        return raw;
    };
    let body = &raw[1..];
    match body.strip_suffix(quote) {
        Some(inner) if !ends_with_escape(inner) => inner,
        _ => body,
    }
}

/// Returns true if `s` ends in an odd number of backslashes, meaning its
/// next character would be escaped.
fn ends_with_escape(s: &str) -> bool {
    s.bytes().rev().take_while(|b| *b == b'\\').count() % 2 == 1
}
