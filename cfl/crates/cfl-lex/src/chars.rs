//! Character classes for the C-family scanner.
//!
//! All classes are ASCII-only: any byte outside them (including every
//! non-ASCII character) ends up in a single-character `Other` token.

/// Checks if a byte can start a name token (`[A-Za-z_]`).
///
/// # Example
///
/// ```
/// use cfl_lex::chars::is_name_start;
///
/// assert!(is_name_start(b'a'));
/// assert!(is_name_start(b'_'));
/// assert!(!is_name_start(b'1'));
/// ```
#[inline]
pub fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// Checks if a byte can continue a name token (`[A-Za-z0-9_]`).
#[inline]
pub fn is_name_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Checks if a byte is horizontal whitespace (space or tab).
#[inline]
pub fn is_space_tab(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Checks if a byte opens a string or character literal.
#[inline]
pub fn is_quote(b: u8) -> bool {
    b == b'"' || b == b'\''
}

/// Checks if a byte is an exponent marker in a number.
#[inline]
pub fn is_exponent_marker(b: u8) -> bool {
    b == b'e' || b == b'E'
}

/// Converts a hexadecimal digit to its value.
///
/// # Example
///
/// ```
/// use cfl_lex::chars::hex_digit_to_value;
///
/// assert_eq!(hex_digit_to_value(b'7'), Some(7));
/// assert_eq!(hex_digit_to_value(b'f'), Some(15));
/// assert_eq!(hex_digit_to_value(b'G'), None);
/// ```
#[inline]
pub fn hex_digit_to_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Converts an octal digit to its value.
#[inline]
pub fn octal_digit_to_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'7' => Some(b - b'0'),
        _ => None,
    }
}
