//! Identifier derivation for generated declarations.
//!
//! Schema paths are field names joined with [`PATH_SEPARATOR`], e.g.
//! `Test~user~address`. [`format_name`] turns such a path into a
//! capitalized identifier (`TestUserAddress`).

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '~';

/// Convert a path string to a capitalized identifier.
///
/// Every character outside `[A-Za-z0-9~]` is stripped, the remainder is split
/// on `~`, empty segments are dropped and each segment gets an uppercase
/// first letter.
pub fn format_name(path: &str) -> String {
    let cleaned: String = path
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == PATH_SEPARATOR)
        .collect();

    cleaned
        .split(PATH_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_ascii_uppercase().to_string() + chars.as_str(),
            }
        })
        .collect()
}

/// Bijective base-26 letters for a zero-based index (0 -> "A", 26 -> "AA").
pub fn letter_suffix(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index;
    loop {
        letters.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Like [`format_name`], but always yields a usable Python class name.
///
/// An empty result becomes `Unnamed`; a leading digit is prefixed with `_`.
pub fn class_name(path: &str) -> String {
    let name = format_name(path);
    match name.chars().next() {
        None => "Unnamed".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{}", name),
        Some(_) => name,
    }
}

/// Append a segment to a path (`""` + `a` -> `a`, `X` + `a` -> `X~a`).
pub fn join_path(base: &str, segment: &str) -> String {
    if base.is_empty() {
        segment.to_string()
    } else {
        format!("{}{}{}", base, PATH_SEPARATOR, segment)
    }
}
