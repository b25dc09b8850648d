//! Removal of characters that are reserved in Windows filenames or URL queries.

const RESERVED: [char; 11] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*', '=', '&'];

/// Deletes every character in `<>:"/\|?*=&` from `name`.
pub fn strip_reserved_chars(name: &str) -> String {
    name.chars().filter(|c| !RESERVED.contains(c)).collect()
}
