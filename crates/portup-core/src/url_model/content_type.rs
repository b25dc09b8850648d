//! Extension guess from a Content-Type header.

/// Maps a media type to a dotted extension built from its subtype.
///
/// `application/zip; charset=binary` → `.zip`. Returns `None` for an empty subtype.
pub fn extension_for_content_type(content_type: &str) -> Option<String> {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    let subtype = essence.rsplit('/').next().unwrap_or("").trim();
    if subtype.is_empty() {
        return None;
    }
    Some(format!(".{}", subtype.to_ascii_lowercase()))
}
