//! Content-Disposition filename extraction.

const DIRECTIVE: &str = "filename=";

/// Returns the text after the last `filename=` in the header with double quotes trimmed
/// from both ends.
///
/// The header value is trusted as-is: no parameter splitting, unescaping or sanitization.
/// `filename*=` (RFC 5987) does not match the directive and is ignored.
pub fn disposition_filename(header_value: &str) -> Option<String> {
    let (_, value) = header_value.rsplit_once(DIRECTIVE)?;
    Some(value.trim_matches('"').to_string())
}
