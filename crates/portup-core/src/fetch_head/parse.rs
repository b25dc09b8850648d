//! Parse HTTP response header lines into ProbeResult.

use super::ProbeResult;

/// Parse collected header lines into ProbeResult.
///
/// libcurl hands over the headers of every response in a redirect chain; each status line
/// starts a new block, so only the final response's headers survive.
pub(crate) fn parse_headers(lines: &[String]) -> ProbeResult {
    let mut result = ProbeResult::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if status_code(line).is_some() {
            result = ProbeResult::default();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-disposition") {
                result.content_disposition = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("content-type") {
                result.content_type = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("content-length") {
                result.content_length = value.parse::<u64>().ok();
            }
            if name.eq_ignore_ascii_case("etag") {
                result.etag = Some(value.trim_matches('"').to_string());
            }
            if name.eq_ignore_ascii_case("last-modified") {
                result.last_modified = Some(value.to_string());
            }
        }
    }

    result
}

/// Decodes a raw header line as ISO-8859-1, so no byte is ever rejected.
pub(crate) fn decode_header_line(data: &[u8]) -> String {
    data.iter().map(|&b| b as char).collect()
}

/// Status code of an `HTTP/x.y NNN reason` line, or `None` for any other line.
pub(crate) fn status_code(line: &str) -> Option<u32> {
    if !line.starts_with("HTTP/") {
        return None;
    }
    line.split_whitespace().nth(1)?.parse().ok()
}
