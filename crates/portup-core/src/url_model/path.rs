//! Basename of a URL as written in the config.

/// Text after the last `/` of the URL string, query and fragment included.
///
/// The query is kept on purpose: `https://x/y/app?x=1` → `app?x=1`, and the reserved
/// characters are removed afterwards by [`super::strip_reserved_chars`].
pub fn url_basename(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
