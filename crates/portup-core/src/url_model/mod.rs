//! Local filename derivation for a program download.
//!
//! The name comes from the `Content-Disposition` header when it carries one, otherwise from
//! the URL basename plus an extension guessed from `Content-Type`. Only names ending in a
//! recognized installer/archive extension are accepted.

mod content_disposition;
mod content_type;
mod path;
mod sanitize;

pub use content_disposition::disposition_filename;
pub use content_type::extension_for_content_type;
pub use path::url_basename;
pub use sanitize::strip_reserved_chars;

/// Extensions a downloaded program may have.
pub const ALLOWED_EXTENSIONS: [&str; 4] = [".exe", ".zip", ".rar", ".iso"];

/// Why no usable filename could be derived.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilenameError {
    #[error("'{candidate}' filename cannot be without an extension")]
    NoExtension { candidate: String },
}

/// True if `name` ends with one of [`ALLOWED_EXTENSIONS`].
pub fn has_allowed_extension(name: &str) -> bool {
    ALLOWED_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Derives the local filename for `url`.
///
/// # Examples
///
/// - `resolve(url, Some("attachment; filename=\"tool.exe\""), None)` → `"tool.exe"`
/// - `resolve("https://x/y/app?x=1", None, Some("application/zip"))` → `"appx1.zip"`
pub fn resolve(
    url: &str,
    content_disposition: Option<&str>,
    content_type: Option<&str>,
) -> Result<String, FilenameError> {
    let name = match content_disposition.and_then(disposition_filename) {
        Some(from_header) => from_header,
        None => {
            let mut name = strip_reserved_chars(url_basename(url));
            if let Some(ext) = content_type.and_then(extension_for_content_type) {
                if !has_allowed_extension(&name) && ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
                    name.push_str(&ext);
                }
            }
            name
        }
    };

    if has_allowed_extension(&name) {
        Ok(name)
    } else {
        Err(FilenameError::NoExtension { candidate: name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disposition_wins() {
        assert_eq!(
            resolve(
                "https://example.com/download?id=7",
                Some("attachment; filename=\"tool.exe\""),
                Some("application/zip"),
            )
            .unwrap(),
            "tool.exe"
        );
    }

    #[test]
    fn disposition_with_stray_quote_resolves() {
        assert_eq!(
            resolve("https://x/dl", Some("attachment; filename=tool.exe\""), None).unwrap(),
            "tool.exe"
        );
        assert_eq!(
            resolve("https://x/dl", Some("attachment; filename=\"tool.exe"), None).unwrap(),
            "tool.exe"
        );
    }

    #[test]
    fn disposition_not_sanitized() {
        assert_eq!(
            resolve("https://example.com/x", Some("attachment; filename=\"my:tool.exe\""), None)
                .unwrap(),
            "my:tool.exe"
        );
    }

    #[test]
    fn url_basename_with_content_type() {
        let name = resolve("https://x/y/app?x=1", None, Some("application/zip")).unwrap();
        assert_eq!(name, "appx1.zip");
        assert!(!name.contains('?') && !name.contains('='));
    }

    #[test]
    fn url_basename_with_extension_ignores_content_type() {
        assert_eq!(
            resolve(
                "https://example.com/files/setup.exe",
                None,
                Some("application/x-msdownload")
            )
            .unwrap(),
            "setup.exe"
        );
        assert_eq!(
            resolve("https://example.com/disc.iso", None, Some("application/zip")).unwrap(),
            "disc.iso"
        );
    }

    #[test]
    fn unrecognized_content_type_not_appended() {
        assert_eq!(
            resolve("https://example.com/readme", None, Some("text/html")),
            Err(FilenameError::NoExtension {
                candidate: "readme".to_string()
            })
        );
    }

    #[test]
    fn no_extension_anywhere() {
        assert!(matches!(
            resolve("https://example.com/latest", None, None),
            Err(FilenameError::NoExtension { .. })
        ));
        assert!(matches!(
            resolve("https://example.com/x.zip", Some("attachment; filename=\"notes.txt\""), None),
            Err(FilenameError::NoExtension { .. })
        ));
    }

    #[test]
    fn disposition_without_filename_falls_back_to_url() {
        assert_eq!(
            resolve("https://example.com/pkg.rar", Some("attachment"), None).unwrap(),
            "pkg.rar"
        );
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        assert!(resolve("https://example.com/SETUP.EXE", None, None).is_err());
    }
}
