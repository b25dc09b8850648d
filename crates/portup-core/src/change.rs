//! Change detection from cheap metadata only.

use crate::config::MetadataRecord;

/// True if there is no stored record, or if any of content hash, ETag or Last-Modified
/// differs from it.
///
/// Fields compare as nullable strings: `None` equals `None` and differs from any value.
/// The probe never fills `content_hash`, so the hash alone cannot trigger a download.
pub fn has_changed(current: &MetadataRecord, previous: Option<&MetadataRecord>) -> bool {
    let Some(previous) = previous else {
        return true;
    };
    current.content_hash != previous.content_hash
        || current.etag != previous.etag
        || current.last_modified != previous.last_modified
}
