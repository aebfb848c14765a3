//! Image sources
//!
//! The form's image picker accepts local file paths alongside remote URLs and
//! pre-built data URIs. Local files are embedded as data URIs so a record is
//! self-contained once stored:
//!
//!   data:image/png;base64,iVBORw0KG...

use base64::Engine;
use shared::AppResult;
use std::path::Path;

/// Resolve one picker entry to a storable image source.
///
/// Remote URLs and data URIs pass through untouched; anything else is read
/// from disk and embedded.
pub fn to_image_source(entry: &str) -> AppResult<String> {
    let entry = entry.trim();
    if entry.starts_with("data:") || entry.starts_with("http://") || entry.starts_with("https://") {
        return Ok(entry.to_string());
    }
    file_to_data_uri(Path::new(entry))
}

/// Read a file and encode it as a `data:<mime>;base64,` URI
pub fn file_to_data_uri(path: &Path) -> AppResult<String> {
    let bytes = std::fs::read(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
    Ok(format!("data:{mime};base64,{encoded}"))
}

/// Resolve a whole picker selection, skipping entries that fail to load.
/// Failures are logged and never abort the submit.
pub fn resolve_selection(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .filter(|e| !e.trim().is_empty())
        .filter_map(|entry| match to_image_source(entry) {
            Ok(source) => Some(source),
            Err(e) => {
                tracing::warn!("Skipping image {entry}: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_and_data_uris_pass_through() {
        assert_eq!(
            to_image_source("https://example.com/chair.png").unwrap(),
            "https://example.com/chair.png"
        );
        assert_eq!(
            to_image_source("data:image/png;base64,AAAA").unwrap(),
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn files_become_data_uris() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chair.png");
        std::fs::write(&path, [0x89, 0x50, 0x4e, 0x47]).unwrap();

        let uri = file_to_data_uri(&path).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn unreadable_entries_are_skipped() {
        let entries = vec![
            "https://example.com/a.png".to_string(),
            "/definitely/not/here.png".to_string(),
        ];
        let resolved = resolve_selection(&entries);
        assert_eq!(resolved.len(), 1);
    }
}
