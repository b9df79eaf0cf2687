//! Content format detection.

use std::path::Path;

const MAX_FORMAT_LEN: usize = 16;
const FALLBACK_FORMAT: &str = "bin";

/// Detect the stored format: the original name's extension when it looks like
/// one, otherwise the first extension known for the declared content type.
pub fn detect_format(original_name: &str, content_type: &str) -> String {
    if let Some(ext) = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .filter(|e| is_plausible_format(e))
    {
        return ext;
    }

    let mime = content_type
        .split(';')
        .next()
        .map(|s| s.trim().to_ascii_lowercase())
        .unwrap_or_default();

    mime_guess::get_mime_extensions_str(&mime)
        .and_then(|exts| exts.first())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_else(|| FALLBACK_FORMAT.to_string())
}

fn is_plausible_format(ext: &str) -> bool {
    !ext.is_empty() && ext.len() <= MAX_FORMAT_LEN && ext.chars().all(|c| c.is_ascii_alphanumeric())
}
