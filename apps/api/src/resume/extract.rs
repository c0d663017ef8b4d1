//! PDF to plain text.
//!
//! Failure policy: any parse failure degrades to an empty string. The
//! analyzer promotes "no text" to a user-visible error; this layer never
//! does.

use tracing::warn;

/// Extracts text page by page, joins pages with a newline, and trims the
/// result. CPU-bound; run under `spawn_blocking`.
pub fn extract_text(bytes: &[u8]) -> String {
    match pdf_extract::extract_text_from_mem_by_pages(bytes) {
        Ok(pages) => pages.join("\n").trim().to_string(),
        Err(e) => {
            warn!("PDF extraction failed, degrading to empty text: {e}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_degrade_to_empty() {
        assert_eq!(extract_text(b"not a pdf at all"), "");
    }

    #[test]
    fn test_empty_input_degrades_to_empty() {
        assert_eq!(extract_text(b""), "");
    }
}
