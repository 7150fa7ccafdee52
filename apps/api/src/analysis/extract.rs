use tracing::warn;

use crate::analysis::TextExtractor;

/// Extracts text from PDF bytes with `pdf-extract`.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Option<String> {
        // pdf-extract panics on some malformed documents instead of returning Err.
        match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
            Ok(Ok(text)) => normalize_extracted(&text),
            Ok(Err(e)) => {
                warn!("PDF extraction error: {e}");
                None
            }
            Err(_) => {
                warn!("PDF extraction panicked on a malformed document");
                None
            }
        }
    }
}

/// Trims each line and collapses runs of blank lines. Whitespace-only output is no text.
fn normalize_extracted(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut blank_run = 0;
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    let text = out.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
