//! Text cleaning executed before chunking.

use crate::types::Document;

/// Trait for document cleaning strategies.
pub trait Cleaner: Send + Sync {
    /// Cleans the input document and returns a normalized version.
    fn clean(&self, doc: &Document) -> Document;

    /// Returns the cleaner name.
    fn name(&self) -> &'static str;
}

/// Default cleaner used before chunking.
///
/// Lightweight normalization only:
/// - normalize line endings (`\r\n`, `\r` -> `\n`)
/// - trim trailing whitespace on each line
/// - collapse runs of blank lines to one blank line
/// - trim outer whitespace
///
/// Paragraph breaks (`\n\n`) are preserved; the chunker relies on them.
#[derive(Debug, Clone, Default)]
pub struct BasicCleaner;

impl BasicCleaner {
    fn normalize_line_endings(text: &str) -> String {
        text.replace("\r\n", "\n").replace('\r', "\n")
    }

    fn collapse_blank_lines(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut blank_run = 0usize;

        for line in text.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                blank_run += 1;
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
                if blank_run > 0 {
                    out.push('\n');
                }
            }
            out.push_str(line);
            blank_run = 0;
        }

        out
    }
}

impl Cleaner for BasicCleaner {
    fn clean(&self, doc: &Document) -> Document {
        let normalized = Self::normalize_line_endings(&doc.text);
        let collapsed = Self::collapse_blank_lines(&normalized);
        Document::new(doc.url.clone(), collapsed.trim().to_string())
    }

    fn name(&self) -> &'static str {
        "basic"
    }
}
