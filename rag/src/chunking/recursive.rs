//! Separator-hierarchy chunker with exact character overlap.

use crate::chunking::Chunker;
use crate::types::{Chunk, Document};

/// Separator hierarchy, coarsest first. Raw character splitting is the
/// implicit last resort once these are exhausted.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

/// Splits text on a separator hierarchy and stitches consecutive chunks
/// together with a fixed character overlap.
///
/// The text is first broken into segments no longer than
/// `chunk_size - overlap` characters, preferring the coarsest separator
/// (paragraph break, then line break, sentence end, whitespace, finally raw
/// characters) that gets a piece under budget. Segments are then merged
/// greedily back into windows, and every chunk after the first is prefixed
/// with the last `overlap` characters of its predecessor, so adjacent chunks
/// share exactly `overlap` characters and no chunk exceeds `chunk_size`.
///
/// All lengths are counted in `char`s; multi-byte text is never split inside
/// a codepoint.
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    chunk_size: usize,
    overlap: usize,
}

impl RecursiveChunker {
    /// Creates a chunker producing chunks of at most `chunk_size` characters
    /// with `overlap` shared characters between neighbors.
    ///
    /// # Panics
    ///
    /// Panics if `overlap >= chunk_size`; the windowing arithmetic requires
    /// every chunk to advance by at least one character.
    #[must_use]
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        assert!(
            overlap < chunk_size,
            "overlap ({overlap}) must be smaller than chunk size ({chunk_size})"
        );
        Self {
            chunk_size,
            overlap,
        }
    }

    /// Budget for a window before the overlap prefix is added.
    const fn window_budget(&self) -> usize {
        self.chunk_size - self.overlap
    }

    fn split_recursive<'a>(&self, text: &'a str, separators: &[&str], out: &mut Vec<&'a str>) {
        if text.is_empty() {
            return;
        }
        if char_len(text) <= self.window_budget() {
            out.push(text);
            return;
        }
        let Some((separator, finer)) = separators.split_first() else {
            split_by_chars(text, self.window_budget(), out);
            return;
        };
        if text.contains(separator) {
            for piece in text.split_inclusive(separator) {
                if char_len(piece) <= self.window_budget() {
                    out.push(piece);
                } else {
                    self.split_recursive(piece, finer, out);
                }
            }
        } else {
            self.split_recursive(text, finer, out);
        }
    }

    /// Greedily merges segments into windows no longer than the budget.
    fn merge(&self, segments: &[&str]) -> Vec<String> {
        let mut windows = Vec::new();
        let mut current = String::new();
        let mut current_len = 0usize;

        for segment in segments {
            let len = char_len(segment);
            if !current.is_empty() && current_len + len > self.window_budget() {
                windows.push(std::mem::take(&mut current));
                current_len = 0;
            }
            current.push_str(segment);
            current_len += len;
        }
        if !current.is_empty() {
            windows.push(current);
        }
        windows
    }
}

impl Chunker for RecursiveChunker {
    fn chunk(&self, doc: &Document) -> Vec<Chunk> {
        let mut segments = Vec::new();
        self.split_recursive(&doc.text, &SEPARATORS, &mut segments);
        let windows = self.merge(&segments);

        let mut chunks: Vec<Chunk> = Vec::with_capacity(windows.len());
        for (index, window) in windows.into_iter().enumerate() {
            let text = match chunks.last() {
                Some(previous) => {
                    let mut text = tail_chars(&previous.text, self.overlap).to_string();
                    text.push_str(&window);
                    text
                }
                None => window,
            };
            chunks.push(Chunk::new(text, doc.url.clone(), index));
        }
        chunks
    }

    fn name(&self) -> &'static str {
        "recursive"
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Last `n` characters of `text`, or all of it when shorter.
fn tail_chars(text: &str, n: usize) -> &str {
    let len = char_len(text);
    if len <= n {
        return text;
    }
    match text.char_indices().nth(len - n) {
        Some((byte_index, _)) => &text[byte_index..],
        None => text,
    }
}

/// Raw fallback: cut `text` into pieces of at most `budget` characters.
fn split_by_chars<'a>(text: &'a str, budget: usize, out: &mut Vec<&'a str>) {
    let mut rest = text;
    while !rest.is_empty() {
        let cut = rest
            .char_indices()
            .nth(budget)
            .map_or(rest.len(), |(byte_index, _)| byte_index);
        out.push(&rest[..cut]);
        rest = &rest[cut..];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraphs(count: usize, chars_each: usize) -> String {
        (0..count)
            .map(|i| {
                let letter = char::from(b'a' + u8::try_from(i % 26).unwrap());
                letter.to_string().repeat(chars_each)
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    #[test]
    fn short_document_is_a_single_chunk() {
        let chunker = RecursiveChunker::new(500, 100);
        let doc = Document::new("https://example.com", "a short document");
        let chunks = chunker.chunk(&doc);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "a short document");
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[0].source_url, "https://example.com");
    }

    #[test]
    fn empty_document_yields_no_chunks() {
        let chunker = RecursiveChunker::new(500, 100);
        assert!(chunker.chunk(&Document::new("u", "")).is_empty());
    }

    #[test]
    fn chunks_never_exceed_chunk_size() {
        let chunker = RecursiveChunker::new(500, 100);
        let doc = Document::new("u", paragraphs(20, 180));
        let chunks = chunker.chunk(&doc);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 500, "chunk too long");
        }
    }

    #[test]
    fn adjacent_chunks_share_exactly_the_overlap() {
        let chunker = RecursiveChunker::new(500, 100);
        let doc = Document::new("u", paragraphs(20, 180));
        let chunks = chunker.chunk(&doc);
        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let tail: String = pair[0]
                .text
                .chars()
                .skip(pair[0].text.chars().count() - 100)
                .collect();
            let head: String = pair[1].text.chars().take(100).collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn chunking_is_deterministic() {
        let chunker = RecursiveChunker::new(500, 100);
        let doc = Document::new("u", paragraphs(12, 230));
        let first = chunker.chunk(&doc);
        let second = chunker.chunk(&doc);
        assert_eq!(first, second);
    }

    #[test]
    fn paragraph_boundaries_are_preferred() {
        // Two 300-char paragraphs cannot share a 400-char window, so the
        // first chunk should be exactly the first paragraph.
        let chunker = RecursiveChunker::new(500, 100);
        let text = format!("{}\n\n{}", "a".repeat(298), "b".repeat(300));
        let doc = Document::new("u", text);
        let chunks = chunker.chunk(&doc);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, format!("{}\n\n", "a".repeat(298)));
        assert!(chunks[1].text.ends_with(&"b".repeat(300)));
    }

    #[test]
    fn multibyte_text_is_split_on_char_boundaries() {
        let chunker = RecursiveChunker::new(50, 10);
        let doc = Document::new("u", "héllo wörld ".repeat(40));
        let chunks = chunker.chunk(&doc);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 50);
        }
    }

    #[test]
    fn unseparated_text_falls_back_to_raw_splitting() {
        let chunker = RecursiveChunker::new(100, 20);
        let doc = Document::new("u", "x".repeat(1000));
        let chunks = chunker.chunk(&doc);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 100);
        }
    }

    #[test]
    fn chunk_indexes_are_sequential() {
        let chunker = RecursiveChunker::new(120, 30);
        let doc = Document::new("u", paragraphs(10, 80));
        let chunks = chunker.chunk(&doc);
        for (expected, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, expected);
        }
    }

    #[test]
    #[should_panic(expected = "overlap")]
    fn overlap_must_be_smaller_than_chunk_size() {
        let _ = RecursiveChunker::new(100, 100);
    }
}
