//! HTML-to-text extraction.

use scraper::{Html, Node, Selector};

/// Block-level elements that carry article text.
const BLOCK_SELECTOR: &str = "p, h1, h2, h3, h4, h5, h6, li, blockquote, pre";

/// Subtrees that never contribute readable text.
const SKIPPED_ELEMENTS: [&str; 6] = ["script", "style", "head", "nav", "noscript", "template"];

/// Reduces an HTML document to `(title, text)`.
///
/// Text from block-level elements is joined with blank lines so that the
/// downstream chunker sees paragraph boundaries. Documents without any block
/// markup fall back to a whole-tree text walk that skips script and style
/// subtrees. Whitespace inside each block is collapsed.
#[must_use]
pub fn extract_text(html: &str) -> (Option<String>, String) {
    let document = Html::parse_document(html);

    let title = parse_selector("title").and_then(|selector| {
        document
            .select(&selector)
            .next()
            .map(|element| collapse_whitespace(&element.text().collect::<String>()))
            .filter(|text| !text.is_empty())
    });

    let blocks: Vec<String> = parse_selector(BLOCK_SELECTOR)
        .map(|selector| {
            document
                .select(&selector)
                .map(|element| collapse_whitespace(&element.text().collect::<String>()))
                .filter(|text| !text.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let text = if blocks.is_empty() {
        full_text(&document)
    } else {
        blocks.join("\n\n")
    };

    (title, text)
}

/// Static selectors cannot fail to parse; `None` degrades to the fallback walk.
fn parse_selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn full_text(document: &Html) -> String {
    let mut pieces = Vec::new();
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let skipped = node.ancestors().any(|ancestor| {
            matches!(
                ancestor.value(),
                Node::Element(element) if SKIPPED_ELEMENTS.contains(&element.name())
            )
        });
        if !skipped {
            let piece = collapse_whitespace(text);
            if !piece.is_empty() {
                pieces.push(piece);
            }
        }
    }
    pieces.join(" ")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
