use std::ops::Range;

/// One fenced code region inside a comparison span.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    /// Pane language key (from the `!!` annotation, or the highlight
    /// identifier when no annotation is present). Unique within a span.
    pub language: String,
    /// Syntax-highlighting identifier from the fence info string.
    /// In practice this coincides with `language`, but the two are distinct.
    pub syntax: String,
    /// Raw code content, as written.
    pub source: String,
    /// Position among siblings within the enclosing span.
    pub order: usize,
    /// Byte span in source, opening fence through closing fence.
    pub span: Range<usize>,
}
