pub mod code_block;

use std::ops::Range;

use crate::span::code_block::CodeBlock;

/// One comparison region delimited by editor tags.
/// Blocks keep insertion order; that order decides left-to-right (or tab)
/// pane placement downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSpan {
    /// Display label from the tag's `title` attribute.
    pub title: String,
    /// The tag's `compare` flag: side-by-side vs single view.
    pub compare: bool,
    /// Code blocks in insertion order. No two share a `language`.
    pub blocks: Vec<CodeBlock>,
    /// Byte span in source, opening tag through closing tag.
    pub span: Range<usize>,
}

impl ComparisonSpan {
    /// Look up a block by its pane language key.
    pub fn block(&self, language: &str) -> Option<&CodeBlock> {
        self.blocks.iter().find(|b| b.language == language)
    }
}
