pub mod diagnostic;
pub mod frontmatter;
pub mod parser;
pub mod span;

use crate::frontmatter::FrontMatter;
use crate::span::ComparisonSpan;

/// A parsed comparison document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Raw front-matter header, passed through uninterpreted.
    pub front_matter: Option<FrontMatter>,
    /// Sealed comparison spans, in document order.
    pub spans: Vec<ComparisonSpan>,
    /// The source file ID (for error reporting with codespan-reporting).
    pub source_id: usize,
}
