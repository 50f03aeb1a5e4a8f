mod resolve;
mod scan;
pub mod tag;

pub use tag::SPAN_TAG;

use crate::Document;
use crate::diagnostic::Diagnostic;
use crate::frontmatter;

/// Parser entry point.
pub struct Parser {
    source: String,
    file_id: usize,
}

/// What a parse always produces: the document, plus every diagnostic raised
/// along the way. Diagnostics are collected, never thrown; the caller decides
/// what to gate on.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub document: Document,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseResult {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl Parser {
    pub fn new(source: String, file_id: usize) -> Self {
        Parser { source, file_id }
    }

    /// Scan and resolve the source into a Document. Malformed regions are
    /// reported and skipped; the rest of the document still resolves.
    pub fn parse(&self) -> ParseResult {
        let bom_len = if self.source.starts_with('\u{feff}') {
            '\u{feff}'.len_utf8()
        } else {
            0
        };

        let (front_matter, body_start) =
            frontmatter::extract(&self.source[bom_len..], bom_len);
        let body = &self.source[body_start..];

        let mut diagnostics = Vec::new();
        let events = scan::scan(body, body_start, self.file_id, &mut diagnostics);
        let spans = resolve::resolve(
            events,
            self.source.len(),
            self.file_id,
            &mut diagnostics,
        );

        ParseResult {
            document: Document {
                front_matter,
                spans,
                source_id: self.file_id,
            },
            diagnostics,
        }
    }
}
