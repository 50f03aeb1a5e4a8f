pub mod export;
pub mod labels;

use serde::Serialize;

use duopane::Document;
use duopane::span::ComparisonSpan;

/// One presentation-ready code pane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pane {
    /// Human-readable label derived from the pane language ("js" → "JavaScript").
    pub label: String,
    /// Pane language key.
    pub language: String,
    /// Syntax-highlighting identifier.
    pub syntax: String,
    /// Raw code content.
    pub source: String,
    /// Left-to-right (or tab) position.
    pub order: usize,
}

/// A framework-agnostic view model for one comparison span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
    pub title: String,
    /// Side-by-side when true; single view otherwise.
    pub compare: bool,
    /// Panes in authored order.
    pub panes: Vec<Pane>,
}

/// Project a sealed span into its view model. Pure: pane order equals block
/// insertion order, nothing is mutated.
pub fn build_span(span: &ComparisonSpan) -> RenderModel {
    RenderModel {
        title: span.title.clone(),
        compare: span.compare,
        panes: span
            .blocks
            .iter()
            .map(|block| Pane {
                label: labels::display_label(&block.language),
                language: block.language.clone(),
                syntax: block.syntax.clone(),
                source: block.source.clone(),
                order: block.order,
            })
            .collect(),
    }
}

/// Project every sealed span of a document, in document order.
pub fn build_document(document: &Document) -> Vec<RenderModel> {
    document.spans.iter().map(build_span).collect()
}
