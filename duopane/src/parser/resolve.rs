use std::ops::Range;

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::parser::scan::{RawFence, ScanEvent};
use crate::span::ComparisonSpan;
use crate::span::code_block::CodeBlock;

/// Convert the flat event stream into sealed comparison spans.
///
/// Spans never nest in this format, so the resolver carries a single-slot
/// "current open span". A span's lifecycle:
/// open → collects blocks → sealed on close (or implicitly on the next open),
/// discarded when empty or left open at end of input.
pub fn resolve(
    events: Vec<ScanEvent>,
    source_len: usize,
    file_id: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<ComparisonSpan> {
    let mut state = ResolveState {
        file_id,
        open: None,
        sealed: Vec::new(),
        diagnostics,
    };

    for event in events {
        match event {
            ScanEvent::OpenSpan { tag, span } => {
                if let Some(previous) = state.open.take() {
                    state.diagnostics.push(
                        Diagnostic::new(
                            DiagnosticKind::NestedSpanNotClosed,
                            format!(
                                "comparison span \"{}\" opened before the previous one was closed",
                                tag.title
                            ),
                            span.clone(),
                            file_id,
                        )
                        .with_note(format!(
                            "\"{}\" is closed implicitly here",
                            previous.title
                        )),
                    );
                    state.seal(previous, span.start);
                }
                state.open = Some(SpanBuilder {
                    title: tag.title,
                    compare: tag.compare,
                    blocks: Vec::new(),
                    span_start: span.start,
                });
            }
            ScanEvent::Fence(fence) => state.take_fence(fence),
            ScanEvent::CloseSpan { span } => {
                // A stray closing tag with nothing open is plain text.
                if let Some(builder) = state.open.take() {
                    state.seal(builder, span.end);
                }
            }
        }
    }

    if let Some(builder) = state.open.take() {
        state.diagnostics.push(
            Diagnostic::new(
                DiagnosticKind::UnterminatedBlock,
                format!(
                    "comparison span \"{}\" is never closed",
                    builder.title
                ),
                builder.span_start..source_len,
                file_id,
            )
            .with_note("the span is dropped from the renderable set".to_string()),
        );
    }

    state.sealed
}

struct SpanBuilder {
    title: String,
    compare: bool,
    blocks: Vec<CodeBlock>,
    span_start: usize,
}

struct ResolveState<'a> {
    file_id: usize,
    /// The single open span, if any. Spans do not nest.
    open: Option<SpanBuilder>,
    sealed: Vec<ComparisonSpan>,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl ResolveState<'_> {
    /// Append a scanned fence to the open span. Fences outside any span are
    /// ordinary document content and resolve to nothing.
    fn take_fence(&mut self, fence: RawFence) {
        let Some(builder) = self.open.as_mut() else {
            return;
        };

        let RawFence {
            syntax,
            key,
            source,
            span,
        } = fence;

        // The pane key is the `!!` annotation when present; a plain fence
        // falls back to its highlight id (they coincide in practice).
        let Some(language) = key.clone().or_else(|| syntax.clone()) else {
            self.diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::MissingLanguageTag,
                    "code fence inside a comparison span has no language tag",
                    span,
                    self.file_id,
                )
                .with_note("the block is excluded from the comparison".to_string()),
            );
            return;
        };
        let syntax = syntax.unwrap_or_else(|| language.clone());

        let block = CodeBlock {
            language: language.clone(),
            syntax,
            source,
            order: builder.blocks.len(),
            span: span.clone(),
        };

        if let Some(existing) = builder
            .blocks
            .iter_mut()
            .find(|b| b.language == language)
        {
            self.diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::DuplicateLanguage,
                    format!(
                        "duplicate \"{}\" block in comparison span \"{}\"",
                        language, builder.title
                    ),
                    span,
                    self.file_id,
                )
                .with_note("the later block replaces the earlier one".to_string()),
            );
            // Last write wins, in place: pane position stays stable.
            let order = existing.order;
            *existing = CodeBlock { order, ..block };
        } else {
            builder.blocks.push(block);
        }
    }

    /// Validate and seal a span, appending it in encounter order.
    fn seal(&mut self, builder: SpanBuilder, span_end: usize) {
        let span: Range<usize> = builder.span_start..span_end;

        if builder.blocks.is_empty() {
            self.diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::EmptyComparison,
                    format!(
                        "comparison span \"{}\" contains no code blocks",
                        builder.title
                    ),
                    span,
                    self.file_id,
                )
                .with_note("the span is dropped from the renderable set".to_string()),
            );
            return;
        }

        let mut blocks = builder.blocks;
        for (order, block) in blocks.iter_mut().enumerate() {
            block.order = order;
        }

        self.sealed.push(ComparisonSpan {
            title: builder.title,
            compare: builder.compare,
            blocks,
            span,
        });
    }
}
