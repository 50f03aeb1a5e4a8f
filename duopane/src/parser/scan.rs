use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Parser as CmarkParser, Tag, TagEnd};

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::parser::tag::{self, OpenTag, TagLine};

/// One scanner event, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    OpenSpan {
        tag: OpenTag,
        span: Range<usize>,
    },
    CloseSpan {
        span: Range<usize>,
    },
    Fence(RawFence),
}

/// A fenced code block as scanned, before pairing decides whether it
/// belongs to a span.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFence {
    /// Highlight identifier from the info string, if any.
    pub syntax: Option<String>,
    /// Pane key from the `!!` annotation, if any.
    pub key: Option<String>,
    /// Raw code content.
    pub source: String,
    /// Byte span in source, opening fence through closing fence.
    pub span: Range<usize>,
}

/// Scan body text (starting at absolute offset `base`) into an ordered event
/// stream. Span tags are matched per line — MDX component tags are invisible
/// to CommonMark block structure — while the code between tag lines goes
/// through pulldown-cmark so fence semantics stay CommonMark-correct.
pub fn scan(
    body: &str,
    base: usize,
    file_id: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<ScanEvent> {
    let mut events = Vec::new();
    let mut segment_start = 0usize;
    // Open fence delimiter (character and run length). While set, tag
    // lookalikes are code content, not tags.
    let mut open_fence: Option<(char, usize)> = None;

    for (line, range) in lines_with_ranges(body) {
        if let Some((ch, len)) = open_fence {
            if closes_fence(line, ch, len) {
                open_fence = None;
            }
            continue;
        }
        if let Some(delim) = opens_fence(line) {
            open_fence = Some(delim);
            continue;
        }

        let Some(tag_line) = tag::parse_line(line) else {
            continue;
        };

        scan_segment(
            body,
            segment_start..range.start,
            base,
            file_id,
            &mut events,
            diagnostics,
        );
        segment_start = range.end;

        let tag_span = base + range.start..base + range.end;
        match tag_line {
            TagLine::Open(tag) => {
                let self_closing = tag.self_closing;
                events.push(ScanEvent::OpenSpan {
                    tag,
                    span: tag_span.clone(),
                });
                if self_closing {
                    events.push(ScanEvent::CloseSpan { span: tag_span });
                }
            }
            TagLine::Close => events.push(ScanEvent::CloseSpan { span: tag_span }),
        }
    }

    scan_segment(
        body,
        segment_start..body.len(),
        base,
        file_id,
        &mut events,
        diagnostics,
    );
    events
}

/// Extract fenced code blocks from one inter-tag segment.
fn scan_segment(
    body: &str,
    segment: Range<usize>,
    base: usize,
    file_id: usize,
    events: &mut Vec<ScanEvent>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let text = &body[segment.clone()];
    if text.trim().is_empty() {
        return;
    }

    let cmark_events: Vec<(Event<'_>, Range<usize>)> =
        CmarkParser::new(text).into_offset_iter().collect();

    let mut i = 0;
    while i < cmark_events.len() {
        let (ref ev, ref range) = cmark_events[i];
        match ev {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                let info = info.to_string();
                i += 1;
                let source = collect_text_until(&cmark_events, &mut i, |e| {
                    matches!(e, TagEnd::CodeBlock)
                });

                let abs = base + segment.start + range.start..base + segment.start + range.end;
                if !fence_terminated(&text[range.clone()]) {
                    // pulldown auto-closes at end of input; the raw text is
                    // the ground truth for whether the author closed it.
                    diagnostics.push(
                        Diagnostic::new(
                            DiagnosticKind::UnterminatedBlock,
                            "code fence is never closed",
                            abs,
                            file_id,
                        )
                        .with_note("the region is treated as plain text".to_string()),
                    );
                    continue;
                }

                let (syntax, key) = parse_fence_info(&info);
                events.push(ScanEvent::Fence(RawFence {
                    syntax,
                    key,
                    source,
                    span: abs,
                }));
            }
            _ => {
                // Everything else — prose, indented code, inline markup —
                // is plain text to this engine.
                i += 1;
            }
        }
    }
}

/// Split a fence info string into highlight id and pane key:
/// `js!!js`, `swift !! swift`, plain `js`, or empty.
fn parse_fence_info(info: &str) -> (Option<String>, Option<String>) {
    let info = info.trim();
    let (syntax, key) = match info.split_once("!!") {
        Some((left, right)) => {
            let key = right.trim().split_whitespace().next();
            (left.trim(), key)
        }
        None => (info.split_whitespace().next().unwrap_or(""), None),
    };
    let syntax = (!syntax.is_empty()).then(|| syntax.to_string());
    let key = key.filter(|k| !k.is_empty()).map(|k| k.to_string());
    (syntax, key)
}

/// Collect all text content until a matching End tag.
fn collect_text_until(
    events: &[(Event<'_>, Range<usize>)],
    i: &mut usize,
    is_end: impl Fn(&TagEnd) -> bool,
) -> String {
    let mut text = String::new();
    while *i < events.len() {
        let (ref ev, _) = events[*i];
        match ev {
            Event::End(tag_end) if is_end(tag_end) => {
                *i += 1;
                break;
            }
            Event::Text(s) => {
                text.push_str(s);
                *i += 1;
            }
            _ => {
                *i += 1;
            }
        }
    }
    text
}

/// Whether the raw text of a fenced block ends with a real closing fence.
fn fence_terminated(text: &str) -> bool {
    let mut lines = text.lines();
    let Some(first) = lines.next() else {
        return false;
    };
    let Some((ch, len)) = opens_fence(first) else {
        return false;
    };
    match lines.last() {
        Some(last) => closes_fence(last, ch, len),
        None => false,
    }
}

fn opens_fence(line: &str) -> Option<(char, usize)> {
    let stripped = strip_fence_indent(line)?;
    let ch = stripped.chars().next()?;
    if ch != '`' && ch != '~' {
        return None;
    }
    let run = stripped.chars().take_while(|c| *c == ch).count();
    if run < 3 {
        return None;
    }
    // Backtick info strings cannot contain backticks.
    if ch == '`' && stripped[run..].contains('`') {
        return None;
    }
    Some((ch, run))
}

fn closes_fence(line: &str, ch: char, len: usize) -> bool {
    let Some(stripped) = strip_fence_indent(line) else {
        return false;
    };
    let trimmed = stripped.trim_end();
    !trimmed.is_empty()
        && trimmed.chars().all(|c| c == ch)
        && trimmed.chars().count() >= len
}

/// Fences allow up to three spaces of indentation.
fn strip_fence_indent(line: &str) -> Option<&str> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    (indent <= 3).then(|| &line[indent..])
}

fn lines_with_ranges(text: &str) -> impl Iterator<Item = (&str, Range<usize>)> {
    let mut pos = 0usize;
    text.split_inclusive('\n').map(move |raw| {
        let start = pos;
        pos += raw.len();
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);
        (line, start..start + raw.len())
    })
}
