use std::fmt::Write as _;

use duopane::parser::SPAN_TAG;

use crate::RenderModel;

/// Serialize a render model back into tagged, fenced markdown.
///
/// This is the content-preserving inverse of parsing: re-scanning the output
/// yields the same {language, source} pairs. It doubles as a plain-markdown
/// fallback for consumers without the component runtime.
pub fn to_markdown(model: &RenderModel) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "<{} title=\"{}\" compare={{{}}}>",
        SPAN_TAG, model.title, model.compare
    );

    for pane in &model.panes {
        let delim = fence_delimiter(&pane.source);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}{}!!{}", delim, pane.syntax, pane.language);
        out.push_str(&pane.source);
        if !pane.source.is_empty() && !pane.source.ends_with('\n') {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", delim);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "</{}>", SPAN_TAG);
    out
}

/// Serialize a whole document's render models, separated by blank lines.
pub fn document_to_markdown(models: &[RenderModel]) -> String {
    let mut out = String::new();
    for (i, model) in models.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&to_markdown(model));
    }
    out
}

/// A backtick run one longer than any run inside the source, minimum three,
/// so code showing fences still round-trips.
fn fence_delimiter(source: &str) -> String {
    let mut longest = 0usize;
    let mut current = 0usize;
    for c in source.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}
