use std::ops::Range;

/// An opaque `---`-delimited front-matter header.
/// The engine passes it through without interpreting it; `get` offers a
/// naive line-based lookup for callers that want `title:`-style fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    /// Raw header text between the delimiters, as written.
    pub raw: String,
    /// Byte span in source, opening `---` through the closing delimiter line.
    pub span: Range<usize>,
}

impl FrontMatter {
    /// Look up a top-level `key: value` line. Values keep their raw form
    /// apart from trimming and stripping one layer of matching quotes.
    pub fn get(&self, key: &str) -> Option<&str> {
        for line in self.raw.lines() {
            let Some((k, v)) = line.split_once(':') else {
                continue;
            };
            if k.trim() != key {
                continue;
            }
            let v = v.trim();
            let unquoted = v
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .or_else(|| v.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')));
            return Some(unquoted.unwrap_or(v));
        }
        None
    }
}

/// Split a front-matter header off `source`, if one opens the document.
/// Returns the header (with absolute span, offset by `base`) and the
/// absolute byte offset where the body starts. A dangling opening `---`
/// with no closing delimiter is not front matter; the whole text is body.
pub(crate) fn extract(source: &str, base: usize) -> (Option<FrontMatter>, usize) {
    let first_line_end = source.find('\n').unwrap_or(source.len());
    if source[..first_line_end].trim_end_matches('\r') != "---" {
        return (None, base);
    }

    let after_open = &source[first_line_end..];
    let Some(close_pos) = after_open.find("\n---") else {
        return (None, base);
    };

    let raw = after_open[..close_pos]
        .strip_prefix('\n')
        .unwrap_or(&after_open[..close_pos]);
    let raw = raw.trim_end_matches('\r');

    // Skip past the closing delimiter line.
    let after_close = first_line_end + close_pos + 4;
    let rest = &source[after_close..];
    let body_start = after_close
        + rest
            .find('\n')
            .map(|p| p + 1)
            .unwrap_or(rest.len());

    let front_matter = FrontMatter {
        raw: raw.to_string(),
        span: base..base + body_start,
    };
    (Some(front_matter), base + body_start)
}
