/// The component tag that delimits a comparison span. Tags always sit on
/// their own line in this format.
pub const SPAN_TAG: &str = "UniversalEditor";

/// A recognized tag line.
#[derive(Debug, Clone, PartialEq)]
pub enum TagLine {
    Open(OpenTag),
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenTag {
    pub title: String,
    pub compare: bool,
    /// `<UniversalEditor … />` — opens and closes in one line.
    pub self_closing: bool,
}

/// Recognize a span tag occupying a whole line. Anything else is plain text.
pub fn parse_line(line: &str) -> Option<TagLine> {
    let trimmed = line.trim();

    if let Some(rest) = trimmed.strip_prefix("</") {
        let rest = rest.trim_start().strip_prefix(SPAN_TAG)?;
        return (rest.trim() == ">").then_some(TagLine::Close);
    }

    let rest = trimmed.strip_prefix('<')?.strip_prefix(SPAN_TAG)?;
    // The tag name must end here, not be a prefix of a longer name.
    if !rest.is_empty()
        && !rest.starts_with(|c: char| c.is_whitespace())
        && !rest.starts_with('>')
        && !rest.starts_with('/')
    {
        return None;
    }

    parse_attributes(rest)
}

/// Parse ` title="…" compare={true}>` (or `/>`), tolerating MDX attribute
/// forms: double/single-quoted strings, `{expr}` braces, bare tokens, and
/// valueless flags.
fn parse_attributes(mut rest: &str) -> Option<TagLine> {
    let mut title = String::new();
    let mut compare = false;

    loop {
        rest = rest.trim_start();

        if let Some(after) = rest.strip_prefix("/>") {
            if !after.trim().is_empty() {
                return None;
            }
            return Some(TagLine::Open(OpenTag {
                title,
                compare,
                self_closing: true,
            }));
        }
        if let Some(after) = rest.strip_prefix('>') {
            if !after.trim().is_empty() {
                return None;
            }
            return Some(TagLine::Open(OpenTag {
                title,
                compare,
                self_closing: false,
            }));
        }
        if rest.is_empty() {
            // Tag never closed on this line; not a tag line.
            return None;
        }

        let name_len = rest
            .find(|c: char| c == '=' || c == '>' || c == '/' || c.is_whitespace())
            .unwrap_or(rest.len());
        if name_len == 0 {
            return None;
        }
        let name = &rest[..name_len];
        rest = rest[name_len..].trim_start();

        let value = if let Some(after_eq) = rest.strip_prefix('=') {
            let (value, after_value) = parse_value(after_eq.trim_start())?;
            rest = after_value;
            Some(value)
        } else {
            None
        };

        match name {
            "title" => title = value.unwrap_or_default(),
            "compare" => {
                compare = match value.as_deref() {
                    // Bare `compare` means enabled, like HTML boolean attrs.
                    None => true,
                    Some(v) => v.trim() == "true",
                };
            }
            _ => {}
        }
    }
}

/// Parse one attribute value, returning it and the remaining text.
fn parse_value(s: &str) -> Option<(String, &str)> {
    if let Some(inner) = s.strip_prefix('"') {
        let end = inner.find('"')?;
        return Some((inner[..end].to_string(), &inner[end + 1..]));
    }
    if let Some(inner) = s.strip_prefix('\'') {
        let end = inner.find('\'')?;
        return Some((inner[..end].to_string(), &inner[end + 1..]));
    }
    if let Some(inner) = s.strip_prefix('{') {
        let end = inner.find('}')?;
        let value = inner[..end].trim();
        // `{true}`, `{"Title"}`, `{'Title'}` all reduce to their payload.
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
            .unwrap_or(value);
        return Some((value.to_string(), &inner[end + 1..]));
    }
    // Bare token, e.g. compare=true
    let end = s
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    Some((s[..end].to_string(), &s[end..]))
}
