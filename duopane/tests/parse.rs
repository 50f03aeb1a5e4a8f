use duopane::diagnostic::DiagnosticKind;
use duopane::parser::{ParseResult, Parser};

fn parse(source: &str) -> ParseResult {
    Parser::new(source.to_string(), 0).parse()
}

fn diagnostic_kinds(result: &ParseResult) -> Vec<DiagnosticKind> {
    result.diagnostics.iter().map(|d| d.kind).collect()
}

#[test]
fn two_pane_comparison() {
    let result = parse(
        r#"<UniversalEditor title="T" compare={true}>

```js!!js
console.log(1)
```

```swift!!swift
print(1)
```

</UniversalEditor>
"#,
    );

    assert!(result.is_clean(), "diagnostics: {:?}", result.diagnostics);
    assert_eq!(result.document.spans.len(), 1);

    let span = &result.document.spans[0];
    assert_eq!(span.title, "T");
    assert!(span.compare);
    assert_eq!(span.blocks.len(), 2);

    assert_eq!(span.blocks[0].language, "js");
    assert_eq!(span.blocks[0].syntax, "js");
    assert_eq!(span.blocks[0].source, "console.log(1)\n");
    assert_eq!(span.blocks[0].order, 0);

    assert_eq!(span.blocks[1].language, "swift");
    assert_eq!(span.blocks[1].source, "print(1)\n");
    assert_eq!(span.blocks[1].order, 1);
}

#[test]
fn pane_order_follows_source_order() {
    let result = parse(
        r#"<UniversalEditor title="Swapped" compare={true}>

```swift!!swift
print(1)
```

```js!!js
console.log(1)
```

</UniversalEditor>
"#,
    );

    assert!(result.is_clean());
    let span = &result.document.spans[0];
    assert_eq!(span.blocks[0].language, "swift");
    assert_eq!(span.blocks[1].language, "js");
}

#[test]
fn unterminated_span_is_dropped() {
    let result = parse(
        r#"<UniversalEditor title="Dangling" compare={true}>

```js!!js
console.log(1)
```
"#,
    );

    assert_eq!(result.document.spans.len(), 0);
    assert_eq!(
        diagnostic_kinds(&result),
        vec![DiagnosticKind::UnterminatedBlock]
    );
}

#[test]
fn missing_language_tag_excludes_the_block() {
    let result = parse(
        r#"<UniversalEditor title="T" compare={true}>

```
mystery()
```

```js!!js
console.log(1)
```

</UniversalEditor>
"#,
    );

    assert_eq!(
        diagnostic_kinds(&result),
        vec![DiagnosticKind::MissingLanguageTag]
    );
    // The span still seals with the remaining valid block.
    assert_eq!(result.document.spans.len(), 1);
    let span = &result.document.spans[0];
    assert_eq!(span.blocks.len(), 1);
    assert_eq!(span.blocks[0].language, "js");
    assert_eq!(span.blocks[0].order, 0);
}

#[test]
fn empty_span_is_discarded() {
    let result = parse(
        r#"<UniversalEditor title="Nothing" compare={true}>

Some prose, but no code.

</UniversalEditor>
"#,
    );

    assert_eq!(result.document.spans.len(), 0);
    assert_eq!(
        diagnostic_kinds(&result),
        vec![DiagnosticKind::EmptyComparison]
    );
}

#[test]
fn duplicate_language_last_write_wins_in_place() {
    let result = parse(
        r#"<UniversalEditor title="Corrected" compare={true}>

```js!!js
console.log(1)
```

```swift!!swift
print(2)
```

```js!!js
console.log(2)
```

</UniversalEditor>
"#,
    );

    assert_eq!(
        diagnostic_kinds(&result),
        vec![DiagnosticKind::DuplicateLanguage]
    );
    let span = &result.document.spans[0];
    assert_eq!(span.blocks.len(), 2);
    // The later js block replaced the earlier one without moving.
    assert_eq!(span.blocks[0].language, "js");
    assert_eq!(span.blocks[0].source, "console.log(2)\n");
    assert_eq!(span.blocks[0].order, 0);
    assert_eq!(span.blocks[1].language, "swift");
}

#[test]
fn nested_open_seals_the_previous_span() {
    let result = parse(
        r#"<UniversalEditor title="A" compare={true}>

```js!!js
a()
```

<UniversalEditor title="B" compare={true}>

```js!!js
b()
```

</UniversalEditor>
"#,
    );

    assert_eq!(
        diagnostic_kinds(&result),
        vec![DiagnosticKind::NestedSpanNotClosed]
    );
    assert_eq!(result.document.spans.len(), 2);
    assert_eq!(result.document.spans[0].title, "A");
    assert_eq!(result.document.spans[0].blocks[0].source, "a()\n");
    assert_eq!(result.document.spans[1].title, "B");
    assert_eq!(result.document.spans[1].blocks[0].source, "b()\n");
}

#[test]
fn parsing_is_idempotent() {
    let source = r#"---
title: Page
---

<UniversalEditor title="T" compare={true}>

```js!!js
console.log(1)
```

```js!!js
duplicate()
```

</UniversalEditor>

<UniversalEditor title="Empty" compare={true}>
</UniversalEditor>
"#;

    let first = parse(source);
    let second = parse(source);
    assert_eq!(first.document, second.document);
    assert_eq!(diagnostic_kinds(&first), diagnostic_kinds(&second));
}

#[test]
fn front_matter_is_opaque_passthrough() {
    let result = parse(
        r#"---
title: Variables and Types
description: "Swift for JS developers"
---

<UniversalEditor title="T" compare={true}>

```js!!js
let x = 1
```

</UniversalEditor>
"#,
    );

    assert!(result.is_clean());
    let front_matter = result.document.front_matter.as_ref().unwrap();
    assert_eq!(front_matter.get("title"), Some("Variables and Types"));
    assert_eq!(
        front_matter.get("description"),
        Some("Swift for JS developers")
    );
    assert_eq!(front_matter.get("missing"), None);
    assert_eq!(result.document.spans.len(), 1);
}

#[test]
fn bom_is_stripped() {
    let result = parse(
        "\u{feff}---\ntitle: X\n---\n\n<UniversalEditor title=\"T\" compare={true}>\n\n```js!!js\nf()\n```\n\n</UniversalEditor>\n",
    );

    assert!(result.is_clean(), "diagnostics: {:?}", result.diagnostics);
    assert_eq!(
        result.document.front_matter.as_ref().unwrap().get("title"),
        Some("X")
    );
    assert_eq!(result.document.spans.len(), 1);
}

#[test]
fn tag_lookalike_inside_fence_is_code() {
    let result = parse(
        r#"<UniversalEditor title="T" compare={true}>

```js!!js
</UniversalEditor>
console.log(1)
```

</UniversalEditor>
"#,
    );

    assert!(result.is_clean(), "diagnostics: {:?}", result.diagnostics);
    assert_eq!(result.document.spans.len(), 1);
    let block = &result.document.spans[0].blocks[0];
    assert!(block.source.contains("</UniversalEditor>"));
    assert!(block.source.contains("console.log(1)"));
}

#[test]
fn fences_outside_spans_are_plain_text() {
    let result = parse(
        r#"Intro prose.

```js
standalone()
```

<UniversalEditor title="T" compare={true}>

```js!!js
inside()
```

</UniversalEditor>
"#,
    );

    assert!(result.is_clean());
    assert_eq!(result.document.spans.len(), 1);
    assert_eq!(result.document.spans[0].blocks.len(), 1);
    assert_eq!(result.document.spans[0].blocks[0].source, "inside()\n");
}

#[test]
fn plain_fence_inside_span_uses_highlight_id() {
    let result = parse(
        r#"<UniversalEditor title="T" compare={false}>

```swift
print(1)
```

</UniversalEditor>
"#,
    );

    assert!(result.is_clean());
    let span = &result.document.spans[0];
    assert!(!span.compare);
    assert_eq!(span.blocks[0].language, "swift");
    assert_eq!(span.blocks[0].syntax, "swift");
}

#[test]
fn attribute_syntax_variants() {
    for open in [
        r#"<UniversalEditor title="T" compare={true}>"#,
        r#"<UniversalEditor title='T' compare=true>"#,
        r#"<UniversalEditor title={"T"} compare="true">"#,
        r#"<UniversalEditor compare title="T">"#,
    ] {
        let source = format!("{open}\n\n```js!!js\nf()\n```\n\n</UniversalEditor>\n");
        let result = parse(&source);
        assert!(result.is_clean(), "open tag {:?}: {:?}", open, result.diagnostics);
        let span = &result.document.spans[0];
        assert_eq!(span.title, "T", "open tag {:?}", open);
        assert!(span.compare, "open tag {:?}", open);
    }
}

#[test]
fn compare_defaults_to_off() {
    let result = parse(
        "<UniversalEditor title=\"Solo\">\n\n```js!!js\nf()\n```\n\n</UniversalEditor>\n",
    );

    assert!(result.is_clean());
    assert!(!result.document.spans[0].compare);
}

#[test]
fn self_closing_tag_is_an_empty_span() {
    let result = parse("<UniversalEditor title=\"Empty\" compare={true} />\n");

    assert_eq!(result.document.spans.len(), 0);
    assert_eq!(
        diagnostic_kinds(&result),
        vec![DiagnosticKind::EmptyComparison]
    );
}

#[test]
fn unterminated_fence_inside_span() {
    let result = parse(
        "<UniversalEditor title=\"T\" compare={true}>\n\n```js!!js\nconsole.log(1)\n",
    );

    // The fence swallows the rest of the document, so both the fence and
    // the span go unterminated.
    assert_eq!(result.document.spans.len(), 0);
    assert_eq!(
        diagnostic_kinds(&result),
        vec![
            DiagnosticKind::UnterminatedBlock,
            DiagnosticKind::UnterminatedBlock
        ]
    );
}

#[test]
fn stray_close_tag_is_ignored() {
    let result = parse(
        r#"</UniversalEditor>

<UniversalEditor title="T" compare={true}>

```js!!js
f()
```

</UniversalEditor>
"#,
    );

    assert!(result.is_clean());
    assert_eq!(result.document.spans.len(), 1);
}

#[test]
fn annotation_with_spaces_and_distinct_key() {
    let result = parse(
        r#"<UniversalEditor title="T" compare={true}>

```javascript !! js
f()
```

</UniversalEditor>
"#,
    );

    assert!(result.is_clean());
    let block = &result.document.spans[0].blocks[0];
    assert_eq!(block.language, "js");
    assert_eq!(block.syntax, "javascript");
}

#[test]
fn multiple_spans_stay_in_document_order() {
    let result = parse(
        r#"<UniversalEditor title="First" compare={true}>

```js!!js
one()
```

</UniversalEditor>

Prose between spans.

<UniversalEditor title="Second" compare={true}>

```swift!!swift
two()
```

</UniversalEditor>
"#,
    );

    assert!(result.is_clean());
    let titles: Vec<&str> = result
        .document
        .spans
        .iter()
        .map(|s| s.title.as_str())
        .collect();
    assert_eq!(titles, vec!["First", "Second"]);
}

#[test]
fn diagnostic_spans_point_into_the_source() {
    let source = "prefix\n\n<UniversalEditor title=\"Dangling\" compare={true}>\n";
    let result = parse(source);

    let diagnostic = &result.diagnostics[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::UnterminatedBlock);
    assert_eq!(diagnostic.span.start, source.find("<UniversalEditor").unwrap());
    assert_eq!(diagnostic.span.end, source.len());
}
