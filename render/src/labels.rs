/// Display label for a pane language key.
///
/// Language keys are open strings, not a closed enum: known keys map to their
/// conventional names, anything else falls back to the uppercased raw key so
/// new languages never need a code change to render.
pub fn display_label(key: &str) -> String {
    match key {
        "js" | "javascript" => "JavaScript".to_string(),
        "jsx" => "JSX".to_string(),
        "ts" | "typescript" => "TypeScript".to_string(),
        "tsx" => "TSX".to_string(),
        "swift" => "Swift".to_string(),
        "objc" | "objectivec" => "Objective-C".to_string(),
        "kotlin" => "Kotlin".to_string(),
        "java" => "Java".to_string(),
        "py" | "python" => "Python".to_string(),
        "rb" | "ruby" => "Ruby".to_string(),
        "rs" | "rust" => "Rust".to_string(),
        "go" => "Go".to_string(),
        "c" => "C".to_string(),
        "cpp" => "C++".to_string(),
        "cs" | "csharp" => "C#".to_string(),
        "sh" | "bash" | "shell" => "Shell".to_string(),
        "html" => "HTML".to_string(),
        "css" => "CSS".to_string(),
        "json" => "JSON".to_string(),
        "yaml" | "yml" => "YAML".to_string(),
        "toml" => "TOML".to_string(),
        "sql" => "SQL".to_string(),
        "md" | "markdown" => "Markdown".to_string(),
        other => other.to_uppercase(),
    }
}
