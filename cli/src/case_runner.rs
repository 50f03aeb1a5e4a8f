use std::path::{Path, PathBuf};

use serde::Deserialize;

use duopane::diagnostic::Diagnostic;
use duopane::parser::{ParseResult, Parser};

#[derive(Debug, Deserialize)]
pub struct ExpectedDiagnostic {
    /// Substring that must appear in the diagnostic message.
    pub contains: String,

    /// If set, the diagnostic kind name must match (e.g. "duplicate-language").
    #[serde(default)]
    pub kind: Option<String>,

    /// If set, the diagnostic's span must start on this 1-based source line.
    #[serde(default)]
    pub line: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ExpectedPane {
    /// Index of the sealed span the pane belongs to.
    #[serde(default)]
    pub span: usize,

    /// Pane language key.
    pub language: String,

    /// Expected display label.
    #[serde(default)]
    pub label: Option<String>,

    /// Expected pane position within its span.
    #[serde(default)]
    pub order: Option<usize>,

    /// Expected exact source (trimmed comparison).
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CaseConfig {
    /// Human-readable case description.
    #[serde(default)]
    pub description: Option<String>,

    /// Expected number of sealed spans.
    #[serde(default)]
    pub expect_spans: Option<usize>,

    /// Expected diagnostics. If present (even empty), count and content are
    /// checked; absent means diagnostics are not checked.
    #[serde(default)]
    pub expect_diagnostics: Option<Vec<ExpectedDiagnostic>>,

    /// Expected panes, checked through the render model builder.
    #[serde(default)]
    pub expect_panes: Option<Vec<ExpectedPane>>,
}

/// Parse a `.case.md` file into its TOML config and document body.
fn parse_case_file(content: &str) -> Result<(CaseConfig, &str), String> {
    let content = content.trim_start_matches('\u{feff}'); // strip BOM

    if !content.starts_with("---") {
        return Err("missing opening --- config delimiter".into());
    }

    let after_open = &content[3..];
    let after_open = after_open
        .strip_prefix('\n')
        .or_else(|| after_open.strip_prefix("\r\n"))
        .unwrap_or(after_open);

    let close_pos = after_open
        .find("\n---")
        .ok_or("missing closing --- config delimiter")?;

    let toml_str = after_open[..close_pos].trim_end_matches('\r');
    let rest_start = close_pos + 4; // skip \n---
    let body = after_open[rest_start..]
        .strip_prefix("\r\n")
        .or_else(|| after_open[rest_start..].strip_prefix('\n'))
        .unwrap_or(&after_open[rest_start..]);

    let config: CaseConfig =
        toml::from_str(toml_str).map_err(|e| format!("TOML parse error: {}", e))?;

    Ok((config, body))
}

pub enum CaseOutcome {
    Pass,
    Fail(String),
}

pub struct CaseResult {
    pub path: PathBuf,
    pub description: Option<String>,
    pub outcome: CaseOutcome,
}

fn run_single_case(path: &Path) -> CaseResult {
    let fail = |description: Option<String>, reason: String| CaseResult {
        path: path.to_path_buf(),
        description,
        outcome: CaseOutcome::Fail(reason),
    };

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => return fail(None, format!("cannot read file: {}", e)),
    };

    let (config, body) = match parse_case_file(&content) {
        Ok(pair) => pair,
        Err(e) => return fail(None, format!("config error: {}", e)),
    };

    let description = config.description.clone();

    let result = Parser::new(body.to_string(), 0).parse();

    if let Some(expected) = config.expect_spans {
        let actual = result.document.spans.len();
        if actual != expected {
            return fail(
                description,
                format!("expected {} sealed span(s), got {}", expected, actual),
            );
        }
    }

    if let Some(expected) = &config.expect_diagnostics {
        if let Some(reason) = check_diagnostics(body, &result.diagnostics, expected) {
            return fail(description, reason);
        }
    }

    if let Some(expected) = &config.expect_panes {
        if let Some(reason) = check_panes(&result, expected) {
            return fail(description, reason);
        }
    }

    CaseResult {
        path: path.to_path_buf(),
        description,
        outcome: CaseOutcome::Pass,
    }
}

/// Convert a byte offset in `source` to a 1-based line number.
fn byte_offset_to_line(source: &str, offset: usize) -> usize {
    source[..offset.min(source.len())]
        .bytes()
        .filter(|&b| b == b'\n')
        .count()
        + 1
}

/// Check that actual diagnostics match expectations. Returns `Some(reason)`
/// on mismatch.
fn check_diagnostics(
    source: &str,
    actual: &[Diagnostic],
    expected: &[ExpectedDiagnostic],
) -> Option<String> {
    if actual.len() != expected.len() {
        let actual_msgs: Vec<String> = actual
            .iter()
            .map(|d| format!("  - {}", d))
            .collect();
        return Some(format!(
            "expected {} diagnostic(s), got {}\n  actual diagnostics:\n{}",
            expected.len(),
            actual.len(),
            if actual_msgs.is_empty() {
                "    (none)".to_string()
            } else {
                actual_msgs.join("\n")
            }
        ));
    }

    for (i, (actual, expected)) in actual.iter().zip(expected.iter()).enumerate() {
        if let Some(kind) = &expected.kind {
            if actual.kind.name() != kind {
                return Some(format!(
                    "diagnostic[{}]: expected kind \"{}\", got \"{}\"",
                    i,
                    kind,
                    actual.kind.name()
                ));
            }
        }

        if !actual.message.contains(&expected.contains) {
            return Some(format!(
                "diagnostic[{}]: expected message containing \"{}\", got: {}",
                i, expected.contains, actual.message
            ));
        }

        if let Some(expected_line) = expected.line {
            let actual_line = byte_offset_to_line(source, actual.span.start);
            if actual_line != expected_line {
                return Some(format!(
                    "diagnostic[{}]: expected on line {}, but span is on line {}",
                    i, expected_line, actual_line
                ));
            }
        }
    }

    None
}

/// Check pane expectations against the built render models.
fn check_panes(result: &ParseResult, expected: &[ExpectedPane]) -> Option<String> {
    let models = render::build_document(&result.document);

    for (i, exp) in expected.iter().enumerate() {
        let Some(model) = models.get(exp.span) else {
            return Some(format!(
                "pane[{}]: span index {} out of range ({} span(s))",
                i,
                exp.span,
                models.len()
            ));
        };

        let Some(pane) = model.panes.iter().find(|p| p.language == exp.language) else {
            return Some(format!(
                "pane[{}]: no \"{}\" pane in span {} (\"{}\")",
                i, exp.language, exp.span, model.title
            ));
        };

        if let Some(label) = &exp.label {
            if &pane.label != label {
                return Some(format!(
                    "pane[{}]: expected label \"{}\", got \"{}\"",
                    i, label, pane.label
                ));
            }
        }

        if let Some(order) = exp.order {
            if pane.order != order {
                return Some(format!(
                    "pane[{}]: expected order {}, got {}",
                    i, order, pane.order
                ));
            }
        }

        if let Some(source) = &exp.source {
            if pane.source.trim() != source.trim() {
                return Some(format!(
                    "pane[{}]: source mismatch\n  expected: {}\n  actual:   {}",
                    i,
                    source.trim(),
                    pane.source.trim()
                ));
            }
        }
    }

    None
}

/// Discover `.case.md` files under `root`, sorted for stable output.
fn discover(root: &Path) -> Vec<PathBuf> {
    let mut cases = Vec::new();
    collect_cases(root, &mut cases);
    cases.sort();
    cases
}

fn collect_cases(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_cases(&path, out);
        } else if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.ends_with(".case.md") {
                out.push(path);
            }
        }
    }
}

/// List discovered case files.
pub fn list_cases(path: &Path) {
    if path.is_file() {
        eprintln!("(single file)");
        return;
    }
    let cases = discover(path);
    if cases.is_empty() {
        eprintln!("no .case.md files found in {}", path.display());
        return;
    }
    for case in &cases {
        eprintln!("  {}", case.display());
    }
    eprintln!("{} case(s)", cases.len());
}

fn pass_label(no_color: bool) -> &'static str {
    if no_color { "PASS" } else { "\x1b[32mPASS\x1b[0m" }
}

fn fail_label(no_color: bool) -> &'static str {
    if no_color { "FAIL" } else { "\x1b[31mFAIL\x1b[0m" }
}

/// Run all `.case.md` files under `path` (or a single file).
/// Returns exit code: 0 = all pass, 1 = any failure.
pub fn run_cases(path: &Path, no_color: bool) -> i32 {
    let cases = if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        discover(path)
    };

    if cases.is_empty() {
        eprintln!("no .case.md files found in {}", path.display());
        return 1;
    }

    let mut passed = 0usize;
    let mut failures: Vec<CaseResult> = Vec::new();

    for case in &cases {
        let result = run_single_case(case);
        let label = result.description.clone().unwrap_or_else(|| {
            case.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("?")
                .to_string()
        });

        match &result.outcome {
            CaseOutcome::Pass => {
                passed += 1;
                eprintln!("  {}  {}", pass_label(no_color), label);
            }
            CaseOutcome::Fail(_) => {
                eprintln!("  {}  {}", fail_label(no_color), label);
                failures.push(result);
            }
        }
    }

    if !failures.is_empty() {
        eprintln!();
        eprintln!("failures:");
        for f in &failures {
            eprintln!();
            eprintln!("  --- {} ---", f.path.display());
            if let CaseOutcome::Fail(reason) = &f.outcome {
                for line in reason.lines() {
                    eprintln!("  {}", line);
                }
            }
        }
    }

    eprintln!();
    let failed = failures.len();
    if failed == 0 {
        let ok = if no_color { "ok" } else { "\x1b[32mok\x1b[0m" };
        eprintln!("case result: {}. {} passed, 0 failed", ok, passed);
        0
    } else {
        let label = if no_color {
            "FAILED"
        } else {
            "\x1b[31mFAILED\x1b[0m"
        };
        eprintln!(
            "case result: {}. {} passed, {} failed (of {})",
            label,
            passed,
            failed,
            passed + failed
        );
        1
    }
}
