mod case_runner;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::diagnostic::Severity;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

const SUBCOMMANDS: &[&str] = &["check", "render", "cases", "help"];

#[derive(Parser)]
#[command(name = "duopane", version, about = "Comparison-block linter for dual-language docs")]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check documents for malformed comparison blocks
    Check(CheckArgs),

    /// Print a document's render models as JSON
    Render(RenderArgs),

    /// Run .case.md conformance fixtures
    Cases(CasesArgs),
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Files or directories (directories are walked for .md/.mdx)
    paths: Vec<String>,

    /// Treat warnings as failures
    #[arg(long)]
    deny_warnings: bool,

    /// Suppress per-diagnostic output, keep the exit code
    #[arg(short, long)]
    quiet: bool,

    /// Dump the parsed document model
    #[arg(long)]
    ast: bool,
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Document to render
    file: String,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,
}

#[derive(clap::Args)]
struct CasesArgs {
    /// Path to a .case.md file or a directory containing them
    path: String,

    /// List discovered case files and exit
    #[arg(long)]
    list: bool,
}

fn main() {
    // If the first positional arg is not a known subcommand, inject "check"
    // so `duopane file.mdx` works like `duopane check file.mdx`.
    let mut args: Vec<String> = std::env::args().collect();
    if let Some(first_pos) = args.iter().skip(1).find(|a| !a.starts_with('-')) {
        let first_pos = first_pos.clone();
        if !SUBCOMMANDS.contains(&first_pos.as_str()) {
            let pos = args.iter().position(|a| *a == first_pos).unwrap();
            args.insert(pos, "check".to_string());
        }
    }

    let cli = Cli::parse_from(&args);

    match cli.command {
        Command::Check(check_args) => {
            let exit_code = do_check(check_args, cli.no_color);
            process::exit(exit_code);
        }
        Command::Render(render_args) => do_render(render_args, cli.no_color),
        Command::Cases(cases_args) => {
            let path = Path::new(&cases_args.path);
            if cases_args.list {
                case_runner::list_cases(path);
                return;
            }
            let exit_code = case_runner::run_cases(path, cli.no_color);
            process::exit(exit_code);
        }
    }
}

fn color_choice(no_color: bool) -> ColorChoice {
    if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

fn do_check(args: CheckArgs, no_color: bool) -> i32 {
    if args.paths.is_empty() {
        eprintln!("error: no files given");
        return 2;
    }

    let mut files_to_check: Vec<PathBuf> = Vec::new();
    for path in &args.paths {
        let path = Path::new(path);
        if path.is_dir() {
            collect_documents(path, &mut files_to_check);
        } else {
            files_to_check.push(path.to_path_buf());
        }
    }
    files_to_check.sort();

    let writer = StandardStream::stderr(color_choice(no_color));
    let config = term::Config::default();

    let mut files = SimpleFiles::new();
    let mut checked = 0usize;
    let mut warnings = 0usize;
    let mut errors = 0usize;

    for path in &files_to_check {
        let source = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: cannot read '{}': {}", path.display(), e);
                errors += 1;
                continue;
            }
        };
        let file_id = files.add(path.display().to_string(), source.clone());

        let result = duopane::parser::Parser::new(source, file_id).parse();
        checked += 1;

        if args.ast {
            println!("{:#?}", result.document);
        }

        for diagnostic in &result.diagnostics {
            match diagnostic.severity() {
                Severity::Error => errors += 1,
                _ => warnings += 1,
            }
            if !args.quiet {
                let _ = term::emit_to_write_style(
                    &mut writer.lock(),
                    &config,
                    &files,
                    &diagnostic.to_codespan(),
                );
            }
        }
    }

    if !args.quiet {
        eprintln!(
            "checked {} document(s): {} error(s), {} warning(s)",
            checked, errors, warnings
        );
    }

    if errors > 0 || (args.deny_warnings && warnings > 0) {
        1
    } else {
        0
    }
}

fn do_render(args: RenderArgs, no_color: bool) {
    let source = match std::fs::read_to_string(&args.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", args.file, e);
            process::exit(1);
        }
    };

    let mut files = SimpleFiles::new();
    let file_id = files.add(args.file.clone(), source.clone());

    let result = duopane::parser::Parser::new(source, file_id).parse();

    // Diagnostics go to stderr; valid spans still render.
    let writer = StandardStream::stderr(color_choice(no_color));
    let config = term::Config::default();
    for diagnostic in &result.diagnostics {
        let _ = term::emit_to_write_style(
            &mut writer.lock(),
            &config,
            &files,
            &diagnostic.to_codespan(),
        );
    }

    let models = render::build_document(&result.document);
    let json = if args.pretty {
        serde_json::to_string_pretty(&models)
    } else {
        serde_json::to_string(&models)
    };
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: cannot serialize render models: {}", e);
            process::exit(1);
        }
    }
}

/// Recursively collect .md/.mdx files under a directory.
fn collect_documents(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_documents(&path, out);
        } else if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.ends_with(".md") || name.ends_with(".mdx") {
                out.push(path);
            }
        }
    }
}
