use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use pegboard::PegboardError;
use pegboard_cli::{Args, run};

/// Demos live at the workspace root, relative to the workspace, not the crate
fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all .peg files from a directory
fn collect_peg_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("peg")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args_for(grammar: &Path, input: &Path) -> Args {
    Args {
        grammar: grammar.to_string_lossy().to_string(),
        input: Some(input.to_string_lossy().to_string()),
        start: "root".to_string(),
        config: None,
        print_grammar: false,
        log_level: "off".to_string(),
    }
}

fn run_to_string(args: &Args) -> Result<String, PegboardError> {
    let mut out = Vec::new();
    run(args, &mut out)?;
    Ok(String::from_utf8(out).expect("output is UTF-8"))
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let demos = collect_peg_files(demos_dir());
    assert!(!demos.is_empty(), "No demos found in demos/");

    let mut failed = Vec::new();

    for grammar in &demos {
        let input = grammar.with_extension("txt");
        match run_to_string(&args_for(grammar, &input)) {
            Ok(output) if output.starts_with("root\n") => {}
            Ok(output) => failed.push((grammar.clone(), format!("unexpected output:\n{output}"))),
            Err(err) => failed.push((grammar.clone(), err.to_string())),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nDemos that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let demos = collect_peg_files(demos_dir().join("errors"));
    assert!(!demos.is_empty(), "No error demos found in demos/errors/");

    let mut unexpectedly_succeeded = Vec::new();

    for grammar in &demos {
        let input = grammar.with_extension("txt");
        if run_to_string(&args_for(grammar, &input)).is_ok() {
            unexpectedly_succeeded.push(grammar.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_tree_output() {
    let dir = tempdir().expect("Failed to create temp directory");
    let grammar = dir.path().join("pair.peg");
    let input = dir.path().join("pair.txt");
    fs::write(&grammar, "pair -> key '=' value;\nkey:k -> 'a';\nvalue: -> 'b' | 'c';\n").unwrap();
    fs::write(&input, "a=c").unwrap();

    let mut args = args_for(&grammar, &input);
    args.start = "pair".to_string();

    let output = run_to_string(&args).expect("run succeeds");
    assert_eq!(output, "pair\n  k\n    \"a\"\n  \"=\"\n  \"c\"\n");
}

#[test]
fn e2e_print_grammar_and_config() {
    let dir = tempdir().expect("Failed to create temp directory");
    let grammar = dir.path().join("word.peg");
    let input = dir.path().join("word.txt");
    let config = dir.path().join("config.toml");
    fs::write(&grammar, "root -> 'o' 'k';").unwrap();
    fs::write(&input, "ok").unwrap();
    fs::write(&config, "[output]\nformat = \"debug\"\n").unwrap();

    let mut args = args_for(&grammar, &input);
    args.print_grammar = true;
    args.config = Some(config.to_string_lossy().to_string());

    let output = run_to_string(&args).expect("run succeeds");
    assert!(output.starts_with("root -> (\"o\" \"k\");"), "got:\n{output}");
    assert!(output.ends_with("root(\"o\" \"k\")\n"), "got:\n{output}");
}

#[test]
fn e2e_match_failure_reports_offset() {
    let dir = tempdir().expect("Failed to create temp directory");
    let grammar = dir.path().join("ab.peg");
    let input = dir.path().join("ab.txt");
    fs::write(&grammar, "root -> 'a' 'b';").unwrap();
    fs::write(&input, "ax").unwrap();

    match run_to_string(&args_for(&grammar, &input)) {
        Err(PegboardError::Match { failure, input }) => {
            assert_eq!(input, "ax");
            assert_eq!(failure.offset(), 1);
        }
        other => panic!("Expected Match error, got {other:?}"),
    }
}

#[test]
fn e2e_missing_grammar_file_is_io_error() {
    let dir = tempdir().expect("Failed to create temp directory");
    let grammar = dir.path().join("absent.peg");

    let result = run_to_string(&args_for(&grammar, &grammar));

    assert!(matches!(result, Err(PegboardError::Io(_))));
}
