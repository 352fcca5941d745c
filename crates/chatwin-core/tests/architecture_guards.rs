//! Architecture guard tests for chatwin-core.
//!
//! These tests scan the library sources to keep a few conventions in place:
//! - Error types derive `thiserror::Error`
//! - No `Result<_, String>`; everything returns `ChatResult`
//! - No `unwrap()` / `expect()` outside test code
//! - File size limits
//! - No bare generic type names for public types
//!
//! Run: `cargo test --package chatwin-core --test architecture_guards -- --nocapture`

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Library sources with everything from the first `#[cfg(test)]` on removed.
struct Source {
    relative: String,
    lines: Vec<String>,
}

fn walkdir(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(walkdir(&path));
            } else {
                files.push(path);
            }
        }
    }
    files
}

fn crate_src() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src")
}

fn is_test_file(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == "tests.rs")
}

fn library_sources() -> Vec<Source> {
    let src = crate_src();
    let mut sources: Vec<Source> = walkdir(&src)
        .into_iter()
        .filter(|p| p.extension().is_some_and(|e| e == "rs") && !is_test_file(p))
        .filter_map(|path| {
            let content = fs::read_to_string(&path).ok()?;
            let lines = content
                .lines()
                .take_while(|l| l.trim() != "#[cfg(test)]")
                .map(str::to_string)
                .collect();
            let relative = path
                .strip_prefix(&src)
                .unwrap_or(&path)
                .to_string_lossy()
                .into_owned();
            Some(Source { relative, lines })
        })
        .collect();
    sources.sort_by(|a, b| a.relative.cmp(&b.relative));
    sources
}

fn is_comment(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with("//") || trimmed.starts_with('*')
}

fn report(rule: &str, advice: &str, violations: &[(String, usize, String)]) {
    if violations.is_empty() {
        return;
    }
    let mut msg = format!("\n[{}] {}\n\n", rule, advice);
    for (file, line, text) in violations {
        msg.push_str(&format!("  src/{}:{} -> {}\n", file, line, text));
    }
    panic!("{msg}");
}

#[test]
fn test_sources_found() {
    let sources = library_sources();
    assert!(sources.iter().any(|s| s.relative.ends_with("engine.rs")));
    assert!(sources.iter().all(|s| !s.relative.ends_with("tests.rs")));
}

// ---------------------------------------------------------------------------
// CW-ERR-01: Error types must use thiserror, no hand-written Display
// ---------------------------------------------------------------------------

#[test]
fn test_error_types_use_thiserror() {
    let mut violations = Vec::new();
    for source in library_sources() {
        for (i, line) in source.lines.iter().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with("impl") && trimmed.contains("Display for") && trimmed.contains("Error") {
                violations.push((source.relative.clone(), i + 1, trimmed.to_string()));
            }
        }
    }
    report(
        "CW-ERR-01",
        "Hand-written Display for Error types detected. Use #[derive(thiserror::Error)].",
        &violations,
    );
}

// ---------------------------------------------------------------------------
// CW-ERR-02: No Result<_, String>
// ---------------------------------------------------------------------------

#[test]
fn test_no_result_string() {
    let mut violations = Vec::new();
    for source in library_sources() {
        for (i, line) in source.lines.iter().enumerate() {
            if is_comment(line) {
                continue;
            }
            if let Some(pos) = line.find("Result<") {
                let after = &line[pos..];
                if after.contains(", String>") || after.contains(",String>") {
                    violations.push((source.relative.clone(), i + 1, line.trim().to_string()));
                }
            }
        }
    }
    report(
        "CW-ERR-02",
        "Result<_, String> found. Use ChatResult instead.",
        &violations,
    );
}

// ---------------------------------------------------------------------------
// CW-ERR-03: No unwrap()/expect() in library code
// ---------------------------------------------------------------------------

#[test]
fn test_no_unwrap_in_library_code() {
    let mut violations = Vec::new();
    for source in library_sources() {
        for (i, line) in source.lines.iter().enumerate() {
            if is_comment(line) {
                continue;
            }
            if line.contains(".unwrap()") || line.contains(".expect(") {
                violations.push((source.relative.clone(), i + 1, line.trim().to_string()));
            }
        }
    }
    report(
        "CW-ERR-03",
        "unwrap()/expect() in library code. Propagate a ChatError instead.",
        &violations,
    );
}

// ---------------------------------------------------------------------------
// CW-SIZE-01: File size limits (400 lines of non-test code)
// ---------------------------------------------------------------------------

#[test]
fn test_file_size_limits() {
    const MAX_LINES: usize = 400;

    let violations: Vec<(String, usize, String)> = library_sources()
        .into_iter()
        .filter(|s| s.lines.len() > MAX_LINES)
        .map(|s| {
            let count = s.lines.len();
            (s.relative, count, "split into submodules".to_string())
        })
        .collect();
    report(
        "CW-SIZE-01",
        &format!("Files exceeding {MAX_LINES} lines of non-test code."),
        &violations,
    );
}

// ---------------------------------------------------------------------------
// CW-NAME-01: No bare generic type names for public types
// ---------------------------------------------------------------------------

#[test]
fn test_no_bare_generic_type_names() {
    let bare_names: HashSet<&str> = ["Error", "Config", "Status", "Result", "Context", "Session"]
        .into_iter()
        .collect();

    let mut violations = Vec::new();
    for source in library_sources() {
        for (i, line) in source.lines.iter().enumerate() {
            let trimmed = line.trim();
            if !trimmed.starts_with("pub struct") && !trimmed.starts_with("pub enum") {
                continue;
            }
            let type_name = trimmed
                .trim_start_matches("pub struct ")
                .trim_start_matches("pub enum ")
                .split(|c: char| !c.is_alphanumeric() && c != '_')
                .next()
                .unwrap_or("");
            if bare_names.contains(type_name) {
                violations.push((source.relative.clone(), i + 1, trimmed.to_string()));
            }
        }
    }
    report(
        "CW-NAME-01",
        "Bare generic type names for public types. Use a domain prefix: ChatError, BudgetConfig.",
        &violations,
    );
}
