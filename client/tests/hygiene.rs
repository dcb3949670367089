//! Hygiene: source-level rules for the client crate.
//!
//! Two kinds of check over production sources (`src/**/*.rs` minus the
//! `*_test.rs` siblings):
//! - budgets: panics and silently discarded errors, each capped;
//! - confinement: the HTTP client, the bearer header and the session keys
//!   may only be touched by the one module that owns them.
//!
//! Comment lines are ignored so docs can show example code.

use std::fs;
use std::path::Path;

/// `(pattern, max hits)`. Lower a budget when a hit is removed; never raise it.
///
/// `.ok()` covers env-var reads where unset means "use the default" and the
/// epoch-millis range check in the timestamp parser.
const BUDGETS: &[(&str, usize)] = &[
    (".unwrap()", 0),
    (".expect(", 0),
    ("panic!(", 0),
    ("unreachable!(", 0),
    ("todo!(", 0),
    ("unimplemented!(", 0),
    ("let _ =", 0),
    (".ok()", 4),
    ("#[allow(dead_code)]", 0),
];

/// A library crate logs through `tracing`; it never writes to the terminal.
const FORBIDDEN: &[&str] = &["println!(", "eprintln!(", "print!(", "dbg!("];

/// Source file relative to `src/`, with `/` separators, plus its code lines.
struct Source {
    path: String,
    code: Vec<String>,
}

impl Source {
    fn hits(&self, pattern: &str) -> usize {
        self.code.iter().filter(|line| line.contains(pattern)).count()
    }
}

fn sources() -> Vec<Source> {
    let root = Path::new("src");
    let mut out = Vec::new();
    walk(root, root, &mut out);
    assert!(!out.is_empty(), "no sources found under {}", root.display());
    out
}

fn walk(root: &Path, dir: &Path, out: &mut Vec<Source>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            walk(root, &path, out);
            continue;
        }
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let relative = relative.to_string_lossy().replace('\\', "/");
        if !relative.ends_with(".rs") || relative.ends_with("_test.rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        let code = content
            .lines()
            .filter(|line| !line.trim_start().starts_with("//"))
            .map(str::to_owned)
            .collect();
        out.push(Source { path: relative, code });
    }
}

/// Files (other than `owners`) whose code mentions any of `patterns`.
fn offenders(files: &[Source], patterns: &[&str], owners: &[&str]) -> Vec<String> {
    files
        .iter()
        .filter(|file| !owners.contains(&file.path.as_str()))
        .filter(|file| patterns.iter().any(|pattern| file.hits(pattern) > 0))
        .map(|file| file.path.clone())
        .collect()
}

// =============================================================================
// BUDGETS
// =============================================================================

#[test]
fn panic_and_discard_budgets_hold() {
    let files = sources();
    let mut failures = Vec::new();
    for &(pattern, max) in BUDGETS {
        let found: Vec<(&str, usize)> = files
            .iter()
            .map(|file| (file.path.as_str(), file.hits(pattern)))
            .filter(|&(_, count)| count > 0)
            .collect();
        let count: usize = found.iter().map(|&(_, count)| count).sum();
        if count > max {
            failures.push(format!("`{pattern}`: found {count}, max {max} in {found:?}"));
        }
    }
    assert!(failures.is_empty(), "budget exceeded:\n{}", failures.join("\n"));
}

#[test]
fn library_never_prints() {
    let files = sources();
    let found = offenders(&files, FORBIDDEN, &[]);
    assert!(found.is_empty(), "terminal output in library code: {found:?}");
}

// =============================================================================
// CONFINEMENT
// =============================================================================

#[test]
fn only_api_module_builds_http_client() {
    let files = sources();
    let found = offenders(&files, &["Client::builder(", "Client::new("], &["net/api.rs"]);
    assert!(found.is_empty(), "reqwest client built outside net/api.rs: {found:?}");
}

#[test]
fn authorization_header_is_only_set_through_bearer_auth() {
    let files = sources();
    let raw = offenders(&files, &["AUTHORIZATION", "\"Authorization\"", "\"authorization\""], &[]);
    assert!(raw.is_empty(), "hand-built Authorization header in: {raw:?}");

    let bearer = offenders(&files, &["bearer_auth("], &["net/api.rs"]);
    assert!(bearer.is_empty(), "bearer token attached outside the request interceptor: {bearer:?}");
}

#[test]
fn session_keys_stay_inside_session_module() {
    let files = sources();
    let found = offenders(&files, &["TOKEN_KEY", "USER_KEY"], &["state/session.rs"]);
    assert!(found.is_empty(), "raw session keys used outside state/session.rs: {found:?}");
}

#[test]
fn only_api_module_forces_login_redirect() {
    let files = sources();
    let found = offenders(&files, &[".redirect(LOGIN_PATH)"], &["net/api.rs"]);
    assert!(found.is_empty(), "forced login redirect outside the 401 interceptor: {found:?}");
}
