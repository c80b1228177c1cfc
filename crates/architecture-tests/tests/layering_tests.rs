//! Architecture tests for module layering in the client crate.
//!
//! Invariants:
//! - The resource model (models, oem, optional values, registry, links) is
//!   pure: it never reaches for HTTP, the async runtime, or the reader
//! - The config crate does not depend on the client crate
//! - Library code outside test modules and the testing helpers does not
//!   call `unwrap()` or `expect()`
//! - Every `[dependencies]` entry of a library crate is used by its library
//!   code; crates only tests need belong in `[dev-dependencies]`
//!
//! Non-scope: this only inspects source text; it does not resolve imports.

use std::fs;
use std::path::{Path, PathBuf};

/// Client modules that must stay free of I/O.
const PURE_MODULES: &[&str] = &[
    "models",
    "oem",
    "optional.rs",
    "registry.rs",
    "links.rs",
    "odata.rs",
    "serde_helpers.rs",
];

/// Identifiers a pure module must not mention.
const IO_MARKERS: &[&str] = &["reqwest", "tokio", "crate::transport", "crate::reader"];

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("workspace root")
        .to_path_buf()
}

fn rust_files(dir: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(|e| e.into_path())
        .collect()
}

/// Source text before the first `#[cfg(test)]`, with comment lines dropped.
fn library_code(content: &str) -> Vec<(usize, &str)> {
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .map(|(i, line)| (i + 1, line))
        .collect()
}

#[test]
fn test_resource_model_does_not_touch_io() {
    let src = workspace_root().join("crates/client/src");
    let mut violations = Vec::new();

    for module in PURE_MODULES {
        for file in rust_files(&src.join(module)) {
            let content = fs::read_to_string(&file).expect("read source");
            for (line_no, line) in library_code(&content) {
                for marker in IO_MARKERS {
                    if line.contains(marker) {
                        violations.push(format!("{}:{line_no}: mentions {marker}", file.display()));
                    }
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Resource model modules must not depend on I/O:\n{}",
        violations.join("\n")
    );
}

#[test]
fn test_config_does_not_depend_on_client() {
    let root = workspace_root();
    let manifest = fs::read_to_string(root.join("crates/config/Cargo.toml")).expect("manifest");
    assert!(!manifest.contains("rackscale-client"));

    for file in rust_files(&root.join("crates/config/src")) {
        let content = fs::read_to_string(&file).expect("read source");
        assert!(
            !content.contains("rackscale_client"),
            "{} references the client crate",
            file.display()
        );
    }
}

#[test]
fn test_library_code_propagates_errors() {
    let root = workspace_root();
    let mut violations = Vec::new();

    for crate_dir in ["crates/client/src", "crates/config/src"] {
        for file in rust_files(&root.join(crate_dir)) {
            if file.components().any(|c| c.as_os_str() == "testing") {
                continue;
            }
            let content = fs::read_to_string(&file).expect("read source");
            for (line_no, line) in library_code(&content) {
                if line.contains(".unwrap()") || line.contains(".expect(") {
                    violations.push(format!("{}:{line_no}: {}", file.display(), line.trim()));
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Library code must propagate errors instead of panicking:\n{}",
        violations.join("\n")
    );
}

/// Crate names listed under `[dependencies]`, in manifest order.
fn runtime_dependencies(manifest: &str) -> Vec<String> {
    manifest
        .lines()
        .skip_while(|line| line.trim() != "[dependencies]")
        .skip(1)
        .take_while(|line| !line.trim_start().starts_with('['))
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(name, _)| name.trim().to_string())
        .collect()
}

#[test]
fn test_runtime_dependencies_are_used_by_library_code() {
    let root = workspace_root();
    let mut unused = Vec::new();

    for crate_dir in ["crates/client", "crates/config"] {
        let dir = root.join(crate_dir);
        let manifest = fs::read_to_string(dir.join("Cargo.toml")).expect("manifest");
        let library: String = rust_files(&dir.join("src"))
            .iter()
            .map(|file| {
                let content = fs::read_to_string(file).expect("read source");
                library_code(&content)
                    .into_iter()
                    .map(|(_, line)| format!("{line}\n"))
                    .collect::<String>()
            })
            .collect();

        for dependency in runtime_dependencies(&manifest) {
            let path = format!("{}::", dependency.replace('-', "_"));
            if !library.contains(&path) {
                unused.push(format!("{crate_dir}: {dependency}"));
            }
        }
    }

    assert!(
        unused.is_empty(),
        "Dependencies only tests use belong in [dev-dependencies]:\n{}",
        unused.join("\n")
    );
}

#[test]
fn test_runtime_dependencies_stop_at_next_table() {
    let manifest = "[package]\nname = \"x\"\n\n[dependencies]\n# Serialization\nserde = \"1\"\nurl = { workspace = true }\n\n[dev-dependencies]\nserde_json = \"1\"\n";
    assert_eq!(runtime_dependencies(manifest), vec!["serde", "url"]);
}

#[test]
fn test_library_code_stops_at_test_module() {
    let content = "fn a() {}\n// note\n#[cfg(test)]\nmod tests { fn b() { x.unwrap(); } }\n";
    let lines = library_code(content);
    assert_eq!(lines, vec![(1, "fn a() {}")]);
}
