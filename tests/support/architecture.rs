use std::fs;
use std::path::{Path, PathBuf};

/// A source line matching a forbidden pattern: (path, line number, text).
pub type Hit = (String, usize, String);

fn root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn rust_sources(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = fs::read_dir(dir).unwrap_or_else(|e| panic!("read {}: {e}", dir.display()));
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            rust_sources(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

/// Every line under `relative_dir` containing one of `patterns`, with paths
/// relative to the crate root using `/` separators.
pub fn find_lines_containing(relative_dir: &str, patterns: &[&str]) -> Vec<Hit> {
    let base = root();
    let mut files = Vec::new();
    rust_sources(&base.join(relative_dir), &mut files);
    files.sort();

    let mut hits = Vec::new();
    for file in files {
        let source =
            fs::read_to_string(&file).unwrap_or_else(|e| panic!("read {}: {e}", file.display()));
        let relative = file
            .strip_prefix(&base)
            .unwrap_or(&file)
            .to_string_lossy()
            .replace('\\', "/");
        hits.extend(
            source
                .lines()
                .enumerate()
                .filter(|(_, line)| patterns.iter().any(|p| line.contains(p)))
                .map(|(idx, line)| (relative.clone(), idx + 1, line.to_string())),
        );
    }
    hits
}

pub fn path_exists(relative_path: &str) -> bool {
    root().join(relative_path).exists()
}

pub fn read_relative(relative_path: &str) -> String {
    fs::read_to_string(root().join(relative_path))
        .unwrap_or_else(|e| panic!("read {relative_path}: {e}"))
}
