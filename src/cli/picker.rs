//! Interactive point file picker.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the picker provides the "run `sketchfit fit` and choose a file" UX
//!
//! The picker searches for `*.csv` and `*.json` files under the current
//! working directory.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::io::is_point_file;

/// Default directory recursion depth for finding point files.
const DEFAULT_SEARCH_DEPTH: usize = 4;

/// Prompt the user to select a point file from the current directory tree.
///
/// Behavior:
/// - list discovered `*.csv` / `*.json` files
/// - accept either a number (from the list) or an explicit path
/// - `q` cancels
pub fn prompt_for_points_path() -> Result<PathBuf, AppError> {
    let files = discover_point_files();
    if files.is_empty() {
        return Err(AppError::new(
            2,
            "No .csv or .json files found. Provide one with `sketchfit fit --points <file>`.",
        ));
    }

    println!("Found {} point file(s):", files.len());
    for (idx, path) in files.iter().enumerate() {
        println!("{:>3}) {}", idx + 1, pretty_path(path));
    }

    loop {
        print!("Select a file by number (1-{}) or type a path (q to quit): ", files.len());
        io::stdout()
            .flush()
            .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))?;

        let mut input = String::new();
        let bytes = io::stdin()
            .read_line(&mut input)
            .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;

        if bytes == 0 {
            return Err(AppError::new(
                2,
                "No input received. Provide a path with `sketchfit fit --points <file>`.",
            ));
        }

        let input = input.trim();
        if input.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }

        if let Ok(choice) = input.parse::<usize>() {
            if (1..=files.len()).contains(&choice) {
                return validate_points_path(&files[choice - 1]);
            }
            println!("Invalid choice: {choice}. Enter a number between 1 and {}.", files.len());
            continue;
        }

        match validate_points_path(Path::new(input)) {
            Ok(path) => return Ok(path),
            Err(err) => println!("{err}"),
        }
    }
}

/// Validate the provided path points to a `.csv` or `.json` file.
pub fn validate_points_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.exists() {
        return Err(AppError::new(2, format!("Point file not found: {}", path.display())));
    }
    if path.is_dir() {
        return Err(AppError::new(
            2,
            format!("Expected a file, got a directory: {}", path.display()),
        ));
    }
    if !is_point_file(path) {
        return Err(AppError::new(
            2,
            format!("Expected a .csv or .json file (got: {}).", path.display()),
        ));
    }

    Ok(path.to_path_buf())
}

/// Discover point files under the current directory (deterministic order).
pub fn discover_point_files() -> Vec<PathBuf> {
    find_point_files(Path::new("."), DEFAULT_SEARCH_DEPTH)
}

fn find_point_files(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut out = Vec::new();
    find_point_files_inner(root, 0, max_depth, &mut out);
    out.sort_by_key(|p| pretty_path(p));
    out
}

fn find_point_files_inner(root: &Path, depth: usize, max_depth: usize, out: &mut Vec<PathBuf>) {
    if depth > max_depth {
        return;
    }

    let Ok(entries) = fs::read_dir(root) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            if !should_skip_dir(&path) {
                find_point_files_inner(&path, depth + 1, max_depth, out);
            }
        } else if file_type.is_file() && is_point_file(&path) {
            out.push(path);
        }
    }
}

fn should_skip_dir(path: &Path) -> bool {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    matches!(name, ".git" | "target" | "node_modules" | "debug")
}

fn pretty_path(path: &Path) -> String {
    let stripped = path.strip_prefix("./").unwrap_or(path);
    stripped.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_finds_point_files_and_skips_build_dirs() {
        let root = std::env::temp_dir().join(format!("sketchfit-picker-{}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join("nested")).unwrap();
        fs::create_dir_all(root.join("target")).unwrap();
        for name in ["a.csv", "nested/b.JSON", "notes.txt", "target/c.csv"] {
            fs::write(root.join(name), "x,y\n").unwrap();
        }

        let found: Vec<String> = find_point_files(&root, 4)
            .iter()
            .map(|p| p.strip_prefix(&root).unwrap().display().to_string())
            .collect();
        assert_eq!(found.len(), 2);
        assert!(found.iter().any(|f| f == "a.csv"));
        assert!(found.iter().any(|f| f.ends_with("b.JSON")));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn validation_rejects_missing_and_foreign_files() {
        assert_eq!(validate_points_path(Path::new("no/such/file.csv")).unwrap_err().exit_code(), 2);
        let dir = std::env::temp_dir();
        assert!(validate_points_path(&dir).is_err());
    }
}
