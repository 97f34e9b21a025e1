pub mod output;

use crate::parser::read_input;
use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Expand directories recursively and drop paths that do not exist.
///
/// Files inside a directory are returned in sorted order; explicit file
/// arguments keep their position.
pub fn collect_inputs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        warn!("Skipping unreadable entry: {}", e);
                        None
                    }
                })
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .collect();
            found.sort();
            files.extend(found);
        } else if path.exists() {
            files.push(path.clone());
        } else {
            warn!("File not found: {}", path.display());
        }
    }

    files
}

/// Read every file and run `analyze` on it in parallel, keeping input order.
pub fn process_files<T, F>(files: &[PathBuf], analyze: F) -> Result<Vec<(PathBuf, T)>>
where
    T: Send,
    F: Fn(&Path, &str) -> T + Sync,
{
    files
        .par_iter()
        .map(|path| {
            let content = read_input(path)?;
            Ok::<_, anyhow::Error>((path.clone(), analyze(path, &content)))
        })
        .collect()
}
