//! Test fetcher that materializes a fixed file tree instead of running git.

use std::cell::Cell;
use std::fs;
use std::path::Path;

use fetchkeep_core::fetch::{FetchError, FetchStatus, Fetcher};
use walkdir::WalkDir;

/// Writes `files` under the destination. Like `git clone`, it refuses a
/// destination that already exists and is not empty (exit status 128).
pub struct TreeFetcher {
    files: Vec<String>,
    pub calls: Cell<usize>,
}

impl TreeFetcher {
    pub fn new(files: &[&str]) -> Self {
        Self {
            files: files.iter().map(|f| f.to_string()).collect(),
            calls: Cell::new(0),
        }
    }
}

impl Fetcher for TreeFetcher {
    fn fetch(&self, _url: &str, dest: &Path) -> Result<FetchStatus, FetchError> {
        self.calls.set(self.calls.get() + 1);
        let occupied = fs::read_dir(dest)
            .map(|mut entries| entries.next().is_some())
            .unwrap_or(false);
        if occupied {
            return Ok(FetchStatus::from_code(128));
        }
        for rel in &self.files {
            let path = dest.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, rel.as_bytes()).unwrap();
        }
        Ok(FetchStatus::SUCCESS)
    }
}

/// Fetcher that always reports the given exit code without touching disk.
pub struct FailingFetcher(pub i32);

impl Fetcher for FailingFetcher {
    fn fetch(&self, _url: &str, _dest: &Path) -> Result<FetchStatus, FetchError> {
        Ok(FetchStatus::from_code(self.0))
    }
}

/// Sorted relative paths of everything under `root`.
pub fn listing(root: &Path) -> Vec<String> {
    let mut out: Vec<String> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| {
            let e = e.unwrap();
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    out.sort();
    out
}
