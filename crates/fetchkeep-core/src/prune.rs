//! Checkout pruning: delete every file but the kept one, then collapse empty directories.
//!
//! Everything here is best-effort. Failures are logged and counted, never
//! returned, so a half-pruned checkout still lets the install finish.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::PruneScope;

/// What a prune pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    pub files_removed: usize,
    /// Files that matched for deletion but could not be removed.
    pub files_failed: usize,
    pub dirs_removed: usize,
    /// The retained file, if the checkout had one.
    pub kept: Option<PathBuf>,
}

/// Case-insensitive file name comparison (`form.py` == `FORM.PY`).
pub fn matches_keep(name: &OsStr, keep: &str) -> bool {
    name.to_string_lossy().to_lowercase() == keep.to_lowercase()
}

/// Run both prune steps on `root`.
pub fn prune(root: &Path, keep: &str, scope: PruneScope) -> PruneReport {
    let mut report = prune_files(root, keep, scope);
    report.dirs_removed = remove_empty_dirs(root);
    if report.kept.is_none() {
        tracing::warn!(keep, root = %root.display(), "retained file not found in checkout");
    }
    report
}

/// Delete files under `root` except `keep` at the top level. Directories are left alone.
pub fn prune_files(root: &Path, keep: &str, scope: PruneScope) -> PruneReport {
    let mut report = PruneReport::default();

    let max_depth = match scope {
        PruneScope::TopLevel => 1,
        PruneScope::Recursive => usize::MAX,
    };
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false);

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }
        if entry.depth() == 1 && matches_keep(entry.file_name(), keep) {
            tracing::debug!(path = %entry.path().display(), "keeping");
            report.kept = Some(entry.path().to_path_buf());
            continue;
        }

        match remove_file(entry.path()) {
            Ok(()) => report.files_removed += 1,
            Err(e) => {
                tracing::warn!(path = %entry.path().display(), "could not delete file: {}", e);
                report.files_failed += 1;
            }
        }
    }

    tracing::debug!(
        removed = report.files_removed,
        failed = report.files_failed,
        "pruned files"
    );
    report
}

/// Remove every empty directory below `root` (children first, `root` itself kept).
/// Non-empty directories are skipped silently. Returns how many were removed.
pub fn remove_empty_dirs(root: &Path) -> usize {
    let walker = WalkDir::new(root)
        .min_depth(1)
        .contents_first(true)
        .follow_links(false);

    let mut removed = 0;
    for entry in walker.into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_dir() {
            continue;
        }
        if fs::remove_dir(entry.path()).is_ok() {
            tracing::debug!(path = %entry.path().display(), "removed empty directory");
            removed += 1;
        }
    }
    removed
}

/// Remove a file, clearing a read-only flag first if that is what blocks it.
/// Git marks pack files read-only, which makes plain removal fail on Windows.
fn remove_file(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            let mut perms = fs::symlink_metadata(path)?.permissions();
            if !perms.readonly() {
                return Err(e);
            }
            #[allow(clippy::permissions_set_readonly_false)]
            perms.set_readonly(false);
            fs::set_permissions(path, perms)?;
            fs::remove_file(path)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, rel.as_bytes()).unwrap();
    }

    fn listing(root: &Path) -> Vec<String> {
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

    #[test]
    fn matches_keep_ignores_case() {
        assert!(matches_keep(OsStr::new("Form.py"), "Form.py"));
        assert!(matches_keep(OsStr::new("form.py"), "Form.py"));
        assert!(matches_keep(OsStr::new("FORM.PY"), "Form.py"));
        assert!(!matches_keep(OsStr::new("Form.pyc"), "Form.py"));
        assert!(!matches_keep(OsStr::new("Example.py"), "Form.py"));
    }

    #[test]
    fn recursive_prune_leaves_only_kept_file() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        for f in ["Form.py", "README.md", "LICENSE", "utils/helper.py"] {
            touch(root, f);
        }

        let report = prune(root, "Form.py", PruneScope::Recursive);

        assert_eq!(listing(root), vec!["Form.py"]);
        assert_eq!(report.files_removed, 3);
        assert_eq!(report.files_failed, 0);
        assert_eq!(report.dirs_removed, 1);
        assert_eq!(report.kept, Some(root.join("Form.py")));
    }

    #[test]
    fn nested_file_with_kept_name_is_not_kept() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        touch(root, "Form.py");
        touch(root, "legacy/Form.py");

        prune(root, "Form.py", PruneScope::Recursive);

        assert_eq!(listing(root), vec!["Form.py"]);
    }

    #[test]
    fn top_level_scope_keeps_nested_files_and_their_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        for f in ["FORM.PY", "README.md", "utils/helper.py"] {
            touch(root, f);
        }
        fs::create_dir_all(root.join("empty/deeper")).unwrap();

        let report = prune(root, "Form.py", PruneScope::TopLevel);

        assert_eq!(listing(root), vec!["FORM.PY", "utils", "utils/helper.py"]);
        assert_eq!(report.files_removed, 1);
        assert_eq!(report.dirs_removed, 2);
    }

    #[test]
    fn missing_kept_file_empties_checkout() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        for f in ["README.md", "docs/a/b/c.md", "src/lib.py"] {
            touch(root, f);
        }

        let report = prune(root, "Form.py", PruneScope::Recursive);

        assert!(listing(root).is_empty());
        assert!(root.is_dir(), "checkout root itself is never removed");
        assert_eq!(report.kept, None);
        assert_eq!(report.files_removed, 3);
        assert_eq!(report.dirs_removed, 4);
    }

    #[test]
    fn remove_empty_dirs_skips_non_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        touch(root, "keep/me.txt");
        fs::create_dir_all(root.join("gone/also_gone")).unwrap();

        assert_eq!(remove_empty_dirs(root), 2);
        assert_eq!(listing(root), vec!["keep", "keep/me.txt"]);
    }

    #[test]
    fn prune_of_missing_root_is_a_no_op() {
        let tmp = tempfile::tempdir().unwrap();
        let report = prune(&tmp.path().join("absent"), "Form.py", PruneScope::Recursive);
        assert_eq!(report.files_removed, 0);
        assert_eq!(report.dirs_removed, 0);
    }

    #[cfg(unix)]
    #[test]
    fn read_only_file_is_still_removed() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        touch(root, "pack.idx");
        let path = root.join("pack.idx");
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(&path, perms).unwrap();

        let report = prune_files(root, "Form.py", PruneScope::TopLevel);
        assert_eq!(report.files_removed, 1);
        assert!(!path.exists());
    }
}
