//! Checkout directory naming.
//!
//! Mirrors how `git clone <url>` picks the directory it creates when no
//! destination is given, so the pruner knows where to look.

/// Derives the checkout directory name from a repository URL.
///
/// Strips trailing slashes, a trailing `/.git` and a `.git` suffix, then takes
/// the last segment after `/` or `:` (scp-like `host:path` URLs).
/// Returns `None` when nothing usable is left.
///
/// # Examples
///
/// - `checkout_dir_name("https://github.com/owner/Form.git")` → `Some("Form")`
/// - `checkout_dir_name("git@github.com:owner/Form")` → `Some("Form")`
pub fn checkout_dir_name(url: &str) -> Option<String> {
    let mut s = url.trim().trim_end_matches('/');
    if let Some(stripped) = s.strip_suffix("/.git") {
        s = stripped.trim_end_matches('/');
    }
    if let Some(stripped) = s.strip_suffix(".git") {
        s = stripped;
    }

    let name = s.rsplit(['/', ':', '\\']).next().unwrap_or(s);
    match name {
        "" | "." | ".." => None,
        _ => Some(name.to_string()),
    }
}
