use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

/// Return `candidate` if free, else the first `<stem>_<n><.ext>` variant
/// that does not exist. The counter starts at 1 and grows without bound;
/// existence is re-checked on every step, which is the only synchronization
/// point against concurrent writers.
pub fn unique_path(candidate: &Path) -> PathBuf {
    if !candidate.exists() {
        return candidate.to_path_buf();
    }

    let (parent, stem, ext) = split(candidate);
    let mut counter = 1u32;
    loop {
        let name = join_name(&stem, &format!("_{counter}"), &ext);
        let next = parent.join(name);
        if !next.exists() {
            return next;
        }
        counter += 1;
    }
}

/// Timestamp-suffix variant used by the junk-cleanup flow, where multiple
/// runs against the same quarantine folder are likelier than a counter
/// race. Still re-checks existence; falls back to the counter variant when
/// the stamped name is taken too.
pub fn unique_path_timestamped(candidate: &Path, now: NaiveDateTime) -> PathBuf {
    if !candidate.exists() {
        return candidate.to_path_buf();
    }

    let (parent, stem, ext) = split(candidate);
    let suffix = format!("_{}", now.format("%Y%m%d_%H%M%S"));
    let stamped = parent.join(join_name(&stem, &suffix, &ext));
    if !stamped.exists() {
        return stamped;
    }
    unique_path(&stamped)
}

fn split(path: &Path) -> (PathBuf, String, String) {
    let parent = path.parent().unwrap_or(Path::new("")).to_path_buf();
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("file")
        .to_string();
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_string();
    (parent, stem, ext)
}

fn join_name(stem: &str, suffix: &str, ext: &str) -> String {
    if ext.is_empty() {
        format!("{stem}{suffix}")
    } else {
        format!("{stem}{suffix}.{ext}")
    }
}
