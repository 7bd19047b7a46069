use std::fs;
use std::path::{Path, PathBuf};

use anyhow::bail;
use chrono::{Datelike, NaiveDateTime};

use crate::media::FileRecord;
use crate::{date, executor, location, namer, walk};
use crate::{OrganizeOptions, ProgressCallback, RunSummary, ThrottledProgress};

/// Top-level grouping folder for a year. Everything up to 1979 shares one
/// catch-all bucket; later years group by decade start.
pub fn decade_bucket(year: i32) -> String {
    if year <= 1979 {
        "1979-".to_string()
    } else {
        format!("{}+", (year / 10) * 10)
    }
}

/// `<target>/<decade>/<year>/<year>-<month>[ <location>]`: month not
/// zero-padded, location appended after a space when present.
fn bucket_dir(target_root: &Path, datetime: NaiveDateTime, location: &str) -> PathBuf {
    let year = datetime.year();
    let month = datetime.month();
    let leaf = if location.is_empty() {
        format!("{year}-{month}")
    } else {
        format!("{year}-{month} {location}")
    };
    target_root
        .join(decade_bucket(year))
        .join(year.to_string())
        .join(leaf)
}

/// Path-resolution equality: true only when both sides resolve to the same
/// file on disk.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Move every supported file under `source_dir` into the date-bucketed tree
/// under `target_dir`. Per-file problems are recorded and never abort the
/// scan; only a missing source root is fatal.
pub fn organize(
    options: &OrganizeOptions,
    progress: &ProgressCallback,
) -> anyhow::Result<RunSummary> {
    let tp = ThrottledProgress::new(progress);

    if !options.source_dir.exists() {
        bail!(
            "source directory not found: {}",
            options.source_dir.display()
        );
    }

    let mut summary = RunSummary::default();
    let mut seen = 0u64;

    for path in walk::walk_files(&options.source_dir) {
        seen += 1;

        if walk::is_system_file(&path) {
            summary.skipped += 1;
            continue;
        }

        let record = FileRecord::from_path(&path);
        tp.report("organize", seen, record.file_name());

        if !options.extensions.is_supported(&path) {
            summary.warn(format!(
                "unsupported extension: {} (in {})",
                record.file_name(),
                record.parent_name
            ));
            continue;
        }

        let Some(resolved) = date::resolve_date(&path, &options.extensions) else {
            summary.warn(format!("no usable date: {}", path.display()));
            continue;
        };

        let mut hint = location::extract_location(&record.parent_name);
        if hint.is_empty() {
            hint = location::extract_location(&record.grandparent_name);
        }

        let target_dir = bucket_dir(&options.target_dir, resolved.datetime, &hint);
        let target_path = target_dir.join(record.file_name());

        if options.dry_run {
            let final_path = namer::unique_path(&target_path);
            tp.emit(
                "plan",
                seen,
                &format!("{} -> {}", path.display(), final_path.display()),
            );
            summary.success += 1;
            continue;
        }

        if let Err(e) = executor::ensure_dir(&target_dir) {
            summary.fail(format!("{}: {}", path.display(), e));
            continue;
        }

        // Already in place: no-op, not an error
        if target_path.exists() && is_same_file(&path, &target_path) {
            summary.skipped += 1;
            continue;
        }

        let final_path = namer::unique_path(&target_path);
        match executor::move_file(&path, &final_path) {
            Ok(()) => summary.success += 1,
            Err(e) => summary.fail(format!("{}: {}", path.display(), e)),
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extensions::Extensions;
    use std::fs;
    use tempfile::tempdir;

    fn noop(_: &str, _: u64, _: &str) {}

    fn set_mtime(path: &Path, unix: i64) {
        filetime::set_file_mtime(path, filetime::FileTime::from_unix_time(unix, 0)).unwrap();
    }

    // 2023-01-15T12:00:00Z; lands in January 2023 in every timezone
    const JAN_2023: i64 = 1673784000;

    fn options(source: &Path, target: &Path, dry_run: bool) -> OrganizeOptions {
        OrganizeOptions {
            source_dir: source.to_path_buf(),
            target_dir: target.to_path_buf(),
            extensions: Extensions::default_media(),
            dry_run,
        }
    }

    #[test]
    fn test_decade_bucket() {
        assert_eq!(decade_bucket(1975), "1979-");
        assert_eq!(decade_bucket(1979), "1979-");
        assert_eq!(decade_bucket(1980), "1980+");
        assert_eq!(decade_bucket(1989), "1980+");
        assert_eq!(decade_bucket(2023), "2020+");
    }

    #[test]
    fn test_mtime_fallback_lands_in_bucketed_path() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("src");
        let target = temp.path().join("dst");
        fs::create_dir_all(&source).unwrap();
        let file = source.join("test.jpg");
        fs::write(&file, b"not a real jpeg").unwrap();
        set_mtime(&file, JAN_2023);

        let summary = organize(&options(&source, &target, false), &noop).unwrap();

        assert_eq!(summary.success, 1);
        assert_eq!(summary.skipped, 0);
        assert!(target.join("2020+/2023/2023-1/test.jpg").exists());
        assert!(!file.exists());
    }

    #[test]
    fn test_location_hint_from_parent_folder() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("src");
        let target = temp.path().join("dst");
        let album = source.join("2019 北京旅行");
        fs::create_dir_all(&album).unwrap();
        let file = album.join("photo.jpg");
        fs::write(&file, b"x").unwrap();
        set_mtime(&file, JAN_2023);

        organize(&options(&source, &target, false), &noop).unwrap();

        assert!(target.join("2020+/2023/2023-1 北京旅行/photo.jpg").exists());
    }

    #[test]
    fn test_unsupported_extension_is_reported() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("src");
        let target = temp.path().join("dst");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("notes.txt"), b"x").unwrap();

        let summary = organize(&options(&source, &target, false), &noop).unwrap();

        assert_eq!(summary.success, 0);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.warnings.len(), 1);
        assert!(summary.warnings[0].contains("notes.txt"));
    }

    #[test]
    fn test_collision_gets_counter_suffix() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("src");
        let target = temp.path().join("dst");
        fs::create_dir_all(source.join("a")).unwrap();
        fs::create_dir_all(source.join("b")).unwrap();
        for sub in ["a", "b"] {
            let file = source.join(sub).join("same.jpg");
            fs::write(&file, sub).unwrap();
            set_mtime(&file, JAN_2023);
        }

        let summary = organize(&options(&source, &target, false), &noop).unwrap();

        assert_eq!(summary.success, 2);
        let bucket = target.join("2020+/2023/2023-1");
        assert!(bucket.join("same.jpg").exists());
        assert!(bucket.join("same_1.jpg").exists());
    }

    #[test]
    fn test_file_already_in_place_is_noop() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("library");
        let bucket = root.join("2020+/2023/2023-1");
        fs::create_dir_all(&bucket).unwrap();
        let file = bucket.join("settled.jpg");
        fs::write(&file, b"x").unwrap();
        set_mtime(&file, JAN_2023);

        let summary = organize(&options(&root, &root, false), &noop).unwrap();

        assert_eq!(summary.success, 0);
        assert_eq!(summary.skipped, 1);
        assert!(file.exists());
    }

    #[test]
    fn test_dry_run_moves_nothing() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("src");
        let target = temp.path().join("dst");
        fs::create_dir_all(&source).unwrap();
        let file = source.join("test.jpg");
        fs::write(&file, b"x").unwrap();
        set_mtime(&file, JAN_2023);

        let summary = organize(&options(&source, &target, true), &noop).unwrap();

        assert_eq!(summary.success, 1);
        assert!(file.exists());
        assert!(!target.exists());
    }

    #[test]
    fn test_missing_source_is_fatal() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("nope");
        let target = temp.path().join("dst");
        assert!(organize(&options(&missing, &target, false), &noop).is_err());
    }
}
