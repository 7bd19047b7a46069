use std::fs;

use anyhow::bail;
use chrono::Local;

use crate::{executor, namer, walk};
use crate::{CleanJunkOptions, ProgressCallback, RunSummary, ThrottledProgress};

const JUNK_DIR_NAME: &str = "junk";

/// Quarantine small files: everything at or under the size threshold moves
/// to `<root>/junk/`. The quarantine folder itself is never scanned.
pub fn clean_junk(
    options: &CleanJunkOptions,
    progress: &ProgressCallback,
) -> anyhow::Result<RunSummary> {
    let tp = ThrottledProgress::new(progress);

    if !options.root_dir.exists() {
        bail!("root directory not found: {}", options.root_dir.display());
    }

    let junk_dir = options.root_dir.join(JUNK_DIR_NAME);
    let mut summary = RunSummary::default();
    let mut seen = 0u64;

    for path in walk::walk_files(&options.root_dir) {
        if path.starts_with(&junk_dir) {
            continue;
        }
        seen += 1;

        let size = match fs::metadata(&path) {
            Ok(meta) => meta.len(),
            Err(e) => {
                summary.fail(format!("{}: {}", path.display(), e));
                continue;
            }
        };
        let size_mb = size as f64 / (1024.0 * 1024.0);
        tp.report("scan", seen, &format!("{:.4} MB", size_mb));

        if size_mb > options.size_threshold_mb {
            continue;
        }

        let Some(name) = path.file_name() else {
            continue;
        };
        let candidate = junk_dir.join(name);

        if options.dry_run {
            tp.emit(
                "plan",
                seen,
                &format!("{} ({:.4} MB) -> {}/", path.display(), size_mb, JUNK_DIR_NAME),
            );
            summary.success += 1;
            continue;
        }

        if let Err(e) = executor::ensure_dir(&junk_dir) {
            summary.fail(format!("{}: {}", path.display(), e));
            continue;
        }
        let target = namer::unique_path_timestamped(&candidate, Local::now().naive_local());
        match executor::move_file(&path, &target) {
            Ok(()) => summary.success += 1,
            Err(e) => summary.fail(format!("{}: {}", path.display(), e)),
        }
    }

    Ok(summary)
}
