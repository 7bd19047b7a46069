use std::fs;
use std::sync::LazyLock;

use anyhow::bail;
use regex::Regex;

use crate::date::{self, ResolvedDate};
use crate::media::FileRecord;
use crate::{namer, walk};
use crate::{ProgressCallback, RenameOptions, RunSummary, ThrottledProgress};

// 8-digit date + underscore, e.g. "20220101_"
static ALREADY_RENAMED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{8}_").unwrap());

/// Idempotence guard: a name carrying the date prefix was produced by an
/// earlier run and must not be renamed again.
pub fn is_already_renamed(name: &str) -> bool {
    ALREADY_RENAMED_RE.is_match(name)
}

/// `YYYYMMDD_HHMMSS_<provenance-tag><original-name>`
pub fn new_filename(original_name: &str, resolved: &ResolvedDate) -> String {
    format!(
        "{}_{}{}",
        resolved.datetime.format("%Y%m%d_%H%M%S"),
        resolved.source.tag(),
        original_name
    )
}

/// Rename every supported file under `target_dir` to the date-prefixed
/// form. Already-renamed files are skipped so repeated runs converge.
pub fn rename(options: &RenameOptions, progress: &ProgressCallback) -> anyhow::Result<RunSummary> {
    let tp = ThrottledProgress::new(progress);

    if !options.target_dir.exists() {
        bail!(
            "target directory not found: {}",
            options.target_dir.display()
        );
    }

    let mut summary = RunSummary::default();
    let mut seen = 0u64;

    for path in walk::walk_files(&options.target_dir) {
        seen += 1;

        if walk::is_system_file(&path) {
            summary.skipped += 1;
            continue;
        }

        let record = FileRecord::from_path(&path);
        tp.report("rename", seen, record.file_name());

        if !options.extensions.is_supported(&path) {
            summary.warn(format!(
                "unsupported extension: {} (in {})",
                record.file_name(),
                record.parent_name
            ));
            continue;
        }

        if is_already_renamed(record.file_name()) {
            summary.skipped += 1;
            continue;
        }

        let Some(resolved) = date::resolve_date(&path, &options.extensions) else {
            summary.warn(format!("no usable date: {}", path.display()));
            continue;
        };

        let new_name = new_filename(record.file_name(), &resolved);
        if new_name == record.file_name() {
            summary.skipped += 1;
            continue;
        }

        let target_path = path.with_file_name(&new_name);

        if options.dry_run {
            let final_path = namer::unique_path(&target_path);
            tp.emit(
                "plan",
                seen,
                &format!(
                    "{} -> {}",
                    record.file_name(),
                    final_path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or(&new_name)
                ),
            );
            summary.success += 1;
            continue;
        }

        // Guard again immediately before mutating
        if is_already_renamed(record.file_name()) {
            summary.skipped += 1;
            continue;
        }
        let final_path = namer::unique_path(&target_path);
        match fs::rename(&path, &final_path) {
            Ok(()) => summary.success += 1,
            Err(e) => summary.fail(format!("{}: {}", path.display(), e)),
        }
    }

    Ok(summary)
}
