use std::path::Path;

use anyhow::bail;
use chrono::{NaiveDate, NaiveDateTime};
use filetime::FileTime;

use crate::date::{path as datepath, DateSource, ResolvedDate};
use crate::media::FileRecord;
use crate::walk;
use crate::{FixOptions, ProgressCallback, RunSummary, ThrottledProgress};

// Pre-scanned legacy archives are JPEG-only; other formats pass through
// untouched.
const FIX_EXTENSIONS: &[&str] = &[".jpg", ".jpeg"];

/// Give legacy scanned archives a usable capture date: parse year/month
/// from ancestor folder names and stamp it onto the file's access and
/// modification times. The organize and rename cascades then pick the date
/// up through their mtime fallback.
pub fn fix(options: &FixOptions, progress: &ProgressCallback) -> anyhow::Result<RunSummary> {
    let tp = ThrottledProgress::new(progress);

    if !options.fix_dir.exists() {
        bail!("fix directory not found: {}", options.fix_dir.display());
    }

    let mut summary = RunSummary::default();
    let mut seen = 0u64;

    for path in walk::walk_files(&options.fix_dir) {
        seen += 1;

        if walk::is_system_file(&path) {
            summary.skipped += 1;
            continue;
        }

        let record = FileRecord::from_path(&path);
        tp.report("fix", seen, record.file_name());

        match record.extension.as_deref() {
            Some(ext) if FIX_EXTENSIONS.contains(&ext) => {}
            _ => {
                summary.skipped += 1;
                continue;
            }
        }

        // Out-of-range pairs are discarded exactly like a failed parse
        let Some((year, month)) =
            datepath::parse_folder_date(&record).filter(|&(y, m)| datepath::is_plausible(y, m))
        else {
            summary.warn(format!("no folder date: {}", path.display()));
            continue;
        };

        // 26th of the month at noon
        let Some(datetime) =
            NaiveDate::from_ymd_opt(year, month, 26).and_then(|d| d.and_hms_opt(12, 0, 0))
        else {
            summary.warn(format!("no folder date: {}", path.display()));
            continue;
        };
        let resolved = ResolvedDate {
            datetime,
            source: DateSource::PathInferred,
        };

        if options.dry_run {
            tp.emit(
                "plan",
                seen,
                &format!("{} -> {}", path.display(), resolved.datetime),
            );
            summary.success += 1;
            continue;
        }

        match stamp_file_times(&path, resolved.datetime) {
            Ok(()) => summary.success += 1,
            Err(e) => summary.fail(format!("{}: {}", path.display(), e)),
        }
    }

    Ok(summary)
}

/// Set both atime and mtime from a local naive datetime.
fn stamp_file_times(path: &Path, datetime: NaiveDateTime) -> anyhow::Result<()> {
    let Some(local) = datetime.and_local_timezone(chrono::Local).single() else {
        bail!("ambiguous local time: {datetime}");
    };
    let ft = FileTime::from_unix_time(local.timestamp(), 0);
    filetime::set_file_times(path, ft, ft)?;
    Ok(())
}
