pub mod exif;
pub mod path;

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::extensions::Extensions;

/// Where a resolved date came from. The tag is carried into renamed
/// filenames so a later audit can tell authoritative dates from guesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    /// Embedded capture metadata — trusted, no tag
    Exif,
    /// Filesystem mtime fallback
    FileSystem,
    /// Derived from ancestor folder names (legacy fix flow only)
    PathInferred,
}

impl DateSource {
    pub fn tag(self) -> &'static str {
        match self {
            DateSource::FileSystem => "sys_",
            DateSource::Exif | DateSource::PathInferred => "",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ResolvedDate {
    pub datetime: NaiveDateTime,
    pub source: DateSource,
}

/// Resolve a best-effort capture date, first strategy wins:
/// 1. EXIF capture time, for files whose extension is a configured image type
/// 2. Filesystem last-modified time
/// Returns None when the mtime is unreadable too; the caller skips the file.
pub fn resolve_date(path: &Path, extensions: &Extensions) -> Option<ResolvedDate> {
    if extensions.is_image(path) {
        if let Some(datetime) = exif::read_exif_date(path) {
            return Some(ResolvedDate {
                datetime,
                source: DateSource::Exif,
            });
        }
    }

    modified_time(path).map(|datetime| ResolvedDate {
        datetime,
        source: DateSource::FileSystem,
    })
}

/// File mtime as local naive time, None on any metadata error.
pub fn modified_time(path: &Path) -> Option<NaiveDateTime> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    Some(chrono::DateTime::<chrono::Local>::from(modified).naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_has_no_date() {
        let exts = Extensions::default_media();
        assert!(resolve_date(Path::new("/nonexistent/x.jpg"), &exts).is_none());
    }

    #[test]
    fn test_image_without_exif_falls_back_to_mtime() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("no_exif.jpg");
        fs::write(&file, b"\xff\xd8\xff\xd9").unwrap();

        let exts = Extensions::default_media();
        let resolved = resolve_date(&file, &exts).unwrap();
        assert_eq!(resolved.source, DateSource::FileSystem);
        assert_eq!(resolved.source.tag(), "sys_");
    }

    #[test]
    fn test_video_uses_mtime_directly() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("clip.mp4");
        fs::write(&file, b"not really a video").unwrap();

        let exts = Extensions::default_media();
        let resolved = resolve_date(&file, &exts).unwrap();
        assert_eq!(resolved.source, DateSource::FileSystem);
    }

    #[test]
    fn test_mtime_roundtrip() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("clip.mp4");
        fs::write(&file, b"x").unwrap();

        let stamp = 1684576800; // 2023-05-20T10:00:00Z
        filetime::set_file_mtime(&file, filetime::FileTime::from_unix_time(stamp, 0)).unwrap();

        let expected = chrono::DateTime::from_timestamp(stamp, 0)
            .unwrap()
            .with_timezone(&chrono::Local)
            .naive_local();
        assert_eq!(modified_time(&file), Some(expected));
    }
}
