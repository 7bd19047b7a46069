use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDateTime;
use exif::{In, Reader, Tag};

/// Read the capture date from a file's EXIF block: DateTimeOriginal first,
/// then the generic DateTime. EXIF datetimes have no timezone info - they
/// are local time as-is. Any failure (unreadable file, no EXIF container,
/// missing field, malformed value) yields None so the resolver cascade can
/// fall through.
pub fn read_exif_date(path: &Path) -> Option<NaiveDateTime> {
    let file = File::open(path).ok()?;
    let exif = Reader::new()
        .read_from_container(&mut BufReader::new(file))
        .ok()?;

    for tag in [Tag::DateTimeOriginal, Tag::DateTime] {
        if let Some(field) = exif.get_field(tag, In::PRIMARY) {
            let val = field.display_value().to_string();
            if let Some(dt) = parse_exif_datetime(&val) {
                return Some(dt);
            }
        }
    }

    None
}

/// Parse an EXIF datetime string against the fixed "YYYY:MM:DD HH:MM:SS"
/// layout. Separators are normalized first since some writers (and the
/// display form of the reader) use dashes or slashes.
fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    let cleaned = s.replace(['-', '/'], ":");
    NaiveDateTime::parse_from_str(&cleaned, "%Y:%m:%d %H:%M:%S").ok()
}
