use std::sync::LazyLock;

use regex::Regex;

use crate::media::FileRecord;

static YEAR_MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})[-.\s]+(\d{1,2})").unwrap());
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}$").unwrap());
static MONTH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{1,2}$").unwrap());

/// Infer (year, month) from ancestor folder names of a legacy scanned
/// archive. Ordered strategies, first match wins:
/// 1. parent contains "YYYY-M[M]" with '-', '.' or whitespace ("2023-5", "2023 05")
/// 2. parent is exactly a 4-digit year -> January
/// 3. parent is a 1-2 digit month under an exactly-4-digit year folder
/// No pattern -> None. Range checking is the caller's job (`is_plausible`).
pub fn parse_folder_date(record: &FileRecord) -> Option<(i32, u32)> {
    let parent = record.parent_name.as_str();
    let grandparent = record.grandparent_name.as_str();

    if let Some(caps) = YEAR_MONTH_RE.captures(parent) {
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        return Some((year, month));
    }

    if YEAR_RE.is_match(parent) {
        return Some((parent.parse().ok()?, 1));
    }

    if MONTH_RE.is_match(parent) && YEAR_RE.is_match(grandparent) {
        return Some((grandparent.parse().ok()?, parent.parse().ok()?));
    }

    None
}

/// Sanity range for folder-derived dates. Out-of-range pairs are discarded
/// by the caller as "no match", never corrected or clamped.
pub fn is_plausible(year: i32, month: u32) -> bool {
    year > 1900 && year < 2030 && (1..=12).contains(&month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn record(path: &str) -> FileRecord {
        FileRecord::from_path(Path::new(path))
    }

    #[test]
    fn test_year_month_in_parent() {
        assert_eq!(parse_folder_date(&record("2023-5/photo.jpg")), Some((2023, 5)));
        assert_eq!(parse_folder_date(&record("2023 05/photo.jpg")), Some((2023, 5)));
        assert_eq!(parse_folder_date(&record("2023.12/photo.jpg")), Some((2023, 12)));
        assert_eq!(
            parse_folder_date(&record("scans 2019-07 beach/photo.jpg")),
            Some((2019, 7))
        );
    }

    #[test]
    fn test_bare_year_defaults_to_january() {
        assert_eq!(parse_folder_date(&record("2023/photo.jpg")), Some((2023, 1)));
    }

    #[test]
    fn test_month_under_year() {
        assert_eq!(parse_folder_date(&record("2000/2/photo.jpg")), Some((2000, 2)));
        assert_eq!(parse_folder_date(&record("2000/11/photo.jpg")), Some((2000, 11)));
    }

    #[test]
    fn test_no_pattern() {
        assert_eq!(parse_folder_date(&record("vacation/photo.jpg")), None);
        assert_eq!(parse_folder_date(&record("photos/3/photo.jpg")), None);
    }

    #[test]
    fn test_plausibility_range() {
        assert!(is_plausible(2023, 5));
        assert!(is_plausible(1901, 1));
        assert!(is_plausible(2029, 12));
        assert!(!is_plausible(1900, 5));
        assert!(!is_plausible(1850, 5));
        assert!(!is_plausible(2030, 5));
        assert!(!is_plausible(2023, 0));
        assert!(!is_plausible(2023, 13));
    }
}
