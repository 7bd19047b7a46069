use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static CJK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\u{4e00}-\u{9fa5}]+").unwrap());

/// Pull a human-location hint out of a folder name by concatenating every
/// run of CJK ideographs. Empty string means no hint. Names are
/// NFC-normalized first; HFS+ volumes hand back decomposed forms.
pub fn extract_location(folder_name: &str) -> String {
    let normalized: String = folder_name.nfc().collect();
    CJK_RE
        .find_iter(&normalized)
        .map(|m| m.as_str())
        .collect()
}
