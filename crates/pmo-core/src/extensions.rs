use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configured media extensions, partitioned into image and video sets.
/// Entries are normalized to lowercase with a leading dot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extensions {
    image: HashSet<String>,
    video: HashSet<String>,
}

impl Extensions {
    pub fn new<I, V>(image: I, video: V) -> Self
    where
        I: IntoIterator<Item = String>,
        V: IntoIterator<Item = String>,
    {
        Self {
            image: image.into_iter().map(|e| normalize(&e)).collect(),
            video: video.into_iter().map(|e| normalize(&e)).collect(),
        }
    }

    /// Extension sets used when the configuration does not provide any.
    pub fn default_media() -> Self {
        let image = [
            ".jpg", ".jpeg", ".png", ".heic", ".tiff", ".cr3", ".arw", ".bmp",
        ];
        let video = [
            ".mp4", ".mov", ".avi", ".mkv", ".m4v", ".3gp", ".mpg", ".mpeg", ".vob",
        ];
        Self::new(
            image.iter().map(|e| e.to_string()),
            video.iter().map(|e| e.to_string()),
        )
    }

    pub fn is_image(&self, path: &Path) -> bool {
        ext_of(path).is_some_and(|e| self.image.contains(&e))
    }

    pub fn is_video(&self, path: &Path) -> bool {
        ext_of(path).is_some_and(|e| self.video.contains(&e))
    }

    /// True when the extension is in either configured set.
    pub fn is_supported(&self, path: &Path) -> bool {
        ext_of(path).is_some_and(|e| self.image.contains(&e) || self.video.contains(&e))
    }
}

impl Default for Extensions {
    fn default() -> Self {
        Self::default_media()
    }
}

fn normalize(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

/// Lowercase extension with leading dot, or None when the path has none.
pub fn ext_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_classify_defaults() {
        let exts = Extensions::default_media();
        assert!(exts.is_image(Path::new("/a/b/photo.jpg")));
        assert!(exts.is_image(Path::new("/a/b/PHOTO.JPG")));
        assert!(exts.is_video(Path::new("clip.MOV")));
        assert!(exts.is_supported(Path::new("clip.mp4")));
        assert!(!exts.is_supported(Path::new("notes.txt")));
        assert!(!exts.is_supported(Path::new("no_extension")));
    }

    #[test]
    fn test_normalize_on_construction() {
        let exts = Extensions::new(
            vec!["JPG".to_string(), ".Png".to_string()],
            vec!["mp4".to_string()],
        );
        assert!(exts.is_image(Path::new("x.jpg")));
        assert!(exts.is_image(Path::new("x.png")));
        assert!(exts.is_video(Path::new("x.mp4")));
        assert!(!exts.is_image(Path::new("x.mp4")));
    }

    #[test]
    fn test_ext_of() {
        assert_eq!(ext_of(Path::new("a/b.JPeG")), Some(".jpeg".to_string()));
        assert_eq!(ext_of(Path::new("a/b")), None);
    }
}
