use std::path::{Path, PathBuf};

use crate::extensions;

/// One visited file, with the folder-name context the planners look at.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Lowercase extension with leading dot, None if the file has none
    pub extension: Option<String>,
    /// Name of the immediate parent folder
    pub parent_name: String,
    /// Name of the grandparent folder
    pub grandparent_name: String,
}

impl FileRecord {
    pub fn from_path(path: &Path) -> Self {
        let parent_name = folder_name(path.parent());
        let grandparent_name = folder_name(path.parent().and_then(|p| p.parent()));
        Self {
            path: path.to_path_buf(),
            extension: extensions::ext_of(path),
            parent_name,
            grandparent_name,
        }
    }

    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }
}

fn folder_name(dir: Option<&Path>) -> String {
    dir.and_then(|d| d.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}
