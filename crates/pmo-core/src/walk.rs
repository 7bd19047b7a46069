use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Recursively yield every regular file under `root`, in filename order.
/// Unreadable entries are dropped.
pub fn walk_files(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
}

/// Dotfiles and Finder droppings are never media.
pub fn is_system_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| name.starts_with('.') || name == ".DS_Store")
        .unwrap_or(false)
}
