use std::fs;
use std::io;
use std::path::Path;

/// Create the destination directory chain.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

/// Move a file, falling back to copy+remove when rename fails; the source
/// and destination roots may sit on different volumes.
pub fn move_file(src: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(src, dest)?;
            fs::remove_file(src)
        }
    }
}
