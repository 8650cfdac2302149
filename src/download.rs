//! Saving generated images to disk.
//!
//! Files are written to a temp file next to the destination and then renamed
//! into place, so a failed save never leaves a truncated image behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default file name offered in the save dialog
pub const DEFAULT_FILE_NAME: &str = "qr-code.png";

/// Errors that can occur while saving an image
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Destination directory not found: {0}")]
    DirNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to move file into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Append `.{extension}` unless the path already ends with it (case-insensitive)
pub fn with_extension(path: &Path, extension: &str) -> PathBuf {
    let has_extension = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false);

    if has_extension {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(".");
        name.push(extension);
        PathBuf::from(name)
    }
}

/// Write `bytes` to `path`, replacing any existing file
pub fn save_bytes(bytes: &[u8], path: &Path) -> Result<(), DownloadError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if !dir.is_dir() {
        return Err(DownloadError::DirNotFound(dir.to_path_buf()));
    }

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.flush()?;
    temp.persist(path)?;

    tracing::info!("Saved {} bytes to {:?}", bytes.len(), path);
    Ok(())
}

/// Show a native save dialog for an image file
pub fn pick_save_path(file_name: &str, extension: &str, start_dir: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Save QR Code")
        .add_filter(extension.to_uppercase(), &[extension])
        .set_file_name(file_name);

    if let Some(dir) = start_dir.filter(|dir| dir.is_dir()) {
        dialog = dialog.set_directory(dir);
    }

    dialog.save_file().map(|path| with_extension(&path, extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_with_extension() {
        assert_eq!(with_extension(Path::new("qr"), "png"), PathBuf::from("qr.png"));
        assert_eq!(with_extension(Path::new("qr.png"), "png"), PathBuf::from("qr.png"));
        assert_eq!(with_extension(Path::new("QR.PNG"), "png"), PathBuf::from("QR.PNG"));
        assert_eq!(
            with_extension(Path::new("qr.code"), "png"),
            PathBuf::from("qr.code.png")
        );
    }

    #[test]
    fn test_save_bytes_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_FILE_NAME);

        save_bytes(b"first", &path).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"first");

        save_bytes(b"second", &path).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");

        // Only the destination remains, no stray temp files
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_save_bytes_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join(DEFAULT_FILE_NAME);

        let result = save_bytes(b"data", &path);
        assert!(matches!(result, Err(DownloadError::DirNotFound(_))));
        assert!(!path.exists());
    }
}
