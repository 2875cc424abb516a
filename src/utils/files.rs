use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};

// Maximum archive size: 1GB
pub const MAX_ARCHIVE_SIZE_BYTES: u64 = 1024 * 1024 * 1024;

/// Opens an archive file and validates its size on the open handle
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is larger than
/// [`MAX_ARCHIVE_SIZE_BYTES`].
pub fn open_archive(path: &Path) -> Result<File> {
    let file =
        File::open(path).with_context(|| format!("Failed to open archive: {}", path.display()))?;
    validate_file_size(&file, path, MAX_ARCHIVE_SIZE_BYTES)?;
    Ok(file)
}

/// Validates that a file's size is within `max_bytes`
///
/// Takes an open file handle to avoid TOCTOU (time-of-check-time-of-use)
/// race conditions where the file could be replaced between the size check
/// and the subsequent read.
///
/// # Errors
///
/// Returns an error if:
/// - The file metadata cannot be read
/// - The file is larger than `max_bytes`
pub fn validate_file_size(file: &File, path: &Path, max_bytes: u64) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > max_bytes {
        bail!("File too large: {} ({} bytes, max {} bytes)", path.display(), file_size, max_bytes);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_validate_file_size_within_limit() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[]").unwrap();
        file.flush().unwrap();

        let handle = File::open(file.path()).unwrap();
        assert!(validate_file_size(&handle, file.path(), 2).is_ok());
    }

    #[test]
    fn test_validate_file_size_over_limit() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[1, 2, 3]").unwrap();
        file.flush().unwrap();

        let handle = File::open(file.path()).unwrap();
        let err = validate_file_size(&handle, file.path(), 4).unwrap_err();
        assert!(err.to_string().contains("File too large"));
    }

    #[test]
    fn test_open_archive_missing_file() {
        let err = open_archive(Path::new("/nonexistent/archive.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to open archive"));
    }
}
