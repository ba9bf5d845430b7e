// blazestd - platform/fs.rs
//
// Whole-file helpers exposed to compiled Blaze programs.
// Contents are treated as opaque text: invalid UTF-8 is converted lossily
// rather than rejected.

use crate::util::constants;
use crate::util::error::FsError;
use std::io::Write;
use std::path::Path;

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion.
pub fn read_file(path: &Path) -> Result<String, FsError> {
    let bytes = std::fs::read(path).map_err(|e| FsError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read file");
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            tracing::warn!(path = %path.display(), "File is not valid UTF-8; converting lossily");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// Create or truncate `path` and write `content` to it.
pub fn write_file(path: &Path, content: &str) -> Result<(), FsError> {
    let to_err = |e: std::io::Error| FsError::Write {
        path: path.to_path_buf(),
        source: e,
    };
    let mut file = std::fs::File::create(path).map_err(to_err)?;
    file.write_all(content.as_bytes()).map_err(to_err)?;
    file.flush().map_err(to_err)?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote file");
    Ok(())
}

/// Remove the file at `path`.
pub fn delete_file(path: &Path) -> Result<(), FsError> {
    std::fs::remove_file(path).map_err(|e| FsError::Delete {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "Deleted file");
    Ok(())
}

/// Collapse a helper result into the `0` / `-1` status used across the C ABI.
pub fn status_code<T>(result: &Result<T, FsError>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => {
            tracing::debug!(error = %e, "File helper failed");
            constants::STATUS_FAIL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_write_then_read_returns_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.bz");
        write_file(&path, "let x = 5\nprintln(x)\n").unwrap();
        assert_eq!(read_file(&path).unwrap(), "let x = 5\nprintln(x)\n");
    }

    #[test]
    fn test_write_truncates_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_file(&path, "a much longer first version").unwrap();
        write_file(&path, "short").unwrap();
        assert_eq!(read_file(&path).unwrap(), "short");
    }

    #[test]
    fn test_read_missing_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_file(&dir.path().join("missing.txt"));
        assert!(matches!(result, Err(FsError::Open { .. })));
        assert_eq!(status_code(&result), -1);
    }

    #[test]
    fn test_read_invalid_utf8_is_lossy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.dat");
        std::fs::write(&path, [b'o', b'k', 0xFF, b'!']).unwrap();
        assert_eq!(read_file(&path).unwrap(), "ok\u{FFFD}!");
    }

    #[test]
    fn test_delete_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tmp.txt");
        write_file(&path, "x").unwrap();
        let result = delete_file(&path);
        assert_eq!(status_code(&result), 0);
        assert!(!path.exists());
    }

    #[test]
    fn test_delete_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never-existed.txt");
        let err = delete_file(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("dir.txt");
        assert!(matches!(write_file(&path, "x"), Err(FsError::Write { .. })));
    }
}
