//! File reads with path-annotated errors

use std::fs;

use crate::{Error, NormalizedPath, Result};

/// Read raw bytes from a file.
pub fn read_bytes(path: &NormalizedPath) -> Result<Vec<u8>> {
    let native_path = path.to_native();
    fs::read(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read a file whose bytes must be kept verbatim as a `String`.
///
/// Unlike [`read_text`], invalid UTF-8 is reported as
/// [`Error::InvalidUtf8`] instead of an I/O error.
pub fn read_verbatim(path: &NormalizedPath) -> Result<String> {
    let bytes = read_bytes(path)?;
    String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 {
        path: path.to_native(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_verbatim_preserves_bytes() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("body.yml");
        let content = "a: 1\r\n\n  # trailing  \n";
        fs::write(&file, content).unwrap();

        let read = read_verbatim(&NormalizedPath::new(&file)).unwrap();
        assert_eq!(read, content);
    }

    #[test]
    fn read_verbatim_rejects_invalid_utf8() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("bad.json");
        fs::write(&file, [0xff, 0xfe, 0x00]).unwrap();

        let err = read_verbatim(&NormalizedPath::new(&file)).unwrap_err();
        assert!(matches!(err, Error::InvalidUtf8 { .. }));
    }

    #[test]
    fn read_text_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = read_text(&NormalizedPath::new(temp.path().join("nope.txt"))).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("nope.txt"));
    }
}
