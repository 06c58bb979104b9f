//! Classifier artifact checks (existence + optional SHA-256 pin)

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{SpoilageError, SpoilageResult};

/// Hex SHA-256 of a file
pub fn file_sha256(path: &Path) -> SpoilageResult<String> {
    let bytes = std::fs::read(path).map_err(|e| {
        SpoilageError::ClassifierLoad(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// Verify the artifact exists and, if a digest is pinned, that it matches
pub fn verify_artifact(path: &Path, expected_sha256: Option<&str>) -> SpoilageResult<()> {
    if !path.is_file() {
        return Err(SpoilageError::ClassifierLoad(format!(
            "Model not found: {}",
            path.display()
        )));
    }

    if let Some(expected) = expected_sha256 {
        let actual = file_sha256(path)?;
        if !actual.eq_ignore_ascii_case(expected) {
            log::warn!(
                "Checksum mismatch for {}: expected {}, got {}",
                path.display(),
                expected,
                actual
            );
            return Err(SpoilageError::ClassifierLoad(format!(
                "Checksum mismatch for {}",
                path.display()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // sha256("abc")
    const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn test_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let err = verify_artifact(&dir.path().join("nope.onnx"), None).unwrap_err();
        assert!(matches!(err, SpoilageError::ClassifierLoad(ref m) if m.starts_with("Model not found")));
    }

    #[test]
    fn test_directory_is_not_an_artifact() {
        let dir = tempfile::tempdir().unwrap();
        assert!(verify_artifact(dir.path(), None).is_err());
    }

    #[test]
    fn test_checksum_match_and_mismatch() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"abc").unwrap();

        assert_eq!(file_sha256(file.path()).unwrap(), ABC_SHA256);
        assert!(verify_artifact(file.path(), None).is_ok());
        assert!(verify_artifact(file.path(), Some(ABC_SHA256)).is_ok());
        assert!(verify_artifact(file.path(), Some(&ABC_SHA256.to_uppercase())).is_ok());

        let err = verify_artifact(file.path(), Some("00")).unwrap_err();
        assert_eq!(err.kind(), "classifier_load_error");
    }
}
