use crate::shared::error::ExplorerError;
use crate::shared::Result;
use std::fs::{self, Metadata};
use std::path::Path;

/// Maximum size of a repository snapshot (100 MB)
pub const MAX_DATABASE_SIZE: u64 = 100 * 1024 * 1024;

/// Workload definitions above this size (100 KiB) are not parsed at all
pub const MAX_WORKLOAD_SIZE: u64 = 100 * 1024;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Security
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Returns
/// The file metadata, so callers can reuse size and modification time
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<Metadata> {
    let metadata = fs::symlink_metadata(path).map_err(|e| ExplorerError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if metadata.is_symlink() {
        return Err(ExplorerError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Symbolic links are not followed; pass the target file instead".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(metadata)
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Reads a file to a string after the regular-file and size checks
pub fn safe_read_to_string(path: &Path, file_description: &str, max_size: u64) -> Result<String> {
    let metadata = validate_regular_file(path, file_description)?;
    validate_file_size(metadata.len(), path, max_size)?;

    fs::read_to_string(path).map_err(|e| {
        ExplorerError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_validate_regular_file_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("workload.yaml");
        fs::write(&file_path, "data: {}").unwrap();

        let metadata = validate_regular_file(&file_path, "workload").unwrap();
        assert_eq!(metadata.len(), 8);
    }

    #[test]
    fn test_validate_regular_file_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_regular_file(temp_dir.path(), "workload");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a regular file"));
    }

    #[test]
    fn test_validate_regular_file_nonexistent() {
        let result = validate_regular_file(Path::new("/nonexistent/file.yaml"), "workload");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to read workload metadata"));
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_regular_file_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.yaml");
        let link = temp_dir.path().join("link.yaml");
        fs::write(&target, "data: {}").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let result = validate_regular_file(&link, "workload");
        assert!(result.unwrap_err().to_string().contains("symbolic link"));
    }

    #[test]
    fn test_validate_file_size_within_limit() {
        let path = PathBuf::from("/test/file.yaml");
        assert!(validate_file_size(1000, &path, MAX_WORKLOAD_SIZE).is_ok());
    }

    #[test]
    fn test_validate_file_size_exceeds_limit() {
        let path = PathBuf::from("/test/file.yaml");
        let result = validate_file_size(MAX_WORKLOAD_SIZE + 1, &path, MAX_WORKLOAD_SIZE);
        assert!(result.unwrap_err().to_string().contains("too large"));
    }

    #[test]
    fn test_safe_read_to_string_respects_limit() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("big.toml");
        fs::write(&file_path, "x".repeat(64)).unwrap();

        assert!(safe_read_to_string(&file_path, "database", 32).is_err());
        assert_eq!(
            safe_read_to_string(&file_path, "database", 64).unwrap().len(),
            64
        );
    }

    #[test]
    fn test_size_constants() {
        assert_eq!(MAX_WORKLOAD_SIZE, 100 * 1024);
        assert_eq!(MAX_DATABASE_SIZE, 100 * 1024 * 1024);
    }
}
