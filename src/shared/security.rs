use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum config file size (1 MiB)
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// # Security
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Arguments
/// * `path` - The path to validate
/// * `operation` - Description of the operation (e.g., "read", "write") for error messages
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata for {} operation on {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, {} operations on symbolic links are not allowed.",
            path.display(),
            operation
        );
    }

    Ok(())
}

/// Validates a config file before it is read: it must be a regular file,
/// not a symlink, and no larger than [`MAX_CONFIG_FILE_SIZE`].
pub fn validate_config_file(path: &Path) -> Result<()> {
    validate_not_symlink(path, "config read")?;

    let metadata = fs::metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file metadata: {}", e))?;

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            metadata.len(),
            MAX_CONFIG_FILE_SIZE
        );
    }

    Ok(())
}

/// Validates an API base url: http(s) scheme, a host, and no whitespace,
/// query or fragment (paths are appended to it verbatim).
pub fn validate_api_url(url: &str) -> Result<()> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| anyhow::anyhow!("API url must start with http:// or https://: {}", url))?;

    if rest.is_empty() || rest.starts_with('/') {
        anyhow::bail!("API url has no host: {}", url);
    }

    if url.chars().any(char::is_whitespace) {
        anyhow::bail!("API url must not contain whitespace: {}", url);
    }

    if url.contains('?') || url.contains('#') {
        anyhow::bail!("API url must not contain a query or fragment: {}", url);
    }

    Ok(())
}
