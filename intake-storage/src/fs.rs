use crate::error::{StorageError, StorageResult};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Writes `bytes` to `path` atomically.
///
/// The data goes to a temp file in the destination directory, is fsynced,
/// restricted to owner read/write, and then renamed over `path`. If any step
/// fails the temp file is removed and `path` is left as it was. Missing
/// parent directories are created.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> StorageResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    restrict_permissions(tmp.path())?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;

    tmp.persist(path).map_err(|e| StorageError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    restrict_permissions(path)?;

    debug!(path = %path.display(), bytes = bytes.len(), "atomic write complete");
    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> StorageResult<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> StorageResult<()> {
    Ok(())
}
