use crate::error::StorageResult;
use rand::RngCore;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{debug, info};

/// Number of random overwrite passes before unlinking.
pub const OVERWRITE_PASSES: usize = 3;

const CHUNK_SIZE: usize = 64 * 1024;

/// Overwrites a file with random bytes and removes it.
///
/// Each pass covers the full file length in 64 KiB chunks and is flushed and
/// fsynced before the next begins. A missing file counts as success.
pub fn secure_delete(path: &Path) -> StorageResult<()> {
    let len = match std::fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "nothing to delete");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut file = OpenOptions::new().write(true).open(path)?;
    let mut rng = rand::rng();
    let mut buf = vec![0u8; CHUNK_SIZE];

    for pass in 1..=OVERWRITE_PASSES {
        file.seek(SeekFrom::Start(0))?;
        let mut remaining = len;
        while remaining > 0 {
            let n = remaining.min(CHUNK_SIZE as u64) as usize;
            rng.fill_bytes(&mut buf[..n]);
            file.write_all(&buf[..n])?;
            remaining -= n as u64;
        }
        file.flush()?;
        file.sync_all()?;
        debug!(pass, len, "overwrite pass complete");
    }
    drop(file);

    std::fs::remove_file(path)?;
    info!(path = %path.display(), "securely deleted");
    Ok(())
}
