use crate::error::UpstreamError;
use std::io::{Cursor, Read};
use zip::ZipArchive;

const MAX_PREALLOCATION: u64 = 64 * 1024 * 1024;

/// A file pulled out of a DART zip archive.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Reads the first entry of an in-memory zip archive. DART packs the
/// requested document (or listing) as the archive's first member.
pub fn read_first_entry(bytes: &[u8]) -> Result<ArchiveEntry, UpstreamError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| UpstreamError::Archive(format!("not a zip archive: {e}")))?;

    if archive.is_empty() {
        return Err(UpstreamError::Archive("archive has no entries".to_string()));
    }

    let mut file = archive
        .by_index(0)
        .map_err(|e| UpstreamError::Archive(format!("failed to open first entry: {e}")))?;
    let name = file.name().to_string();

    let mut contents = Vec::with_capacity(initial_capacity(file.size()));
    file.read_to_end(&mut contents)
        .map_err(|e| UpstreamError::Archive(format!("failed to read {name}: {e}")))?;

    tracing::debug!("[dart] read {} bytes from archive entry {}", contents.len(), name);
    Ok(ArchiveEntry {
        name,
        bytes: contents,
    })
}

/// The declared size comes from the archive header and is only a hint.
fn initial_capacity(declared: u64) -> usize {
    usize::try_from(declared.min(MAX_PREALLOCATION)).unwrap_or(0)
}
