use crate::error::UpstreamError;
use crate::runtime::archive::read_first_entry;

pub const ENDPOINT: &str = "document.xml";

/// Markup bytes of the first document inside a `document.xml` archive.
pub fn document_from_archive(archive: &[u8]) -> Result<Vec<u8>, UpstreamError> {
    let entry = read_first_entry(archive)?;
    tracing::info!(
        "[dart] downloaded document {} ({} bytes)",
        entry.name,
        entry.bytes.len()
    );
    Ok(entry.bytes)
}
