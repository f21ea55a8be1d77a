use crate::error::ExportError;
use crate::types::Dataset;
use std::path::PathBuf;

/// Destination for a finished dataset. `name` is the artifact name without
/// extension; the sink decides format and location.
pub trait DatasetSink: Send + Sync {
    fn write(&self, dataset: &Dataset, name: &str) -> Result<PathBuf, ExportError>;
}
