use crate::error::ExportError;
use crate::runtime::types::DatasetSink;
use crate::types::Dataset;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const OUTPUT_LABEL: &str = "증권발행실적_청약및배정현황";

/// Artifact name for a company's allocation table, e.g.
/// `삼성전자_증권발행실적_청약및배정현황_20240120000222`.
pub fn output_name(company_name: &str, rcept_no: &str) -> String {
    sanitize_file_name(&format!("{company_name}_{OUTPUT_LABEL}_{rcept_no}"))
}

pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Writes the header row followed by every data row.
pub fn write_csv<W: Write>(writer: W, dataset: &Dataset) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(&dataset.header)?;
    for row in &dataset.rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes `<output_dir>/<name>.csv`, BOM-prefixed so spreadsheet
/// applications pick up UTF-8. Rows go to a temporary file in the same
/// directory that is renamed into place only once everything is written.
pub struct CsvSink {
    output_dir: PathBuf,
}

impl CsvSink {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }
}

impl DatasetSink for CsvSink {
    fn write(&self, dataset: &Dataset, name: &str) -> Result<PathBuf, ExportError> {
        let path = self
            .output_dir
            .join(format!("{}.csv", sanitize_file_name(name)));
        let io_error = |source: std::io::Error| ExportError::Io {
            path: path.display().to_string(),
            source,
        };

        let mut file = NamedTempFile::new_in(&self.output_dir).map_err(io_error)?;
        file.write_all(UTF8_BOM).map_err(io_error)?;
        write_csv(&mut file, dataset)?;
        file.persist(&path).map_err(|e| io_error(e.error))?;

        tracing::info!(
            "[dart] wrote {} rows x {} columns to {}",
            dataset.len(),
            dataset.width(),
            path.display()
        );
        Ok(path)
    }
}
