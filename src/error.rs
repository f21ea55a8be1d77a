use thiserror::Error;

/// Failures of the extraction pipeline. Each variant names the stage that
/// stopped and what it expected to find.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("malformed document at byte {position}: {reason}")]
    MalformedDocument { position: u64, reason: String },

    #[error("no <{tag} {class_attr}=\"{class}\"> section with a title containing \"{title}\"")]
    SectionNotFound {
        tag: String,
        class_attr: String,
        class: String,
        title: String,
    },

    #[error("section \"{section_title}\" has no <{group_tag}> child")]
    TableGroupMissing {
        section_title: String,
        group_tag: String,
    },

    #[error("table group holds {found} table(s); table #{index} is required")]
    InsufficientTables { found: usize, index: usize },

    #[error("merged table header has no columns")]
    EmptyHeader,

    #[error("header row {row}, cell {cell} declares non-positive colspan \"{value}\"")]
    InvalidColspan {
        row: usize,
        cell: usize,
        value: String,
    },
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{endpoint} request failed: {reason}")]
    RequestFailed { endpoint: String, reason: String },

    #[error("no corporation named \"{0}\" in the DART corporation code list")]
    CompanyNotFound(String),

    #[error("DART returned no filings (status {status}: {message})")]
    NoFilings { status: String, message: String },

    #[error("no \"{report_name}\" filing for corporation {corp_code} between {begin} and {end}")]
    FilingNotFound {
        report_name: String,
        corp_code: String,
        begin: String,
        end: String,
    },

    #[error("archive error: {0}")]
    Archive(String),

    #[error("invalid {endpoint} response: {reason}")]
    InvalidResponse { endpoint: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be a YYYYMMDD date, got \"{value}\"")]
    InvalidDate { field: &'static str, value: String },

    #[error("{0} is required")]
    MissingField(&'static str),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
