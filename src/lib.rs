pub mod allocation;
pub mod configs;
pub mod dart;
pub mod document;
pub mod error;
pub mod export;
pub mod ingest;
pub mod runtime;
pub mod types;

pub use allocation::{extract_allocation_table, SectionQuery};
pub use error::{Error, ExtractError};
pub use types::Dataset;
