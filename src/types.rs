use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A rectangular table: every row has exactly `header.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn width(&self) -> usize {
        self.header.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One record of the DART corporation code listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpEntry {
    pub corp_code: String,
    pub corp_name: String,
    pub stock_code: String,
    pub modify_date: String,
}

/// One item of a DART filing list response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingEntry {
    #[serde(default)]
    pub corp_code: String,
    #[serde(default)]
    pub corp_name: String,
    pub report_nm: String,
    pub rcept_no: String,
    #[serde(default)]
    pub rcept_dt: String,
    #[serde(default)]
    pub flr_nm: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub company_name: String,
    pub corp_code: String,
    pub rcept_no: String,
    pub columns: usize,
    pub rows: usize,
    pub output: PathBuf,
}
