use crate::document::parse_document;
use crate::error::ExtractError;
use crate::types::Dataset;
use serde::{Deserialize, Serialize};

pub mod header;
pub mod locate;
pub mod rows;

/// Position of the allocation table inside the section's table group. The
/// first table of an issuance result report is a summary table.
pub const BODY_TABLE_INDEX: usize = 1;

pub const SECTION_TAG: &str = "SECTION-3";
pub const SECTION_CLASS_ATTR: &str = "ACLASS";
pub const SECTION_CLASS: &str = "MANDATORY";
pub const TITLE_TAG: &str = "TITLE";
pub const ALLOCATION_TITLE: &str = "청약 및 배정현황";
pub const TABLE_GROUP_TAG: &str = "TABLE-GROUP";
pub const TABLE_TAG: &str = "TABLE";

/// Where the target table lives in a filing document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionQuery {
    pub section_tag: String,
    pub class_attr: String,
    pub class: String,
    pub title_tag: String,
    pub title_substring: String,
    pub table_group_tag: String,
    pub table_tag: String,
    pub table_index: usize,
}

impl Default for SectionQuery {
    fn default() -> Self {
        Self {
            section_tag: SECTION_TAG.to_string(),
            class_attr: SECTION_CLASS_ATTR.to_string(),
            class: SECTION_CLASS.to_string(),
            title_tag: TITLE_TAG.to_string(),
            title_substring: ALLOCATION_TITLE.to_string(),
            table_group_tag: TABLE_GROUP_TAG.to_string(),
            table_tag: TABLE_TAG.to_string(),
            table_index: BODY_TABLE_INDEX,
        }
    }
}

/// Runs the whole pipeline over one in-memory document: parse, locate the
/// section, pick the table, merge its header and normalize its body rows.
pub fn extract_allocation_table(
    bytes: &[u8],
    query: &SectionQuery,
) -> Result<Dataset, ExtractError> {
    let root = parse_document(bytes)?;
    let section = locate::find_section(&root, query)?;
    let table = locate::select_table(section, query)?;

    let header_rows = header::read_header_rows(table)?;
    let header = header::merge_header_rows(&header_rows);
    if header.is_empty() {
        return Err(ExtractError::EmptyHeader);
    }

    let rows = rows::normalize_body_rows(table, header.len());
    tracing::debug!(
        "[dart] extracted allocation table: {} columns, {} rows",
        header.len(),
        rows.len()
    );

    Ok(Dataset { header, rows })
}
