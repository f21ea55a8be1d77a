use crate::error::UpstreamError;
use crate::types::FilingEntry;
use serde::Deserialize;

pub const ENDPOINT: &str = "list.json";

#[derive(Debug, Deserialize)]
struct FilingListResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
    list: Option<Vec<FilingEntry>>,
}

/// Parses a `list.json` body. A response without a `list` array means DART
/// had nothing to return (or refused the request); its status is surfaced.
pub fn parse_filing_list(body: &[u8]) -> Result<Vec<FilingEntry>, UpstreamError> {
    let response: FilingListResponse =
        serde_json::from_slice(body).map_err(|e| UpstreamError::InvalidResponse {
            endpoint: ENDPOINT.to_string(),
            reason: e.to_string(),
        })?;

    response.list.ok_or(UpstreamError::NoFilings {
        status: response.status,
        message: response.message,
    })
}

/// First filing whose trimmed report name equals `report_name`.
pub fn find_report(list: Vec<FilingEntry>, report_name: &str) -> Option<FilingEntry> {
    list.into_iter()
        .find(|item| item.report_nm.trim() == report_name)
}
