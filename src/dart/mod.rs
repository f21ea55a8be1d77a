use crate::error::UpstreamError;
use crate::runtime::fetcher::Fetcher;
use crate::runtime::logging::redact_api_key;
use crate::types::{CorpEntry, FilingEntry};

pub mod corp_code;
pub mod download;
pub mod filings;

pub const DART_API_BASE: &str = "https://opendart.fss.or.kr/api";
pub const ISSUANCE_RESULT_REPORT: &str = "증권발행실적보고서";
const FILING_PAGE_COUNT: u32 = 100;

/// OpenDART endpoints used to go from a company name to a filing document.
pub struct DartClient<'a> {
    fetcher: &'a dyn Fetcher,
    base_url: String,
    api_key: String,
}

impl<'a> DartClient<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, base_url: &str, api_key: &str) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn url(&self, endpoint: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!(
            "{}/{endpoint}?crtfc_key={}",
            self.base_url,
            urlencoding::encode(&self.api_key)
        );
        for (key, value) in params {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Vec<u8>, UpstreamError> {
        let url = self.url(endpoint, params);
        tracing::debug!("[dart] GET {}", redact_api_key(&url));
        self.fetcher.fetch(endpoint, &url).await
    }

    /// Resolves a company name to its eight-digit DART corporation code.
    pub async fn corp_code_by_name(&self, company_name: &str) -> Result<CorpEntry, UpstreamError> {
        let body = self.get(corp_code::ENDPOINT, &[]).await?;
        corp_code::find_corp_in_archive(&body, company_name)
    }

    /// Lists the corporation's filings in `[begin, end]` and returns the first
    /// issuance result report.
    pub async fn find_issuance_report(
        &self,
        corp_code: &str,
        begin: &str,
        end: &str,
    ) -> Result<FilingEntry, UpstreamError> {
        let page_count = FILING_PAGE_COUNT.to_string();
        let body = self
            .get(
                filings::ENDPOINT,
                &[
                    ("corp_code", corp_code),
                    ("bgn_de", begin),
                    ("end_de", end),
                    ("page_no", "1"),
                    ("page_count", page_count.as_str()),
                ],
            )
            .await?;
        let list = filings::parse_filing_list(&body)?;
        filings::find_report(list, ISSUANCE_RESULT_REPORT).ok_or_else(|| {
            UpstreamError::FilingNotFound {
                report_name: ISSUANCE_RESULT_REPORT.to_string(),
                corp_code: corp_code.to_string(),
                begin: begin.to_string(),
                end: end.to_string(),
            }
        })
    }

    /// Downloads the filing's document archive and returns the markup bytes.
    pub async fn document_bytes(&self, rcept_no: &str) -> Result<Vec<u8>, UpstreamError> {
        let body = self.get(download::ENDPOINT, &[("rcept_no", rcept_no)]).await?;
        download::document_from_archive(&body)
    }
}
