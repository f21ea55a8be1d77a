use crate::allocation::extract_allocation_table;
use crate::configs::ExtractConfig;
use crate::dart::DartClient;
use crate::error::Error;
use crate::export::output_name;
use crate::runtime::fetcher::Fetcher;
use crate::runtime::logging::{log_event, LogLevel};
use crate::runtime::types::DatasetSink;
use crate::types::ExtractionReport;
use serde_json::json;

/// Company name and date window in, allocation table file out. The first
/// failing stage aborts the run; nothing is retried.
pub async fn run_extraction(
    fetcher: &dyn Fetcher,
    sink: &dyn DatasetSink,
    config: &ExtractConfig,
) -> Result<ExtractionReport, Error> {
    let range = config.validate_today()?;
    let company_name = config.company_name.trim();
    log_event(
        LogLevel::Info,
        "extraction_started",
        Some(json!({
            "company": company_name,
            "begin": range.begin,
            "end": range.end,
        })),
    );

    let client = DartClient::new(fetcher, &config.base_url, config.api_key.trim());

    let corp = client.corp_code_by_name(company_name).await?;
    let filing = client
        .find_issuance_report(&corp.corp_code, &range.begin, &range.end)
        .await?;
    log_event(
        LogLevel::Info,
        "filing_selected",
        Some(json!({
            "corp_code": corp.corp_code,
            "rcept_no": filing.rcept_no,
            "rcept_dt": filing.rcept_dt,
        })),
    );

    let document = client.document_bytes(&filing.rcept_no).await?;
    let dataset = extract_allocation_table(&document, &config.section)?;
    let output = sink.write(&dataset, &output_name(company_name, &filing.rcept_no))?;

    log_event(
        LogLevel::Info,
        "extraction_completed",
        Some(json!({
            "columns": dataset.width(),
            "rows": dataset.len(),
            "output": output.display().to_string(),
        })),
    );

    Ok(ExtractionReport {
        company_name: company_name.to_string(),
        corp_code: corp.corp_code,
        rcept_no: filing.rcept_no,
        columns: dataset.width(),
        rows: dataset.len(),
        output,
    })
}
