mod common;

use common::{build_zip, load_fixture, MemorySink, MockFetcher};
use dart_ingest::configs::ExtractConfig;
use dart_ingest::error::{Error, ExtractError, UpstreamError};
use dart_ingest::export::CsvSink;
use dart_ingest::ingest::run_extraction;

fn config() -> ExtractConfig {
    ExtractConfig {
        api_key: "test-key".to_string(),
        company_name: "테스트바이오".to_string(),
        begin_date: Some("20240101".to_string()),
        end_date: Some("20240131".to_string()),
        base_url: "https://dart.test/api/".to_string(),
        ..ExtractConfig::default()
    }
}

fn happy_fetcher() -> MockFetcher {
    let fetcher = MockFetcher::new();
    fetcher.respond(
        "corpCode.xml",
        build_zip(&[("CORPCODE.xml", load_fixture("corp_code.xml").as_bytes())]),
    );
    fetcher.respond(
        "list.json",
        load_fixture("filing_list.json").into_bytes(),
    );
    fetcher.respond(
        "document.xml",
        build_zip(&[(
            "20240119000222.xml",
            load_fixture("issuance_report.xml").as_bytes(),
        )]),
    );
    fetcher
}

#[tokio::test]
async fn runs_full_extraction() {
    let fetcher = happy_fetcher();
    let sink = MemorySink::default();

    let report = run_extraction(&fetcher, &sink, &config())
        .await
        .expect("extraction should succeed");

    assert_eq!(report.corp_code, "01234567");
    assert_eq!(report.rcept_no, "20240119000222");
    assert_eq!(report.columns, 6);
    assert_eq!(report.rows, 5);

    let written = sink.written.lock().unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(
        written[0].0,
        "테스트바이오_증권발행실적_청약및배정현황_20240119000222"
    );
    assert_eq!(written[0].1.header[1], "최초 배정 - 주식수");
}

#[tokio::test]
async fn builds_dart_request_urls() {
    let fetcher = happy_fetcher();
    run_extraction(&fetcher, &MemorySink::default(), &config())
        .await
        .unwrap();

    let requests = fetcher.requested();
    assert_eq!(
        requests,
        vec![
            "https://dart.test/api/corpCode.xml?crtfc_key=test-key".to_string(),
            "https://dart.test/api/list.json?crtfc_key=test-key&corp_code=01234567\
             &bgn_de=20240101&end_de=20240131&page_no=1&page_count=100"
                .to_string(),
            "https://dart.test/api/document.xml?crtfc_key=test-key&rcept_no=20240119000222"
                .to_string(),
        ]
    );
}

#[tokio::test]
async fn writes_csv_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let fetcher = happy_fetcher();
    let sink = CsvSink::new(dir.path());

    let report = run_extraction(&fetcher, &sink, &config()).await.unwrap();

    assert_eq!(
        report.output,
        dir.path()
            .join("테스트바이오_증권발행실적_청약및배정현황_20240119000222.csv")
    );
    let bytes = std::fs::read(&report.output).unwrap();
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("구분,최초 배정 - 주식수,최초 배정 - 비율,최종 배정 - 주식수,최종 배정 - 비율,비고")
    );
    assert_eq!(
        lines.next(),
        Some("우리사주조합,\"200,000\",20.00,\"198,000\",19.80,-")
    );
    assert_eq!(text.lines().count(), 6);
}

#[tokio::test]
async fn unknown_company_stops_before_filing_lookup() {
    let fetcher = happy_fetcher();
    let config = ExtractConfig {
        company_name: "없는회사".to_string(),
        ..config()
    };

    let err = run_extraction(&fetcher, &MemorySink::default(), &config)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Upstream(UpstreamError::CompanyNotFound(ref name)) if name == "없는회사"
    ));
    assert_eq!(fetcher.requested().len(), 1);
}

#[tokio::test]
async fn empty_filing_list_is_reported() {
    let fetcher = happy_fetcher();
    fetcher.respond(
        "list.json",
        r#"{"status":"013","message":"조회된 데이타가 없습니다."}"#
            .as_bytes()
            .to_vec(),
    );

    let err = run_extraction(&fetcher, &MemorySink::default(), &config())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Upstream(UpstreamError::NoFilings { ref status, .. }) if status == "013"
    ));
}

#[tokio::test]
async fn missing_report_is_reported() {
    let fetcher = happy_fetcher();
    fetcher.respond(
        "list.json",
        r#"{"status":"000","message":"정상","list":[{"report_nm":"주요사항보고서","rcept_no":"1"}]}"#
            .as_bytes()
            .to_vec(),
    );

    let err = run_extraction(&fetcher, &MemorySink::default(), &config())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Upstream(UpstreamError::FilingNotFound { .. })
    ));
}

#[tokio::test]
async fn failed_download_is_not_retried() {
    let fetcher = happy_fetcher();
    fetcher.fail("document.xml", 500);

    let err = run_extraction(&fetcher, &MemorySink::default(), &config())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Upstream(UpstreamError::RequestFailed { ref endpoint, .. }) if endpoint == "document.xml"
    ));
    assert_eq!(fetcher.requested().len(), 3);
}

#[tokio::test]
async fn extraction_errors_leave_nothing_written() {
    let fetcher = happy_fetcher();
    let one_table = r#"<DOCUMENT><SECTION-3 ACLASS="MANDATORY"><TITLE>3. 청약 및 배정현황</TITLE>
        <TABLE-GROUP><TABLE/></TABLE-GROUP></SECTION-3></DOCUMENT>"#;
    fetcher.respond(
        "document.xml",
        build_zip(&[("20240119000222.xml", one_table.as_bytes())]),
    );
    let sink = MemorySink::default();

    let err = run_extraction(&fetcher, &sink, &config()).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Extract(ExtractError::InsufficientTables { found: 1, .. })
    ));
    assert!(sink.written.lock().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_config_makes_no_requests() {
    let fetcher = happy_fetcher();
    let config = ExtractConfig {
        end_date: Some("2024-01-31".to_string()),
        ..config()
    };

    let err = run_extraction(&fetcher, &MemorySink::default(), &config)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(fetcher.requested().is_empty());
}
