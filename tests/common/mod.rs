#![allow(dead_code)]
use async_trait::async_trait;
use dart_ingest::error::{ExportError, UpstreamError};
use dart_ingest::runtime::fetcher::Fetcher;
use dart_ingest::runtime::types::DatasetSink;
use dart_ingest::types::Dataset;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub fn fixtures_dir() -> String {
    format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR"))
}

pub fn load_fixture(filename: &str) -> String {
    let path = Path::new(&fixtures_dir()).join(filename);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

pub fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("start zip entry");
        writer.write_all(content).expect("write zip entry");
    }
    writer.finish().expect("finish zip").into_inner()
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Serves canned bodies per endpoint and records every requested URL.
pub struct MockFetcher {
    responses: Mutex<HashMap<String, Result<Vec<u8>, u16>>>,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn respond(&self, endpoint: &str, body: Vec<u8>) {
        self.responses
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), Ok(body));
    }

    pub fn fail(&self, endpoint: &str, status: u16) {
        self.responses
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), Err(status));
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, endpoint: &str, url: &str) -> Result<Vec<u8>, UpstreamError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.responses.lock().unwrap().get(endpoint) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(UpstreamError::RequestFailed {
                endpoint: endpoint.to_string(),
                reason: format!("HTTP error {status}"),
            }),
            None => Err(UpstreamError::RequestFailed {
                endpoint: endpoint.to_string(),
                reason: "no mock response".to_string(),
            }),
        }
    }
}

/// Keeps written datasets in memory instead of touching the filesystem.
#[derive(Clone, Default)]
pub struct MemorySink {
    pub written: Arc<Mutex<Vec<(String, Dataset)>>>,
}

impl DatasetSink for MemorySink {
    fn write(&self, dataset: &Dataset, name: &str) -> Result<PathBuf, ExportError> {
        self.written
            .lock()
            .unwrap()
            .push((name.to_string(), dataset.clone()));
        Ok(PathBuf::from(format!("{name}.mem")))
    }
}
