use crate::allocation::SectionQuery;
use crate::dart::DART_API_BASE;
use crate::error::ConfigError;
use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const API_KEY_ENV: &str = "DART_API_KEY";
pub const DATE_FORMAT: &str = "%Y%m%d";
pub const DEFAULT_LOOKBACK_DAYS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub begin_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub section: SectionQuery,
}

/// A validated filing search window, both ends `YYYYMMDD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub begin: String,
    pub end: String,
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_base_url() -> String {
    DART_API_BASE.to_string()
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            company_name: String::new(),
            begin_date: None,
            end_date: None,
            output_dir: default_output_dir(),
            base_url: default_base_url(),
            section: SectionQuery::default(),
        }
    }
}

impl ExtractConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Fills an empty API key from `DART_API_KEY`.
    pub fn with_env_api_key(mut self) -> Self {
        if self.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                self.api_key = key;
            }
        }
        self
    }

    /// Checks the required fields and resolves the date window against
    /// `today`: the end defaults to today, the begin to 30 days before it.
    pub fn validate(&self, today: NaiveDate) -> Result<DateRange, ConfigError> {
        if self.company_name.trim().is_empty() {
            return Err(ConfigError::MissingField("company name"));
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingField("API key"));
        }

        let end = match &self.end_date {
            Some(value) => parse_date("end date", value)?,
            None => today,
        };
        let begin = match &self.begin_date {
            Some(value) => parse_date("begin date", value)?,
            None => today
                .checked_sub_days(Days::new(DEFAULT_LOOKBACK_DAYS))
                .unwrap_or(today),
        };

        Ok(DateRange {
            begin: begin.format(DATE_FORMAT).to_string(),
            end: end.format(DATE_FORMAT).to_string(),
        })
    }

    pub fn validate_today(&self) -> Result<DateRange, ConfigError> {
        self.validate(Local::now().date_naive())
    }
}

pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ConfigError> {
    let value = value.trim();
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::InvalidDate {
            field,
            value: value.to_string(),
        });
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ConfigError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
